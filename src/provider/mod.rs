//! DNS provider record management.
//!
//! Supports a generic interface for listing the records of a parent domain and creating new
//! records under it. Only the two record types used to claim a subdomain are ever created:
//! `TXT` for ownership verification and `A` for routing.
//!
//! Two implementations are provided, [`digitalocean::DigitalOceanProvider`] and
//! [`memory::InMemoryProvider`]. The former talks to the [DigitalOcean domain records API]. The
//! latter keeps records in process memory and is not durable across restarts; it is useful for
//! dry runs and tests.
//!
//! [DigitalOcean domain records API]: https://docs.digitalocean.com/reference/api/api-reference/#tag/Domain-Records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

pub mod digitalocean;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use digitalocean::DigitalOceanProvider;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryProvider;

/// TTL in seconds applied to every record this service creates.
pub const RECORD_TTL: u32 = 3600;

/// `DynProvider` is a type alias for a [`DnsProvider`] shared by concurrent request handlers.
#[allow(clippy::module_name_repetitions)]
pub type DynProvider = Arc<dyn DnsProvider + Send + Sync>;

/// An async trait describing the two DNS provider capabilities this service relies on.
#[async_trait::async_trait]
pub trait DnsProvider {
    /// List every record of the given parent domain.
    async fn list_records(&self, domain: &str) -> Result<Vec<DomainRecord>, ProviderError>;

    /// Create a record under the given parent domain, returning the provider's representation
    /// of the created record.
    async fn create_record(
        &self,
        domain: &str,
        record: &RecordRequest,
    ) -> Result<DomainRecord, ProviderError>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    #[serde(rename = "TXT")]
    Txt,
}

impl RecordType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record creation request as sent to the provider.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordRequest {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub data: String,
    pub ttl: u32,
}

impl RecordRequest {
    #[must_use]
    pub fn new(record_type: RecordType, name: &str, data: &str) -> Self {
        Self {
            record_type,
            name: name.to_string(),
            data: data.to_string(),
            ttl: RECORD_TTL,
        }
    }
}

/// A record as represented by the provider. Only `name` and `type` are interpreted, every other
/// field is carried through untouched so it can be echoed back to API clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct DomainRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DomainRecord {
    #[must_use]
    pub fn is(&self, record_type: RecordType) -> bool {
        self.record_type.eq_ignore_ascii_case(record_type.as_str())
    }

    /// The provider assigned record ID, if the provider returned one.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.extra.get("id")
    }
}

#[derive(thiserror::Error, Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response: connection failure, timeout, TLS error.
    #[error("provider request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a success status but a body that couldn't be understood.
    #[error("unexpected provider response: {0}")]
    Decode(String),

    /// A listing page pointed at a page that can't be followed safely.
    #[error("unexpected provider pagination: {0}")]
    Pagination(String),
}

impl ProviderError {
    /// The HTTP status the provider answered with, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_request_wire_format() {
        let req = RecordRequest::new(RecordType::Txt, "app", "replit-verify=abc");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"type": "TXT", "name": "app", "data": "replit-verify=abc", "ttl": 3600})
        );
    }

    #[test]
    fn domain_record_keeps_unknown_fields() {
        let raw = json!({
            "id": 28448432,
            "type": "A",
            "name": "taken",
            "data": "1.2.3.4",
            "priority": null,
            "ttl": 1800,
        });
        let record: DomainRecord = serde_json::from_value(raw.clone()).unwrap();
        assert!(record.is(RecordType::A));
        assert!(!record.is(RecordType::Txt));
        assert_eq!(record.id(), Some(&json!(28448432)));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }
}
