use crate::provider::{DnsProvider, DomainRecord, ProviderError, RecordRequest, RecordType};
use serde_json::{json, Map};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// An in-memory DNS provider. Records live only as long as the process.
///
/// Behaves like a strict hosted provider: unknown parent domains answer HTTP 404, and a record
/// whose type and name already exist, or an `A` record whose data isn't a real IPv4 address,
/// answers HTTP 422.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct InMemoryProvider {
    domains: RwLock<HashMap<String, Vec<DomainRecord>>>,
    next_id: AtomicU64,
}

impl InMemoryProvider {
    /// Create a provider with an empty zone for each of the given parent domains.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: RwLock::new(
                domains
                    .into_iter()
                    .map(|d| (d.into(), Vec::default()))
                    .collect(),
            ),
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a record directly, bypassing the uniqueness and data checks.
    pub async fn seed(&self, domain: &str, record_type: &str, name: &str, data: &str) {
        let record = self.record(record_type, name, data, 1800);
        self.domains
            .write()
            .await
            .entry(domain.to_string())
            .or_default()
            .push(record);
    }

    /// A snapshot of the records of `domain`, or `None` for unknown domains.
    pub async fn records(&self, domain: &str) -> Option<Vec<DomainRecord>> {
        self.domains.read().await.get(domain).cloned()
    }

    fn record(&self, record_type: &str, name: &str, data: &str, ttl: u32) -> DomainRecord {
        let mut extra = Map::new();
        extra.insert(
            "id".to_string(),
            json!(self.next_id.fetch_add(1, Ordering::Relaxed)),
        );
        extra.insert("data".to_string(), json!(data));
        extra.insert("ttl".to_string(), json!(ttl));
        DomainRecord {
            name: name.to_string(),
            record_type: record_type.to_string(),
            extra,
        }
    }

    fn not_found(domain: &str) -> ProviderError {
        ProviderError::Status {
            status: 404,
            message: format!("domain {domain} not found"),
        }
    }

    fn unprocessable(message: impl Into<String>) -> ProviderError {
        ProviderError::Status {
            status: 422,
            message: message.into(),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for InMemoryProvider {
    async fn list_records(&self, domain: &str) -> Result<Vec<DomainRecord>, ProviderError> {
        self.records(domain)
            .await
            .ok_or_else(|| Self::not_found(domain))
    }

    async fn create_record(
        &self,
        domain: &str,
        req: &RecordRequest,
    ) -> Result<DomainRecord, ProviderError> {
        let mut domains = self.domains.write().await;
        let zone = domains.get_mut(domain).ok_or_else(|| Self::not_found(domain))?;

        if req.record_type == RecordType::A && req.data.parse::<Ipv4Addr>().is_err() {
            return Err(Self::unprocessable(format!(
                "{} is not a valid IPv4 address",
                req.data
            )));
        }
        if zone
            .iter()
            .any(|r| r.name == req.name && r.is(req.record_type))
        {
            return Err(Self::unprocessable(format!(
                "{} record for {} already exists",
                req.record_type, req.name
            )));
        }

        let record = self.record(req.record_type.as_str(), &req.name, &req.data, req.ttl);
        zone.push(record.clone());
        Ok(record)
    }
}
