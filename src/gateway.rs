//! Subdomain availability checks and record creation.
//!
//! The [`Gateway`] validates caller input against the [label and IPv4 grammars][crate::validate]
//! and forwards valid requests to the configured [`DnsProvider`][crate::provider::DnsProvider].
//! Invalid input is rejected before any provider call is made.
//!
//! Record creation issues two provider calls, `TXT` then `A`. They are not atomic: when the `A`
//! record is rejected the `TXT` record that was already created stays with the provider and only
//! the `A` failure is reported.

use crate::error::{Error, ValidationError};
use crate::provider::{DomainRecord, DynProvider, ProviderError, RecordRequest, RecordType};
use crate::validate::{normalize_label, validate_ipv4_literal, validate_subdomain};
use serde::Serialize;
use std::sync::Arc;

pub type SharedGateway = Arc<Gateway>;

const CHECK_ACTION: &str = "check subdomain availability";
const CREATE_ACTION: &str = "create DNS records";

pub struct Gateway {
    domain: String,
    provider: DynProvider,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityResult {
    pub available: bool,
    pub subdomain: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateResult {
    pub subdomain: String,
    pub url: String,
    pub records: CreatedRecords,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreatedRecords {
    pub txt: DomainRecord,
    pub a: DomainRecord,
}

impl Gateway {
    pub fn new(domain: impl Into<String>, provider: DynProvider) -> Self {
        Self {
            domain: domain.into(),
            provider,
        }
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    fn fqdn(&self, label: &str) -> String {
        format!("{label}.{}", self.domain)
    }

    /// Report whether `raw_subdomain` is free under the parent domain. Only existing `A` or
    /// `TXT` records with the same name make a label unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty or malformed label,
    /// [`Error::DomainNotConfigured`] when the provider doesn't know the parent domain and
    /// [`Error::Upstream`] for any other provider failure.
    pub async fn check_availability(
        &self,
        raw_subdomain: &str,
    ) -> Result<AvailabilityResult, Error> {
        let label = normalize_label(raw_subdomain);
        if label.is_empty() {
            return Err(ValidationError::SubdomainRequired.into());
        }
        if !validate_subdomain(&label) {
            return Err(ValidationError::InvalidSubdomain.into());
        }

        let records = self
            .provider
            .list_records(&self.domain)
            .await
            .map_err(|err| self.provider_error(err, CHECK_ACTION))?;
        let taken = records
            .iter()
            .any(|r| r.name == label && (r.is(RecordType::A) || r.is(RecordType::Txt)));

        let subdomain = self.fqdn(&label);
        tracing::debug!("\"{subdomain}\" available: {}", !taken);
        Ok(AvailabilityResult {
            available: !taken,
            subdomain,
        })
    }

    /// Create the verification `TXT` record and the routing `A` record for `raw_subdomain`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when any input is empty, the label is malformed or the
    /// address isn't a dotted quad, [`Error::DomainNotConfigured`] when the provider doesn't
    /// know the parent domain, [`Error::RecordConflict`] when the provider rejects a record as a
    /// duplicate or invalid and [`Error::Upstream`] for any other provider failure.
    pub async fn create_records(
        &self,
        raw_subdomain: &str,
        raw_txt: &str,
        raw_a: &str,
    ) -> Result<CreateResult, Error> {
        let label = normalize_label(raw_subdomain);
        let (txt_value, a_value) = (raw_txt.trim(), raw_a.trim());
        if label.is_empty() || txt_value.is_empty() || a_value.is_empty() {
            return Err(ValidationError::FieldsRequired.into());
        }
        if !validate_subdomain(&label) {
            return Err(ValidationError::InvalidSubdomain.into());
        }
        if !validate_ipv4_literal(a_value) {
            return Err(ValidationError::InvalidIPv4.into());
        }

        let subdomain = self.fqdn(&label);
        let txt = self
            .create(RecordRequest::new(RecordType::Txt, &label, txt_value))
            .await?;
        let a = match self
            .create(RecordRequest::new(RecordType::A, &label, a_value))
            .await
        {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(
                    "A record for \"{subdomain}\" failed, TXT record {} left in place",
                    txt.id().map_or_else(|| "(no id)".to_string(), ToString::to_string)
                );
                return Err(err);
            }
        };

        tracing::info!("created TXT and A records for \"{subdomain}\" -> {a_value}");
        Ok(CreateResult {
            url: format!("https://{subdomain}"),
            subdomain,
            records: CreatedRecords { txt, a },
        })
    }

    async fn create(&self, record: RecordRequest) -> Result<DomainRecord, Error> {
        self.provider
            .create_record(&self.domain, &record)
            .await
            .map_err(|err| match err.status() {
                Some(422) => {
                    tracing::debug!("provider rejected {} record: {err}", record.record_type);
                    Error::RecordConflict
                }
                _ => self.provider_error(err, CREATE_ACTION),
            })
    }

    fn provider_error(&self, err: ProviderError, action: &'static str) -> Error {
        if err.status() == Some(404) {
            tracing::debug!("provider has no domain \"{}\": {err}", self.domain);
            return Error::DomainNotConfigured(self.domain.clone());
        }
        tracing::error!("failed to {action}: {err}");
        Error::Upstream {
            action,
            source: err,
        }
    }
}
