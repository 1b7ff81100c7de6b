//! A [DigitalOcean domain records API] implementation of the
//! [`DnsProvider`][super::DnsProvider] trait.
//!
//! Every request carries the API token as a bearer token. Record listings are paged; all pages
//! are fetched by following the `links.pages.next` URLs the API returns.
//!
//! [DigitalOcean domain records API]: https://docs.digitalocean.com/reference/api/api-reference/#tag/Domain-Records
use crate::provider::{DnsProvider, DomainRecord, ProviderError, RecordRequest};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com";

/// Records requested per listing page. 200 is the API maximum.
const PER_PAGE: u32 = 200;

/// Upper bound on listing pages fetched for one domain.
const MAX_PAGES: usize = 50;

#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct DigitalOceanProvider {
    client: Client,
    base_url: String,
    api_token: String,
}

#[derive(Deserialize, Debug)]
struct RecordsPage {
    #[serde(default)]
    domain_records: Vec<DomainRecord>,
    #[serde(default)]
    links: Links,
}

#[derive(Deserialize, Debug, Default)]
struct Links {
    #[serde(default)]
    pages: Pages,
}

#[derive(Deserialize, Debug, Default)]
struct Pages {
    next: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CreatedRecord {
    domain_record: DomainRecord,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    message: String,
}

impl DigitalOceanProvider {
    /// Build a provider talking to the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a [`reqwest::Error`] if the HTTP client can't be constructed, e.g. when the TLS
    /// backend fails to initialize.
    pub fn new(
        base_url: &str,
        api_token: String,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    /// Only pages on the configured API origin are followed, each at most once, up to
    /// [`MAX_PAGES`] in total. The bearer token is never sent anywhere else.
    fn check_next_page(&self, next: &str, visited: &HashSet<String>) -> Result<(), ProviderError> {
        if !next.starts_with(&format!("{}/", self.base_url)) {
            return Err(ProviderError::Pagination(format!(
                "next page {next} is not on {}",
                self.base_url
            )));
        }
        if visited.contains(next) {
            return Err(ProviderError::Pagination(format!(
                "next page {next} was already fetched"
            )));
        }
        if visited.len() >= MAX_PAGES {
            return Err(ProviderError::Pagination(format!(
                "more than {MAX_PAGES} pages of records"
            )));
        }
        Ok(())
    }

    fn records_url(&self, domain: &str) -> String {
        format!("{}/v2/domains/{domain}/records", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProviderError> {
        let response = request.bearer_auth(&self.api_token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("provider responded HTTP {status}");

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or(body, |err| err.message);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl DnsProvider for DigitalOceanProvider {
    async fn list_records(&self, domain: &str) -> Result<Vec<DomainRecord>, ProviderError> {
        let url = self.records_url(domain);
        tracing::debug!("GET {url}");
        let mut page: RecordsPage = self
            .send(self.client.get(&url).query(&[("per_page", PER_PAGE)]))
            .await?;
        let mut records = std::mem::take(&mut page.domain_records);
        let mut visited = HashSet::from([url]);

        while let Some(next) = page.links.pages.next.take() {
            self.check_next_page(&next, &visited)?;
            tracing::debug!("GET {next}");
            visited.insert(next.clone());
            page = self.send(self.client.get(&next)).await?;
            records.append(&mut page.domain_records);
        }
        Ok(records)
    }

    async fn create_record(
        &self,
        domain: &str,
        record: &RecordRequest,
    ) -> Result<DomainRecord, ProviderError> {
        let url = self.records_url(domain);
        tracing::debug!("POST {url} ({} {})", record.record_type, record.name);
        let created: CreatedRecord = self.send(self.client.post(&url).json(record)).await?;
        Ok(created.domain_record)
    }
}
