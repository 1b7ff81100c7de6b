use crate::error::Error;
use crate::provider::digitalocean::DEFAULT_BASE_URL;
use crate::provider::{DigitalOceanProvider, DynProvider, InMemoryProvider};
use crate::validate::validate_domain;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable holding the DigitalOcean API token.
pub const API_TOKEN_ENV: &str = "DO_API_TOKEN";

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// The parent domain subdomains are claimed under, e.g. `sher.dev`.
    pub domain: String,
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    /// Answer CORS preflights for any origin, for when the wizard UI is served elsewhere.
    #[serde(default)]
    pub allow_any_origin: bool,
    pub provider: ProviderConfig,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[allow(clippy::module_name_repetitions)]
pub enum ProviderConfig {
    DigitalOcean {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde_as(as = "DurationSeconds<u64>")]
        #[serde(default = "default_connect_timeout")]
        connect_timeout: Duration,
        #[serde_as(as = "DurationSeconds<u64>")]
        #[serde(default = "default_request_timeout")]
        request_timeout: Duration,
    },
    Memory {
        #[serde(default)]
        domains: Vec<String>,
    },
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Config {
    /// Load and check a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be read, [`Error::InvalidJSON`] if it doesn't hold
    /// a valid config and [`Error::InvalidDomain`] if the parent domain isn't a lowercase domain
    /// name.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.domain_is_valid()?;
        Ok(conf)
    }

    /// Build the DNS provider this config names. The DigitalOcean token is read from the
    /// [`API_TOKEN_ENV`] environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiToken`] if the DigitalOcean provider is configured without a
    /// token in the environment, or [`Error::HttpClient`] if its HTTP client can't be built.
    pub fn provider(&self) -> Result<DynProvider, Error> {
        self.provider_with_token(std::env::var(API_TOKEN_ENV).ok())
    }

    fn provider_with_token(&self, api_token: Option<String>) -> Result<DynProvider, Error> {
        match &self.provider {
            ProviderConfig::DigitalOcean {
                base_url,
                connect_timeout,
                request_timeout,
            } => {
                let api_token = api_token
                    .filter(|t| !t.trim().is_empty())
                    .ok_or(Error::MissingApiToken)?;
                Ok(Arc::new(DigitalOceanProvider::new(
                    base_url,
                    api_token,
                    *connect_timeout,
                    *request_timeout,
                )?))
            }
            ProviderConfig::Memory { domains } => {
                // The parent domain is always served so a memory config needs no domain list.
                let domains = domains
                    .iter()
                    .cloned()
                    .chain(std::iter::once(self.domain.clone()));
                Ok(Arc::new(InMemoryProvider::new(domains)))
            }
        }
    }

    fn domain_is_valid(&self) -> Result<(), Error> {
        if validate_domain(&self.domain) {
            Ok(())
        } else {
            Err(Error::InvalidDomain(self.domain.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DnsProvider;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Config {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn digitalocean_defaults() {
        let config = parse(json!({
            "domain": "sher.dev",
            "api_bind_addr": "127.0.0.1:3001",
            "api_timeout": 15,
            "provider": { "kind": "digitalocean" }
        }));
        assert_eq!(config.api_timeout, Duration::from_secs(15));
        assert!(!config.allow_any_origin);
        match config.provider {
            ProviderConfig::DigitalOcean {
                base_url,
                connect_timeout,
                request_timeout,
            } => {
                assert_eq!(base_url, DEFAULT_BASE_URL);
                assert_eq!(connect_timeout, Duration::from_secs(10));
                assert_eq!(request_timeout, Duration::from_secs(30));
            }
            ProviderConfig::Memory { .. } => panic!("expected digitalocean provider"),
        }
    }

    #[test]
    fn digitalocean_requires_token() {
        let config = parse(json!({
            "domain": "sher.dev",
            "api_bind_addr": "127.0.0.1:3001",
            "api_timeout": 15,
            "provider": { "kind": "digitalocean", "request_timeout": 5 }
        }));
        assert!(matches!(
            config.provider_with_token(None),
            Err(Error::MissingApiToken)
        ));
        assert!(matches!(
            config.provider_with_token(Some("  ".to_string())),
            Err(Error::MissingApiToken)
        ));
        assert!(config
            .provider_with_token(Some("dop_v1_abc".to_string()))
            .is_ok());
    }

    #[tokio::test]
    async fn memory_provider_serves_parent_domain() {
        let config = parse(json!({
            "domain": "sher.dev",
            "api_bind_addr": "127.0.0.1:3001",
            "api_timeout": 15,
            "allow_any_origin": true,
            "provider": { "kind": "memory" }
        }));
        assert!(config.allow_any_origin);
        let provider = config.provider_with_token(None).unwrap();
        assert!(provider.list_records("sher.dev").await.unwrap().is_empty());
        assert_eq!(
            provider
                .list_records("example.com")
                .await
                .unwrap_err()
                .status(),
            Some(404)
        );
    }

    #[test]
    fn loads_example_config() {
        let config =
            Config::try_from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"))
                .unwrap();
        assert_eq!(config.domain, "sher.dev");
        assert_eq!(config.api_bind_addr.port(), 3001);
        assert!(matches!(config.provider, ProviderConfig::DigitalOcean { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::try_from_file("/nonexistent/subclaim.json"),
            Err(Error::IO(_))
        ));
    }

    #[test]
    fn rejects_invalid_domain() {
        let config = parse(json!({
            "domain": "Sher.Dev",
            "api_bind_addr": "127.0.0.1:3001",
            "api_timeout": 15,
            "provider": { "kind": "memory" }
        }));
        assert!(matches!(
            config.domain_is_valid(),
            Err(Error::InvalidDomain(_))
        ));
    }
}
