//! Error types.

use crate::provider::ProviderError;

/// Error enumerates the possible subclaim error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a request fails the [label or IPv4 grammars][crate::validate]. Requests
    /// that fail validation never reach the DNS provider.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Returned when the DNS provider answers HTTP 404 because the parent domain has not been
    /// added to the provider account.
    #[error("domain {0} is not configured with the DNS provider")]
    DomainNotConfigured(String),

    /// Returned when the DNS provider answers HTTP 422 to a record creation, either because the
    /// record already exists or because the provider rejected the record data.
    #[error("record already exists or invalid data provided")]
    RecordConflict,

    /// Returned for any other DNS provider failure: authentication, transport, timeouts and
    /// server errors. The provider detail is kept as the error source and is not part of the
    /// message shown to API clients.
    #[error("failed to {action}, please try again")]
    Upstream {
        action: &'static str,
        #[source]
        source: ProviderError,
    },

    /// Returned when [`Config::domain`][`crate::config::Config::domain`] is not a lowercase
    /// sequence of valid DNS labels.
    #[error("parent domain \"{0}\" is not a valid lowercase domain name")]
    InvalidDomain(String),

    /// Returned when the DigitalOcean provider is configured but the API token environment
    /// variable is unset or empty.
    #[error("the {} environment variable must be set", crate::config::API_TOKEN_ENV)]
    MissingApiToken,

    /// Returned when the provider HTTP client can't be constructed.
    #[error("HTTP client error")]
    HttpClient(#[from] reqwest::Error),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file] fails due
    /// to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}

/// Reasons a request is rejected before any DNS provider call is made.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum ValidationError {
    #[error("subdomain is required")]
    SubdomainRequired,
    #[error("all fields are required")]
    FieldsRequired,
    #[error("invalid subdomain format; use only lowercase letters, numbers and hyphens")]
    InvalidSubdomain,
    #[error("invalid IPv4 address format")]
    InvalidIPv4,
}
