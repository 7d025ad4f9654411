use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";

/// Environment variable holding the upstream credential.
pub const API_KEY_VAR: &str = "NASA_API_KEY";

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("Upstream timeout cannot be 0")]
    InvalidTimeout,

    #[error("Upstream base URL must be http or https, got: {0}")]
    InvalidUpstreamScheme(String),
}

/// Gateway configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Listener for incoming API requests
    pub listener: Listener,
    /// Upstream API the gateway relays to
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Server-held upstream credential. Never read from the config file;
    /// merged from the environment once at load time. Absence keeps the
    /// health route serving and fails every data route.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Config {
    /// Validates the gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;
        self.upstream.validate()?;
        Ok(())
    }

    /// Reads the credential from the `NASA_API_KEY` environment variable.
    pub fn with_env_credential(self) -> Self {
        let key = std::env::var(API_KEY_VAR).ok();
        self.with_credential(key)
    }

    /// Installs the credential; an empty string counts as unset.
    pub fn with_credential(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Listener {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

/// Upstream API configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API
    ///
    /// Note: Uses the `url::Url` type so an invalid URL is rejected during
    /// config deserialization rather than on the first relayed request.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Whole-request timeout for relayed calls, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        match self.base_url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ValidationError::InvalidUpstreamScheme(other.to_string())),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> Url {
    // Statically valid literal.
    Url::parse(DEFAULT_BASE_URL).expect("default upstream URL parses")
}

fn default_timeout_secs() -> u64 {
    30
}
