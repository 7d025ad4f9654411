use gateway::config::Config as GatewayConfig;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    "skywatch".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. "info" or "gateway=debug".
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommonConfig {
    metrics: Option<MetricsConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    common: CommonConfig,
    pub gateway: GatewayConfig,
}

impl Config {
    /// Loads and validates the config file. The upstream credential comes
    /// from the environment, never from the file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let mut config: Config = serde_yaml::from_reader(file)?;
        config.gateway = config.gateway.with_env_credential();
        config.gateway.validate()?;
        Ok(config)
    }

    pub fn metrics(&self) -> Option<&MetricsConfig> {
        self.common.metrics.as_ref()
    }

    pub fn log_filter(&self) -> Option<&str> {
        self.common
            .logging
            .as_ref()
            .and_then(|logging| logging.filter.as_deref())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    Load(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] gateway::config::ValidationError),
}
