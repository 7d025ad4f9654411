//! Thin proxy in front of the NASA open APIs.
//!
//! The gateway exposes one endpoint per data category under `/api`,
//! validates required parameters before forwarding, attaches the
//! server-held credential to every outbound call, and reshapes upstream
//! failures into the uniform `{error, details}` envelope. Requests are
//! independent; nothing is cached, retried, or persisted.

pub mod api;
pub mod config;
pub mod errors;
pub mod metrics_defs;
pub mod query;
pub mod router;
pub mod service;
pub mod upstream;

#[cfg(test)]
mod testutils;

use crate::errors::GatewayError;

/// Builds the service from its config and serves it until the process
/// exits.
pub async fn run(config: config::Config) -> Result<(), GatewayError> {
    shared::metrics_defs::describe(metrics_defs::ALL_METRICS);

    if config.api_key.is_none() {
        tracing::warn!(
            "{} is not set; data routes are disabled until it is",
            config::API_KEY_VAR
        );
    }

    let service = service::GatewayService::new(&config)?;
    shared::http::run_http_service(&config.listener.host, config.listener.port, service).await
}
