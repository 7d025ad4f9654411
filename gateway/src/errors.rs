use http::StatusCode;
use hyper::Method;
use shared::envelope::ErrorEnvelope;
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

/// Everything that can fail while serving a gateway request.
///
/// Each variant maps to exactly one HTTP status and one client-facing
/// envelope; `status_code` and `envelope` are the only places that mapping
/// lives.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A required query parameter was textually absent from the request.
    #[error("missing required parameter: {details}")]
    MissingParameter { details: String },

    /// The upstream API rejected the request as malformed.
    #[error("{message}: {details}")]
    UpstreamBadRequest {
        message: &'static str,
        details: String,
    },

    /// No upstream credential is configured; every data route is disabled.
    #[error("NASA API key not configured")]
    MissingApiKey,

    /// The upstream call failed: network error, timeout, or a status the
    /// normalizer does not special-case.
    #[error("{message}: {details}")]
    UpstreamFailure {
        message: &'static str,
        details: String,
    },

    #[error("no endpoint for {method} {path}")]
    RouteNotFound { method: Method, path: String },

    #[error("failed to encode response: {0}")]
    ResponseEncode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameter { .. } | GatewayError::UpstreamBadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::MissingApiKey
            | GatewayError::UpstreamFailure { .. }
            | GatewayError::ResponseEncode(_)
            | GatewayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `{error, details}` body this failure renders as.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            GatewayError::MissingParameter { details } => {
                ErrorEnvelope::new("Missing required parameter", details.clone())
            }
            GatewayError::UpstreamBadRequest { message, details } => {
                ErrorEnvelope::new(*message, details.clone())
            }
            GatewayError::MissingApiKey => ErrorEnvelope::new(
                "NASA API key not configured",
                "Set NASA_API_KEY in the environment",
            ),
            GatewayError::UpstreamFailure { message, details } => {
                ErrorEnvelope::new(*message, details.clone())
            }
            GatewayError::RouteNotFound { method, path } => ErrorEnvelope::new(
                "API endpoint not found",
                format!("{method} {path} is not a valid endpoint"),
            ),
            GatewayError::ResponseEncode(err) => {
                ErrorEnvelope::new("Internal server error", err.to_string())
            }
            GatewayError::Io(err) => ErrorEnvelope::new("Internal server error", err.to_string()),
        }
    }
}
