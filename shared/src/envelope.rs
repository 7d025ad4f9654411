use serde::{Deserialize, Serialize};

/// Uniform error body returned by every failing gateway route.
///
/// Produced by the gateway, decoded by the explorer client. Successful
/// responses never use this shape; upstream payloads pass through as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Short category message, stable per endpoint and failure class.
    pub error: String,
    /// Human-readable reason, usually forwarded from the failure itself.
    pub details: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}
