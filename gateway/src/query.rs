use crate::errors::{GatewayError, Result};
use std::collections::HashMap;

/// Decoded query string of an incoming request.
///
/// Presence is textual: a key that appears with an empty value is still
/// present; only a key that never appears is missing. Validation rejects
/// nothing beyond absence; a nonsense value is the upstream's to refuse.
#[derive(Debug, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let params = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self { params }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns the parameter, or fails the request with a 400 carrying
    /// `details` as the envelope's details line.
    pub fn require(&self, name: &str, details: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| GatewayError::MissingParameter {
            details: details.to_string(),
        })
    }
}
