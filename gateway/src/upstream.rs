//! Outbound relay to the upstream API.
//!
//! `NasaClient` is the only place the credential lives and the only place
//! upstream failures are turned into the client-facing taxonomy: 400s keep
//! their status with details lifted out of the upstream error body, and
//! everything else collapses to a category-specific 500.

use crate::config::UpstreamConfig;
use crate::errors::{GatewayError, Result};
use crate::metrics_defs;
use hyper::body::Bytes;
use reqwest::StatusCode;
use shared::counter;
use std::time::Duration;
use url::Url;

/// Client-facing vocabulary for one upstream endpoint: the 400 and 500
/// envelope messages, and the field of the upstream error body that holds
/// a human-readable reason.
#[derive(Clone, Copy, Debug)]
pub struct EndpointErrors {
    pub bad_request: &'static str,
    pub failure: &'static str,
    pub detail_field: &'static str,
}

/// HTTP client for the upstream API.
///
/// Holds the server-side credential; every data call attaches it, and a
/// missing credential fails before any network I/O.
#[derive(Clone)]
pub struct NasaClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl NasaClient {
    pub fn new(config: &UpstreamConfig, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| GatewayError::UpstreamFailure {
                message: "Failed to build upstream client",
                details: err.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    fn credential(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)
    }

    fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| GatewayError::UpstreamFailure {
                message: "Invalid upstream URL",
                details: err.to_string(),
            })
    }

    /// Relays a GET and passes the upstream JSON body through unchanged.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        errors: &EndpointErrors,
    ) -> Result<Bytes> {
        let api_key = self.credential()?;
        let url = self.endpoint_url(path)?;

        counter!(metrics_defs::UPSTREAM_REQUESTS).increment(1);
        let response = self
            .http
            .get(url)
            .query(&[("api_key", api_key)])
            .query(query)
            .send()
            .await
            .map_err(|err| self.transport_failure(errors.failure, err))?;

        let status = response.status();
        if status.is_success() {
            return response
                .bytes()
                .await
                .map_err(|err| self.transport_failure(errors.failure, err));
        }

        if status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamBadRequest {
                message: errors.bad_request,
                details: extract_detail(&body, errors.detail_field),
            });
        }

        counter!(metrics_defs::UPSTREAM_FAILURES).increment(1);
        Err(GatewayError::UpstreamFailure {
            message: errors.failure,
            details: format!("unexpected upstream status {status}"),
        })
    }

    /// Fetches a binary resource and hands back the live response so the
    /// caller can stream its bytes. Unlike `get_json`, every failure here
    /// is a 500 with the given message; the image archive has no error
    /// body worth forwarding.
    pub async fn get_image(&self, path: &str, failure: &'static str) -> Result<reqwest::Response> {
        let api_key = self.credential()?;
        let url = self.endpoint_url(path)?;

        counter!(metrics_defs::UPSTREAM_REQUESTS).increment(1);
        let response = self
            .http
            .get(url)
            .query(&[("api_key", api_key)])
            .send()
            .await
            .map_err(|err| self.transport_failure(failure, err))?;

        let status = response.status();
        if !status.is_success() {
            counter!(metrics_defs::UPSTREAM_FAILURES).increment(1);
            return Err(GatewayError::UpstreamFailure {
                message: failure,
                details: format!("unexpected upstream status {status}"),
            });
        }
        Ok(response)
    }

    fn transport_failure(&self, message: &'static str, err: reqwest::Error) -> GatewayError {
        counter!(metrics_defs::UPSTREAM_FAILURES).increment(1);
        GatewayError::UpstreamFailure {
            message,
            details: err.to_string(),
        }
    }
}

/// Pulls the named field out of an upstream error body, falling back to
/// the raw text when the body is not JSON or the field is absent.
fn extract_detail(body: &str, field: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get(field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::MockUpstream;

    const ERRORS: EndpointErrors = EndpointErrors {
        bad_request: "Invalid date or request parameters",
        failure: "Failed to fetch APOD data",
        detail_field: "msg",
    };

    fn client_for(mock: &MockUpstream, api_key: Option<&str>) -> NasaClient {
        let config = UpstreamConfig {
            base_url: mock.base_url(),
            timeout_secs: 5,
        };
        NasaClient::new(&config, api_key.map(String::from)).unwrap()
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"msg":"Date must not be in the future"}"#, "msg"),
            "Date must not be in the future"
        );
        // Non-string fields are forwarded as JSON text
        assert_eq!(
            extract_detail(r#"{"errors":["bad camera"]}"#, "errors"),
            r#"["bad camera"]"#
        );
        // Missing field and non-JSON bodies fall back to the raw text
        assert_eq!(extract_detail(r#"{"other":1}"#, "msg"), r#"{"other":1}"#);
        assert_eq!(extract_detail("plain failure", "msg"), "plain failure");
    }

    #[tokio::test]
    async fn test_get_json_attaches_credential_and_passes_body_through() {
        let mock = MockUpstream::json(200, r#"{"title":"Pillars of Creation"}"#).await;
        let client = client_for(&mock, Some("DEMO_KEY"));

        let body = client
            .get_json("/planetary/apod", &[("date", "2025-06-30")], &ERRORS)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), br#"{"title":"Pillars of Creation"}"#);

        let seen = mock.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path(), "/planetary/apod");
        let query = seen[0].query().unwrap();
        assert!(query.contains("api_key=DEMO_KEY"));
        assert!(query.contains("date=2025-06-30"));
    }

    #[tokio::test]
    async fn test_get_json_without_credential_makes_no_call() {
        let mock = MockUpstream::json(200, "{}").await;
        let client = client_for(&mock, None);

        let err = client.get_json("/planetary/apod", &[], &ERRORS).await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey));
        assert_eq!(mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_get_json_maps_upstream_400() {
        let mock = MockUpstream::json(400, r#"{"code":400,"msg":"Date must be between Jun 16, 1995 and today"}"#).await;
        let client = client_for(&mock, Some("DEMO_KEY"));

        let err = client.get_json("/planetary/apod", &[], &ERRORS).await.unwrap_err();
        match err {
            GatewayError::UpstreamBadRequest { message, details } => {
                assert_eq!(message, "Invalid date or request parameters");
                assert_eq!(details, "Date must be between Jun 16, 1995 and today");
            }
            other => panic!("expected UpstreamBadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_json_maps_other_statuses_to_failure() {
        let mock = MockUpstream::json(503, "busy").await;
        let client = client_for(&mock, Some("DEMO_KEY"));

        let err = client.get_json("/planetary/apod", &[], &ERRORS).await.unwrap_err();
        match err {
            GatewayError::UpstreamFailure { message, details } => {
                assert_eq!(message, "Failed to fetch APOD data");
                assert!(details.contains("503"));
            }
            other => panic!("expected UpstreamFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_image_rejects_non_success() {
        let mock = MockUpstream::json(404, "not found").await;
        let client = client_for(&mock, Some("DEMO_KEY"));

        let err = client
            .get_image("/EPIC/archive/natural/2025/06/30/png/frame.png", "Failed to fetch Earth image")
            .await
            .unwrap_err();
        match err {
            GatewayError::UpstreamFailure { message, .. } => {
                assert_eq!(message, "Failed to fetch Earth image");
            }
            other => panic!("expected UpstreamFailure, got {other:?}"),
        }
    }
}
