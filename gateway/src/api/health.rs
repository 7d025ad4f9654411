use crate::api::{ApiBody, json_response};
use crate::errors::Result;
use chrono::Utc;
use hyper::Response;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    service: &'static str,
}

/// Liveness probe. No upstream call and no credential involved, so it
/// keeps answering when every data route is disabled.
pub fn handle() -> Result<Response<ApiBody>> {
    json_response(&HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        service: "NASA API proxy",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_health_body() {
        let response = handle().unwrap();
        assert_eq!(response.status(), hyper::StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "OK");
        assert_eq!(body["service"], "NASA API proxy");
        assert!(body["timestamp"].is_string());
    }
}
