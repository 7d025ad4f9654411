//! Earth imagery: the daily EPIC record listing, plus a streaming relay
//! for the archived frames themselves.

use crate::api::{ApiBody, json_passthrough};
use crate::errors::{GatewayError, Result};
use crate::query::QueryParams;
use crate::upstream::{EndpointErrors, NasaClient};
use futures_util::TryStreamExt;
use http_body_util::{BodyExt, StreamBody};
use hyper::Response;
use hyper::body::Frame;
use hyper::header::CONTENT_TYPE;

pub(crate) const ERRORS: EndpointErrors = EndpointErrors {
    bad_request: "Invalid date or no images available",
    failure: "Failed to fetch Earth imagery",
    detail_field: "msg",
};

pub(crate) const IMAGE_FAILURE: &str = "Failed to fetch Earth image";

/// EPIC records for one capture date.
pub async fn handle(client: &NasaClient, query: &QueryParams) -> Result<Response<ApiBody>> {
    let date = query.require("date", "date parameter is required")?;

    let path = format!("/EPIC/api/natural/date/{date}");
    let body = client.get_json(&path, &[], &ERRORS).await?;
    Ok(json_passthrough(body))
}

/// Relays one archived frame, piping bytes through as they arrive and
/// keeping the upstream content type. Backpressure on either connection
/// is the only bound.
pub async fn handle_image(
    client: &NasaClient,
    date: &str,
    filename: &str,
) -> Result<Response<ApiBody>> {
    let upstream = client
        .get_image(&archive_path(date, filename), IMAGE_FAILURE)
        .await?;
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();

    let frames = upstream
        .bytes_stream()
        .map_ok(Frame::data)
        .map_err(|err| GatewayError::UpstreamFailure {
            message: IMAGE_FAILURE,
            details: err.to_string(),
        });

    let mut response = Response::new(StreamBody::new(frames).boxed());
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(response)
}

/// `YYYY-MM-DD` in the route becomes `YYYY/MM/DD` in the archive path.
fn archive_path(date: &str, filename: &str) -> String {
    let segmented = date.replace('-', "/");
    format!("/EPIC/archive/natural/{segmented}/png/{filename}.png")
}
