//! One module per relayed endpoint. Each handler validates its query
//! parameters, builds the upstream request, and returns the upstream body
//! unmodified; error shaping happens in `upstream` and `errors`.

pub mod apod;
pub mod earth;
pub mod health;
pub mod neo;
pub mod rover;

use crate::errors::{GatewayError, Result};
use http_body_util::combinators::BoxBody;
use hyper::Response;
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;

/// Response body shared by every handler: fully materialized JSON for the
/// data routes, a live upstream stream for the image relay.
pub type ApiBody = BoxBody<Bytes, GatewayError>;

/// Wraps an upstream JSON body unchanged.
pub(crate) fn json_passthrough(bytes: Bytes) -> Response<ApiBody> {
    let mut response = Response::new(shared::http::full_body(bytes));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Serializes a locally produced value as a JSON response.
pub(crate) fn json_response<T: Serialize>(value: &T) -> Result<Response<ApiBody>> {
    let buf = serde_json::to_vec(value)?;
    Ok(json_passthrough(Bytes::from(buf)))
}
