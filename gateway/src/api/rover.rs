use crate::api::{ApiBody, json_passthrough};
use crate::errors::Result;
use crate::query::QueryParams;
use crate::upstream::{EndpointErrors, NasaClient};
use hyper::Response;

pub(crate) const ERRORS: EndpointErrors = EndpointErrors {
    bad_request: "Invalid rover parameters",
    failure: "Failed to fetch rover photos",
    detail_field: "errors",
};

const DEFAULT_ROVER: &str = "curiosity";

/// Sentinel clients send when no camera filter is applied.
const ALL_CAMERAS: &str = "ALL";

/// Mars rover photos for one earth date. The rover name is part of the
/// upstream path; `camera` is forwarded only when it actually narrows the
/// result.
pub async fn handle(client: &NasaClient, query: &QueryParams) -> Result<Response<ApiBody>> {
    let earth_date = query.require("earth_date", "earth_date parameter is required")?;
    let rover = query.get("rover").unwrap_or(DEFAULT_ROVER);

    let mut params = vec![("earth_date", earth_date)];
    if let Some(camera) = query.get("camera")
        && camera != ALL_CAMERAS
    {
        params.push(("camera", camera));
    }

    let path = format!("/mars-photos/api/v1/rovers/{rover}/photos");
    let body = client.get_json(&path, &params, &ERRORS).await?;
    Ok(json_passthrough(body))
}
