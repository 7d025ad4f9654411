use crate::api::{ApiBody, json_passthrough};
use crate::errors::Result;
use crate::query::QueryParams;
use crate::upstream::{EndpointErrors, NasaClient};
use hyper::Response;

pub(crate) const ERRORS: EndpointErrors = EndpointErrors {
    bad_request: "Invalid date or request parameters",
    failure: "Failed to fetch APOD data",
    detail_field: "msg",
};

/// Astronomy picture of the day. `date` is optional and forwarded only
/// when the client sent it; without it the upstream serves today's entry.
pub async fn handle(client: &NasaClient, query: &QueryParams) -> Result<Response<ApiBody>> {
    let mut params = Vec::new();
    if let Some(date) = query.get("date") {
        params.push(("date", date));
    }

    let body = client.get_json("/planetary/apod", &params, &ERRORS).await?;
    Ok(json_passthrough(body))
}
