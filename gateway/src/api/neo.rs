use crate::api::{ApiBody, json_passthrough};
use crate::errors::Result;
use crate::query::QueryParams;
use crate::upstream::{EndpointErrors, NasaClient};
use hyper::Response;

pub(crate) const ERRORS: EndpointErrors = EndpointErrors {
    bad_request: "Invalid date range or request parameters",
    failure: "Failed to fetch NEO data",
    detail_field: "error_message",
};

const RANGE_DETAILS: &str = "Both start_date and end_date parameters are required";

/// Near-earth-object feed for a date range; both bounds are required.
pub async fn handle(client: &NasaClient, query: &QueryParams) -> Result<Response<ApiBody>> {
    let start_date = query.require("start_date", RANGE_DETAILS)?;
    let end_date = query.require("end_date", RANGE_DETAILS)?;

    let params = [("start_date", start_date), ("end_date", end_date)];
    let body = client.get_json("/neo/rest/v1/feed", &params, &ERRORS).await?;
    Ok(json_passthrough(body))
}
