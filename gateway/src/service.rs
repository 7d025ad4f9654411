//! Hyper service gluing the router, the endpoint handlers, and the error
//! envelope together. The service itself is infallible toward hyper:
//! every `GatewayError` is rendered as its envelope response instead of
//! tearing down the connection.

use crate::api::{self, ApiBody};
use crate::config::Config;
use crate::errors::{GatewayError, Result};
use crate::metrics_defs;
use crate::query::QueryParams;
use crate::router::{self, Endpoint};
use crate::upstream::NasaClient;
use hyper::body::Incoming;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::service::Service;
use hyper::{Method, Request, Response, Uri};
use shared::counter;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub(crate) struct State {
    pub client: NasaClient,
}

#[derive(Clone)]
pub struct GatewayService {
    state: Arc<State>,
}

impl GatewayService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = NasaClient::new(&config.upstream, config.api_key.clone())?;
        Ok(Self {
            state: Arc::new(State { client }),
        })
    }
}

impl Service<Request<Incoming>> for GatewayService {
    type Response = Response<ApiBody>;
    type Error = GatewayError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let state = self.state.clone();
        // All routes are GET with no request body; the method and URI are
        // the whole request as far as dispatch is concerned.
        let method = req.method().clone();
        let uri = req.uri().clone();

        Box::pin(async move { Ok(handle_request(&state, &method, &uri).await) })
    }
}

/// One full request cycle minus the transport: resolve, dispatch, and turn
/// errors into their envelope response.
pub(crate) async fn handle_request(state: &State, method: &Method, uri: &Uri) -> Response<ApiBody> {
    match dispatch(state, method, uri).await {
        Ok(response) => {
            tracing::debug!(%method, path = uri.path(), status = %response.status(), "request served");
            response
        }
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                tracing::error!(%method, path = uri.path(), error = %err, "request failed");
            } else {
                tracing::debug!(%method, path = uri.path(), error = %err, "request rejected");
            }
            error_response(&err)
        }
    }
}

async fn dispatch(state: &State, method: &Method, uri: &Uri) -> Result<Response<ApiBody>> {
    let endpoint =
        router::resolve(method, uri.path()).ok_or_else(|| GatewayError::RouteNotFound {
            method: method.clone(),
            path: uri.path().to_string(),
        })?;
    counter!(metrics_defs::REQUESTS, "endpoint" => endpoint.name()).increment(1);

    let query = QueryParams::parse(uri.query());
    match endpoint {
        Endpoint::Apod => api::apod::handle(&state.client, &query).await,
        Endpoint::Rover => api::rover::handle(&state.client, &query).await,
        Endpoint::Neo => api::neo::handle(&state.client, &query).await,
        Endpoint::Earth => api::earth::handle(&state.client, &query).await,
        Endpoint::EarthImage { date, filename } => {
            api::earth::handle_image(&state.client, &date, &filename).await
        }
        Endpoint::Health => api::health::handle(),
    }
}

fn error_response(err: &GatewayError) -> Response<ApiBody> {
    let status = err.status_code();
    match serde_json::to_vec(&err.envelope()) {
        Ok(buf) => {
            let mut response = Response::new(shared::http::full_body(buf));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(_) => shared::http::make_error_response(status),
    }
}
