//! Test-only stand-in for the upstream API.

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::CONTENT_TYPE;
use hyper::service::service_fn;
use hyper::{Request, Response, Uri};
use hyper_util::rt::{TokioExecutor, TokioIo};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone)]
struct Canned {
    status: u16,
    content_type: &'static str,
    body: Bytes,
}

/// A real local HTTP server answering every request with one canned
/// response. Counts hits and records request URIs so tests can assert on
/// forwarded parameters, or on the absence of any call at all.
pub(crate) struct MockUpstream {
    base_url: Url,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Uri>>>,
}

impl MockUpstream {
    pub(crate) async fn json(status: u16, body: &str) -> Self {
        Self::start(Canned {
            status,
            content_type: "application/json",
            body: Bytes::copy_from_slice(body.as_bytes()),
        })
        .await
    }

    pub(crate) async fn with_content_type(
        status: u16,
        content_type: &'static str,
        body: &[u8],
    ) -> Self {
        Self::start(Canned {
            status,
            content_type,
            body: Bytes::copy_from_slice(body),
        })
        .await
    }

    async fn start(canned: Canned) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let port = listener.local_addr().expect("mock local addr").port();

        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let accept_hits = hits.clone();
        let accept_requests = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);
                let hits = accept_hits.clone();
                let requests = accept_requests.clone();
                let canned = canned.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        hits.fetch_add(1, Ordering::SeqCst);
                        requests.lock().unwrap().push(req.uri().clone());
                        let canned = canned.clone();
                        async move {
                            Ok::<_, Infallible>(
                                Response::builder()
                                    .status(canned.status)
                                    .header(CONTENT_TYPE, canned.content_type)
                                    .body(Full::new(canned.body))
                                    .unwrap(),
                            )
                        }
                    });
                    let _ = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                        .serve_connection(io, service)
                        .await;
                });
            }
        });

        let base_url =
            Url::parse(&format!("http://127.0.0.1:{port}")).expect("mock upstream URL");
        Self {
            base_url,
            hits,
            requests,
        }
    }

    pub(crate) fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Number of requests the mock has answered.
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// URIs of every request seen so far, in arrival order.
    pub(crate) fn requests(&self) -> Vec<Uri> {
        self.requests.lock().unwrap().clone()
    }
}
