use hyper::Method;

/// Endpoints exposed under the `/api` prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Apod,
    Rover,
    Neo,
    Earth,
    /// Image relay with the capture date and frame name as path segments.
    EarthImage { date: String, filename: String },
    Health,
}

impl Endpoint {
    /// Stable name used as the metric tag for this endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Apod => "apod",
            Endpoint::Rover => "rover",
            Endpoint::Neo => "neo",
            Endpoint::Earth => "earth",
            Endpoint::EarthImage { .. } => "earth_image",
            Endpoint::Health => "health",
        }
    }
}

/// Resolves a request line against the endpoint table. The surface is GET
/// only; anything unresolved is the caller's 404.
pub fn resolve(method: &Method, path: &str) -> Option<Endpoint> {
    if method != Method::GET {
        return None;
    }

    match path {
        "/api/apod" => Some(Endpoint::Apod),
        "/api/rover" => Some(Endpoint::Rover),
        "/api/neo" => Some(Endpoint::Neo),
        "/api/earth" => Some(Endpoint::Earth),
        "/api/health" => Some(Endpoint::Health),
        _ => resolve_earth_image(path),
    }
}

/// Matches `/api/earth/image/{date}/{filename}` with exactly two trailing
/// segments, both non-empty.
fn resolve_earth_image(path: &str) -> Option<Endpoint> {
    let rest = path.strip_prefix("/api/earth/image/")?;
    let (date, filename) = rest.split_once('/')?;
    if date.is_empty() || filename.is_empty() || filename.contains('/') {
        return None;
    }
    Some(Endpoint::EarthImage {
        date: date.to_string(),
        filename: filename.to_string(),
    })
}
