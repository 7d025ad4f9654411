//! Client for the gateway's `/api` surface.
//!
//! The trait seam exists so view models can be driven by a mock in tests;
//! `GatewayClient` is the real reqwest-backed implementation. Failures are
//! never retried here; a retry is the caller re-issuing the identical
//! request.

use crate::models::{Apod, EpicImage, Health, NeoFeed, RoverPhotos};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use shared::envelope::ErrorEnvelope;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The gateway answered with its error envelope.
    #[error("{error}: {details}")]
    Gateway {
        status: u16,
        error: String,
        details: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid gateway URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// One operation per data category, mirroring the gateway surface.
#[async_trait]
pub trait SpaceApi {
    async fn apod(&self, date: Option<NaiveDate>) -> Result<Apod, ApiError>;

    async fn rover_photos(
        &self,
        earth_date: NaiveDate,
        rover: &str,
    ) -> Result<RoverPhotos, ApiError>;

    async fn neo_feed(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<NeoFeed, ApiError>;

    async fn earth_images(&self, date: NaiveDate) -> Result<Vec<EpicImage>, ApiError>;

    async fn health(&self) -> Result<Health, ApiError>;
}

/// Reqwest-backed client talking to a running gateway. The upstream
/// credential lives on the gateway side only; nothing here ever sees it.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GatewayClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// URL of the proxied PNG for one EPIC frame. The gateway expects the
    /// capture date and frame name as path segments.
    pub fn earth_image_url(&self, date: NaiveDate, filename: &str) -> Result<Url, ApiError> {
        Ok(self
            .base_url
            .join(&format!("/api/earth/image/{date}/{filename}"))?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.base_url.join(path)?;
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let envelope = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope,
            Err(err) => ErrorEnvelope::new("unexpected gateway response", err.to_string()),
        };
        Err(ApiError::Gateway {
            status: status.as_u16(),
            error: envelope.error,
            details: envelope.details,
        })
    }
}

#[async_trait]
impl SpaceApi for GatewayClient {
    async fn apod(&self, date: Option<NaiveDate>) -> Result<Apod, ApiError> {
        let mut query = Vec::new();
        if let Some(date) = date {
            query.push(("date", date.to_string()));
        }
        self.get_json("/api/apod", &query).await
    }

    async fn rover_photos(
        &self,
        earth_date: NaiveDate,
        rover: &str,
    ) -> Result<RoverPhotos, ApiError> {
        let query = [
            ("earth_date", earth_date.to_string()),
            ("rover", rover.to_string()),
        ];
        self.get_json("/api/rover", &query).await
    }

    async fn neo_feed(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<NeoFeed, ApiError> {
        let query = [
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ];
        self.get_json("/api/neo", &query).await
    }

    async fn earth_images(&self, date: NaiveDate) -> Result<Vec<EpicImage>, ApiError> {
        let query = [("date", date.to_string())];
        self.get_json("/api/earth", &query).await
    }

    async fn health(&self) -> Result<Health, ApiError> {
        self.get_json("/api/health", &[]).await
    }
}
