//! Canned-answer `SpaceApi` and sample payload builders for view tests.

use crate::api::{ApiError, SpaceApi};
use crate::models::{
    Apod, DiameterRange, EpicImage, EstimatedDiameter, Health, NearEarthObject, NeoFeed,
    RoverCamera, RoverInfo, RoverPhoto, RoverPhotos,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock gateway: answers each category with its canned value, or a
/// gateway-style failure when none is set. Counts calls so tests can
/// assert that pure reducers never fetch.
#[derive(Default)]
pub(crate) struct MockApi {
    pub apod: Option<Apod>,
    pub rover: Option<RoverPhotos>,
    pub neo: Option<NeoFeed>,
    pub earth: Option<Vec<EpicImage>>,
    pub calls: AtomicUsize,
}

impl MockApi {
    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer<T: Clone>(&self, value: &Option<T>, failure: &'static str) -> Result<T, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        value.clone().ok_or(ApiError::Gateway {
            status: 500,
            error: failure.to_string(),
            details: "mock has no canned answer".to_string(),
        })
    }
}

#[async_trait]
impl SpaceApi for MockApi {
    async fn apod(&self, _date: Option<NaiveDate>) -> Result<Apod, ApiError> {
        self.answer(&self.apod, "Failed to fetch APOD data")
    }

    async fn rover_photos(
        &self,
        _earth_date: NaiveDate,
        _rover: &str,
    ) -> Result<RoverPhotos, ApiError> {
        self.answer(&self.rover, "Failed to fetch rover photos")
    }

    async fn neo_feed(
        &self,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<NeoFeed, ApiError> {
        self.answer(&self.neo, "Failed to fetch NEO data")
    }

    async fn earth_images(&self, _date: NaiveDate) -> Result<Vec<EpicImage>, ApiError> {
        self.answer(&self.earth, "Failed to fetch Earth imagery")
    }

    async fn health(&self) -> Result<Health, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Health {
            status: "OK".to_string(),
            timestamp: "2025-06-30T00:00:00Z".to_string(),
            service: "mock".to_string(),
        })
    }
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn rover_photo(id: u64, camera_name: &str, camera_full_name: &str) -> RoverPhoto {
    RoverPhoto {
        id,
        img_src: format!("https://example.test/photos/{id}.jpg"),
        earth_date: date(2025, 6, 30),
        camera: RoverCamera {
            name: camera_name.to_string(),
            full_name: camera_full_name.to_string(),
        },
        rover: RoverInfo {
            name: "Curiosity".to_string(),
        },
    }
}

pub(crate) fn neo_object(id: &str, name: &str, max_km: f64, hazardous: bool) -> NearEarthObject {
    NearEarthObject {
        id: id.to_string(),
        name: name.to_string(),
        estimated_diameter: EstimatedDiameter {
            kilometers: DiameterRange {
                estimated_diameter_min: max_km / 2.0,
                estimated_diameter_max: max_km,
            },
        },
        is_potentially_hazardous_asteroid: hazardous,
    }
}
