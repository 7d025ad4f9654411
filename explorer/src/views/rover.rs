use crate::api::SpaceApi;
use crate::models::RoverPhoto;
use crate::resource::{Remote, Slot};
use chrono::NaiveDate;
use indexmap::IndexSet;

pub const DEFAULT_ROVER: &str = "curiosity";

/// Camera filter applied client-side over the last fetched batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CameraFilter {
    #[default]
    All,
    Named(String),
}

/// State behind the rover photo browser.
#[derive(Debug)]
pub struct RoverView {
    earth_date: NaiveDate,
    rover: String,
    camera: CameraFilter,
    photos: Slot<Vec<RoverPhoto>>,
}

impl RoverView {
    pub fn new(earth_date: NaiveDate) -> Self {
        Self {
            earth_date,
            rover: DEFAULT_ROVER.to_string(),
            camera: CameraFilter::All,
            photos: Slot::new(),
        }
    }

    pub fn earth_date(&self) -> NaiveDate {
        self.earth_date
    }

    pub fn set_earth_date(&mut self, earth_date: NaiveDate) {
        self.earth_date = earth_date;
    }

    pub fn set_rover(&mut self, rover: impl Into<String>) {
        self.rover = rover.into();
    }

    /// Changing the filter never refetches; it only narrows what is shown.
    pub fn set_camera(&mut self, camera: CameraFilter) {
        self.camera = camera;
    }

    pub fn photos(&self) -> &Remote<Vec<RoverPhoto>> {
        self.photos.state()
    }

    /// Distinct camera names present in the last batch, in first-seen
    /// order. These are the filter options offered to the user.
    pub fn camera_options(&self) -> IndexSet<&str> {
        self.photos
            .value()
            .map(|photos| photos.iter().map(|p| p.camera.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// The current batch narrowed by the camera filter.
    pub fn visible_photos(&self) -> Vec<&RoverPhoto> {
        let Some(photos) = self.photos.value() else {
            return Vec::new();
        };
        photos
            .iter()
            .filter(|photo| match &self.camera {
                CameraFilter::All => true,
                CameraFilter::Named(name) => &photo.camera.name == name,
            })
            .collect()
    }

    /// Fetches the batch for the current earth date and rover.
    pub async fn refresh(&mut self, api: &(impl SpaceApi + Sync)) -> &Remote<Vec<RoverPhoto>> {
        let token = self.photos.begin();
        let result = api
            .rover_photos(self.earth_date, &self.rover)
            .await
            .map(|batch| batch.photos);
        self.photos.complete(token, result);
        self.photos.state()
    }
}
