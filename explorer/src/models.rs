//! Typed mirrors of the payloads relayed by the gateway. Pure data: the
//! gateway passes upstream JSON through unchanged, so these shapes follow
//! the upstream API documentation field for field.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Astronomy picture of the day.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Apod {
    pub date: NaiveDate,
    pub title: String,
    pub explanation: String,
    pub url: String,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// Batch of rover photos for one earth date.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RoverPhotos {
    pub photos: Vec<RoverPhoto>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RoverPhoto {
    pub id: u64,
    pub img_src: String,
    pub earth_date: NaiveDate,
    pub camera: RoverCamera,
    pub rover: RoverInfo,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RoverCamera {
    pub name: String,
    pub full_name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RoverInfo {
    pub name: String,
}

/// Near-earth-object feed, keyed by closest-approach date.
///
/// A `BTreeMap` keeps iteration in date order, matching how the feed is
/// consumed everywhere downstream.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NeoFeed {
    #[serde(default)]
    pub element_count: u64,
    pub near_earth_objects: BTreeMap<NaiveDate, Vec<NearEarthObject>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
}

impl NearEarthObject {
    /// Largest estimated diameter, in kilometers.
    pub fn max_diameter_km(&self) -> f64 {
        self.estimated_diameter.kilometers.estimated_diameter_max
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// One EPIC capture record. The PNG itself is fetched separately through
/// the gateway's image relay.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EpicImage {
    pub identifier: String,
    pub caption: String,
    /// Frame name, without extension.
    pub image: String,
    #[serde(deserialize_with = "deserialize_epic_timestamp")]
    pub date: NaiveDateTime,
}

/// Gateway liveness report.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// EPIC reports capture time as `YYYY-MM-DD HH:MM:SS`, without the `T`
/// separator chrono's default impl expects.
fn deserialize_epic_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S").map_err(serde::de::Error::custom)
}
