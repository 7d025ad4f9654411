//! Near-earth-object view: a user-selected date range rendered as a
//! sortable table, plus a trailing 7-day feed aggregated into the activity
//! chart series.

use crate::api::SpaceApi;
use crate::models::{NearEarthObject, NeoFeed};
use crate::resource::{Remote, Slot};
use chrono::{Days, NaiveDate};

/// Client-side ordering of the flattened feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Date-grouped feed order, as the upstream returns it.
    #[default]
    Feed,
    /// Ascending by largest estimated diameter.
    Size,
    /// Hazardous objects first, otherwise stable.
    HazardousFirst,
}

/// One day of the activity chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub count: usize,
    pub largest_size: f64,
}

/// State behind the near-earth-object view.
#[derive(Debug)]
pub struct NeoView {
    start_date: NaiveDate,
    end_date: NaiveDate,
    sort: SortOrder,
    feed: Slot<NeoFeed>,
    week: Slot<NeoFeed>,
}

impl NeoView {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            sort: SortOrder::default(),
            feed: Slot::new(),
            week: Slot::new(),
        }
    }

    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.end_date)
    }

    pub fn set_range(&mut self, start_date: NaiveDate, end_date: NaiveDate) {
        self.start_date = start_date;
        self.end_date = end_date;
    }

    /// Re-sorting is pure; it never refetches.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    pub fn feed(&self) -> &Remote<NeoFeed> {
        self.feed.state()
    }

    pub fn week(&self) -> &Remote<NeoFeed> {
        self.week.state()
    }

    /// Flattened view of the fetched range in the current sort order.
    pub fn sorted_objects(&self) -> Vec<&NearEarthObject> {
        let Some(feed) = self.feed.value() else {
            return Vec::new();
        };
        let mut objects: Vec<&NearEarthObject> =
            feed.near_earth_objects.values().flatten().collect();
        match self.sort {
            SortOrder::Feed => {}
            SortOrder::Size => {
                objects.sort_by(|a, b| a.max_diameter_km().total_cmp(&b.max_diameter_km()));
            }
            SortOrder::HazardousFirst => {
                objects.sort_by_key(|object| !object.is_potentially_hazardous_asteroid);
            }
        }
        objects
    }

    /// Points for the activity chart, one per day of the trailing week.
    pub fn chart_points(&self, today: NaiveDate) -> Vec<ChartPoint> {
        self.week
            .value()
            .map(|feed| chart_series(feed, seven_day_window(today)))
            .unwrap_or_default()
    }

    /// Fetches the user-selected range.
    pub async fn refresh(&mut self, api: &(impl SpaceApi + Sync)) -> &Remote<NeoFeed> {
        let token = self.feed.begin();
        let result = api.neo_feed(self.start_date, self.end_date).await;
        self.feed.complete(token, result);
        self.feed.state()
    }

    /// Fetches the trailing week that feeds the activity chart.
    pub async fn refresh_week(
        &mut self,
        api: &(impl SpaceApi + Sync),
        today: NaiveDate,
    ) -> &Remote<NeoFeed> {
        let (start, end) = seven_day_window(today);
        let token = self.week.begin();
        let result = api.neo_feed(start, end).await;
        self.week.complete(token, result);
        self.week.state()
    }
}

/// The 7-day window ending at `today`, inclusive on both ends.
pub fn seven_day_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Days::new(6), today)
}

/// Per-day aggregates over `window`, one point per day in date order.
/// Days the feed does not mention contribute a zero point.
pub fn chart_series(feed: &NeoFeed, window: (NaiveDate, NaiveDate)) -> Vec<ChartPoint> {
    let (start, end) = window;
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let objects = feed
                .near_earth_objects
                .get(&date)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            ChartPoint {
                date,
                count: objects.len(),
                largest_size: objects
                    .iter()
                    .map(NearEarthObject::max_diameter_km)
                    .fold(0.0, f64::max),
            }
        })
        .collect()
}
