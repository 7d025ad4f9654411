use crate::api::{ApiError, SpaceApi};
use crate::models::Apod;
use crate::resource::{Remote, RequestToken, Slot};
use chrono::NaiveDate;

/// State behind the picture-of-the-day view.
#[derive(Debug, Default)]
pub struct ApodView {
    date: Option<NaiveDate>,
    picture: Slot<Apod>,
}

impl ApodView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Picking a date never fetches by itself; the caller decides when to
    /// refresh.
    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    pub fn picture(&self) -> &Remote<Apod> {
        self.picture.state()
    }

    /// Marks the view loading and hands out the token the eventual result
    /// must present. For callers that run the fetch themselves instead of
    /// going through `refresh`.
    pub fn begin_fetch(&mut self) -> RequestToken {
        self.picture.begin()
    }

    /// Applies a finished fetch; results of superseded fetches are dropped.
    pub fn finish_fetch(&mut self, token: RequestToken, result: Result<Apod, ApiError>) -> bool {
        self.picture.complete(token, result)
    }

    /// Start-to-finish fetch against `api`.
    pub async fn refresh(&mut self, api: &(impl SpaceApi + Sync)) -> &Remote<Apod> {
        let token = self.begin_fetch();
        let result = api.apod(self.date).await;
        self.finish_fetch(token, result);
        self.picture.state()
    }
}
