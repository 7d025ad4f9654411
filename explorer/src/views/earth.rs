use crate::api::{ApiError, GatewayClient, SpaceApi};
use crate::models::EpicImage;
use crate::resource::{Remote, Slot};
use chrono::NaiveDate;
use url::Url;

/// State behind the Earth imagery view.
#[derive(Debug)]
pub struct EarthView {
    date: NaiveDate,
    images: Slot<Vec<EpicImage>>,
}

impl EarthView {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            images: Slot::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn images(&self) -> &Remote<Vec<EpicImage>> {
        self.images.state()
    }

    /// Proxied PNG URL for one fetched frame. Derived from the frame's own
    /// capture date, not the requested date: the archive is keyed by when
    /// the shutter fired.
    pub fn image_url(&self, client: &GatewayClient, image: &EpicImage) -> Result<Url, ApiError> {
        client.earth_image_url(image.date.date(), &image.image)
    }

    /// Fetches the capture records for the current date.
    pub async fn refresh(&mut self, api: &(impl SpaceApi + Sync)) -> &Remote<Vec<EpicImage>> {
        let token = self.images.begin();
        let result = api.earth_images(self.date).await;
        self.images.complete(token, result);
        self.images.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{MockApi, date};
    use chrono::NaiveDateTime;

    fn sample_image() -> EpicImage {
        EpicImage {
            identifier: "20250630003633".to_string(),
            caption: "This image was taken by NASA's EPIC camera".to_string(),
            image: "epic_1b_20250630003633".to_string(),
            date: NaiveDateTime::parse_from_str("2025-06-30 00:31:45", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_refresh_stores_records() {
        let api = MockApi {
            earth: Some(vec![sample_image()]),
            ..MockApi::default()
        };
        let mut view = EarthView::new(date(2025, 6, 30));
        view.refresh(&api).await;

        let images = view.images().value().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].image, "epic_1b_20250630003633");
    }

    #[tokio::test]
    async fn test_image_url_uses_capture_date_segments() {
        let api = MockApi {
            earth: Some(vec![sample_image()]),
            ..MockApi::default()
        };
        let client = GatewayClient::new(Url::parse("http://127.0.0.1:5000").unwrap());
        let mut view = EarthView::new(date(2025, 6, 30));
        view.refresh(&api).await;

        let images = view.images().value().unwrap().clone();
        let url = view.image_url(&client, &images[0]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/api/earth/image/2025-06-30/epic_1b_20250630003633"
        );
    }
}
