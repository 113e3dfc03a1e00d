//! OpenStreetMap Nominatim geocoding

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{Error, GeoCoordinate, Geocoder};

/// Public Nominatim instance
pub const DEFAULT_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim usage policy requires identifying the application
pub const DEFAULT_USER_AGENT: &str = "timezone_bot";

/// Geocoder backed by the Nominatim `/search` endpoint
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

impl NominatimGeocoder {
    /// Creates geocoder talking to the Nominatim instance at `url`
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, Error> {
        let url = format!("{}/search", self.url.trim_end_matches('/'));

        let places: Vec<Place> = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        places.into_iter().next().map(Place::coordinate).transpose()
    }
}

/// Single search hit. Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Place {
    fn coordinate(self) -> Result<GeoCoordinate, Error> {
        let parse = |value: String| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::MalformedCoordinate { value })
        };

        Ok(GeoCoordinate::new(parse(self.lat)?, parse(self.lon)?))
    }
}
