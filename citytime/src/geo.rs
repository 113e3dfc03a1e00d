//! Location resolution

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub mod nominatim;

pub use nominatim::NominatimGeocoder;

/// Upper bound of a single geocoding call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum Error {
    #[error("Geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Malformed coordinate {value:?} in geocoding response")]
    MalformedCoordinate { value: String },
}

/// Point on the globe, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Geocoding backend
///
/// Returns the top ranked match for the query, `Ok(None)` if the backend knows no such place.
/// Disambiguation is entirely up to the backend.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, Error>;
}

/// Resolves free text into a coordinate
///
/// Every failure of the backend - including running out of time - is reported as no location.
/// Causes are only visible in logs.
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self::with_timeout(geocoder, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(geocoder: Arc<dyn Geocoder>, timeout: Duration) -> Self {
        Self { geocoder, timeout }
    }

    /// Coordinate of the best match for `city_name`
    #[instrument(skip(self))]
    pub async fn resolve_location(&self, city_name: &str) -> Option<GeoCoordinate> {
        if city_name.trim().is_empty() {
            return None;
        }

        match tokio::time::timeout(self.timeout, self.geocoder.geocode(city_name)).await {
            Ok(Ok(Some(coord))) => {
                debug!(%coord, "Location found");
                Some(coord)
            }
            Ok(Ok(None)) => {
                debug!("No location found");
                None
            }
            Ok(Err(err)) => {
                warn!(%err, "Geocoding failed");
                None
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Geocoding timed out");
                None
            }
        }
    }
}
