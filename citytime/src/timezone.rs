//! Coordinate to time zone mapping

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::geo::GeoCoordinate;

/// IANA time zone identifier, eg. `Europe/Paris`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimezoneId(String);

impl TimezoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TimezoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of time zone boundaries
pub trait TimezoneLookup: Send + Sync {
    /// Zone containing the coordinate, `None` outside of every known zone
    fn timezone_at(&self, coord: GeoCoordinate) -> Option<TimezoneId>;
}

/// Lookup in the zone polygons bundled with `tzf-rs`
///
/// Building the finder decompresses the whole boundary data set, so it should happen once per
/// process.
pub struct PolygonLookup {
    finder: tzf_rs::DefaultFinder,
}

impl PolygonLookup {
    pub fn new() -> Self {
        Self {
            finder: tzf_rs::DefaultFinder::new(),
        }
    }
}

impl Default for PolygonLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneLookup for PolygonLookup {
    fn timezone_at(&self, coord: GeoCoordinate) -> Option<TimezoneId> {
        let name = self.finder.get_tz_name(coord.longitude, coord.latitude);
        (!name.is_empty()).then(|| TimezoneId::new(name))
    }
}

/// Resolves coordinates into zones
///
/// Coordinates are expected to come from the location resolver, so their range is not checked.
/// Nothing is cached - every call hits the lookup.
#[derive(Clone)]
pub struct TimezoneResolver {
    lookup: Arc<dyn TimezoneLookup>,
}

impl TimezoneResolver {
    pub fn new(lookup: Arc<dyn TimezoneLookup>) -> Self {
        Self { lookup }
    }

    #[instrument(skip(self))]
    pub fn resolve_timezone(&self, coord: GeoCoordinate) -> Option<TimezoneId> {
        let tz = self.lookup.timezone_at(coord);
        debug!(?tz, "Timezone lookup finished");
        tz
    }
}
