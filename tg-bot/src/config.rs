//! Bot configuration

use std::path::PathBuf;
use std::time::Duration;

use citytime::geo::nominatim;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing_subscriber::filter::Directive;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Geocoder timeout has to be positive")]
    ZeroGeocoderTimeout,
}

/// Logging output format
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Logging {
    /// Additional filtering directives
    #[serde(default, deserialize_with = "Logging::deserialize_filters")]
    pub filters: Vec<Directive>,

    /// Logging format
    #[serde(default)]
    pub format: LogFormat,
}

impl Logging {
    fn deserialize_filters<'de, D>(deserializer: D) -> Result<Vec<Directive>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let dirs: Vec<String> = Deserialize::deserialize(deserializer)?;
        dirs.into_iter()
            .map(|dir| dir.parse().map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Geocoding backend configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Geocoder {
    /// Nominatim instance base URL
    pub url: String,

    /// User agent identifying the bot to Nominatim
    pub user_agent: String,

    /// Single lookup time limit, in seconds
    pub timeout_secs: u64,
}

impl Default for Geocoder {
    fn default() -> Self {
        Self {
            url: nominatim::DEFAULT_URL.to_owned(),
            user_agent: nominatim::DEFAULT_USER_AGENT.to_owned(),
            timeout_secs: citytime::geo::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Geocoder {
    pub fn timeout(&self) -> Result<Duration, Error> {
        match self.timeout_secs {
            0 => Err(Error::ZeroGeocoderTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}

/// Top level bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Localized strings file
    #[serde(default = "Config::default_strings")]
    pub strings: PathBuf,

    /// Geocoding configuration
    #[serde(default)]
    pub geocoder: Geocoder,

    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    fn default_strings() -> PathBuf {
        "en_strings.json".into()
    }
}
