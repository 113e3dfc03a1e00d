//! Localized texts

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot read strings file {path}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid strings table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Strings table, a JSON object keyed by message name
///
/// Keys not used by the bot are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Strings {
    /// Greeting sent on the entry command
    pub welcome_message: String,
}

impl Strings {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Loads strings table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;

        Self::from_json(&json)
    }
}
