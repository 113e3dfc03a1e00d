//! Local time rendering

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::timezone::TimezoneId;

/// `YYYY-MM-DD HH:MM:SS`, 24-hour clock
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Unknown timezone {0}")]
    UnknownTimezone(TimezoneId),
}

/// Civil date and time in some zone, rendered as `YYYY-MM-DD HH:MM:SS`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FormattedTime(String);

impl FormattedTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FormattedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current time in the given zone
pub fn format_current_time(tz: &TimezoneId) -> Result<FormattedTime, Error> {
    format_time_at(tz, Utc::now())
}

/// Time of `instant` in the given zone, with the zone's offset (DST included) at that instant
pub fn format_time_at(tz: &TimezoneId, instant: DateTime<Utc>) -> Result<FormattedTime, Error> {
    let zone: Tz = tz
        .as_str()
        .parse()
        .map_err(|_| Error::UnknownTimezone(tz.clone()))?;

    let local = instant.with_timezone(&zone);
    Ok(FormattedTime(local.format(TIME_FORMAT).to_string()))
}
