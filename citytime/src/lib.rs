//! City local time resolution
//!
//! Turns a city name into the current wall-clock time of the zone it lies in, and drives the
//! per-chat conversation around it. Transport independent - the chat platform glue lives in the
//! bot binary.

pub mod clock;
pub mod conversation;
pub mod geo;
pub mod session;
pub mod strings;
pub mod timezone;

pub use clock::FormattedTime;
pub use conversation::{Conversation, Inbound};
pub use geo::{GeoCoordinate, Geocoder, LocationResolver};
pub use session::{SessionId, Sessions, State};
pub use strings::Strings;
pub use timezone::{TimezoneId, TimezoneLookup, TimezoneResolver};
