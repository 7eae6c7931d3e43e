//! Sunrise and sunset data: what the providers return and how it is read back.
//!
//! ## Module Structure
//!
//! - [`schema`]: decoding the two response shapes into an [`AstronomyRecord`]
//! - [`provider`]: building requests for each provider, or computing the
//!   response locally for the offline `solar` provider

pub mod provider;
pub mod schema;

use chrono::{DateTime, TimeZone};

pub use provider::fetch;
pub use schema::{ResponseSchema, parse_clock_time, parse_response};

/// Today's sunrise and sunset in the zone of the caller's clock.
#[derive(Debug, Clone, PartialEq)]
pub struct AstronomyRecord<Tz: TimeZone> {
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
}
