//! Decoding astronomy responses.
//!
//! Two shapes are understood:
//!
//! - **Iso8601**, as served by sunrise-sunset.org with `formatted=0`:
//!   `{"results": {"sunrise": "2024-06-21T04:43:12+00:00", ...}, "status": "OK"}`
//! - **ClockTime**, as served by ipgeolocation.io:
//!   `{"sunrise": "04:43", "sunset": "21:33", ...}` in the local time of the
//!   requested location, with no date attached.

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone};
use serde::Deserialize;

use super::AstronomyRecord;
use crate::error::SunbarError;
use crate::time_source::local_instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSchema {
    Iso8601,
    ClockTime,
}

#[derive(Debug, Deserialize)]
struct Iso8601Response {
    results: Iso8601Results,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Iso8601Results {
    sunrise: DateTime<FixedOffset>,
    sunset: DateTime<FixedOffset>,
}

#[derive(Debug, Deserialize)]
struct ClockTimeResponse {
    sunrise: String,
    sunset: String,
}

/// Decode a response body into today's events, expressed in the zone of `now`.
pub fn parse_response<Tz: TimeZone>(
    body: &[u8],
    schema: ResponseSchema,
    now: &DateTime<Tz>,
) -> Result<AstronomyRecord<Tz>, SunbarError> {
    match schema {
        ResponseSchema::Iso8601 => {
            let response: Iso8601Response = serde_json::from_slice(body)
                .map_err(|e| SunbarError::decode("astronomy response", e))?;
            if let Some(status) = response.status.as_deref()
                && status != "OK"
            {
                return Err(SunbarError::decode(
                    "astronomy response",
                    format!("status {status}"),
                ));
            }

            let zone = now.timezone();
            let record = AstronomyRecord {
                sunrise: response.results.sunrise.with_timezone(&zone),
                sunset: response.results.sunset.with_timezone(&zone),
            };

            // Events for another day would count down to instants that already passed
            let today = now.date_naive();
            if record.sunrise.date_naive() != today || record.sunset.date_naive() != today {
                return Err(SunbarError::decode(
                    "astronomy response",
                    format!(
                        "events dated {} and {}, expected {today}",
                        record.sunrise.date_naive(),
                        record.sunset.date_naive()
                    ),
                ));
            }
            Ok(record)
        }
        ResponseSchema::ClockTime => {
            let response: ClockTimeResponse = serde_json::from_slice(body)
                .map_err(|e| SunbarError::decode("astronomy response", e))?;

            Ok(AstronomyRecord {
                sunrise: parse_clock_time(&response.sunrise, now)?,
                sunset: parse_clock_time(&response.sunset, now)?,
            })
        }
    }
}

/// Turn an "HH:MM" time of day into an instant on the calendar day of `now`.
pub fn parse_clock_time<Tz: TimeZone>(value: &str, now: &DateTime<Tz>) -> Result<DateTime<Tz>, SunbarError> {
    let date_error = |message: String| SunbarError::DateParse {
        value: value.to_string(),
        message,
    };

    let mut parts = value.split(':');
    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return Err(date_error("expected HH:MM".to_string()));
    };
    let hour: u32 = hour
        .parse()
        .map_err(|e| date_error(format!("hour: {e}")))?;
    let minute: u32 = minute
        .parse()
        .map_err(|e| date_error(format!("minute: {e}")))?;

    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| date_error("hour or minute out of range".to_string()))?;

    local_instant(&now.timezone(), now.date_naive(), time)
        .ok_or_else(|| date_error("time does not exist in the local zone".to_string()))
}
