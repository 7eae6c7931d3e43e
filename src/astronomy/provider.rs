//! Fetching fresh astronomy data for a location.

use chrono::{DateTime, NaiveDate, TimeZone};

use super::ResponseSchema;
use crate::config::Provider;
use crate::error::SunbarError;
use crate::geo::Coordinates;
use crate::http::Fetcher;

pub const SUNRISE_SUNSET_URL: &str = "https://api.sunrise-sunset.org/json";
pub const IPGEOLOCATION_URL: &str = "https://api.ipgeolocation.io/astronomy";

impl Provider {
    /// Shape of the bodies this provider produces.
    pub fn schema(&self) -> ResponseSchema {
        match self {
            Provider::SunriseSunset | Provider::Solar => ResponseSchema::Iso8601,
            Provider::Ipgeolocation => ResponseSchema::ClockTime,
        }
    }
}

/// Endpoint and query parameters for a provider, or `None` for `solar`.
///
/// sunrise-sunset.org answers for its own UTC date unless told otherwise, so the
/// request names the local calendar day explicitly.
pub fn request_for(
    provider: Provider,
    coordinates: Coordinates,
    api_key: Option<&str>,
    date: NaiveDate,
) -> Option<(&'static str, Vec<(String, String)>)> {
    let (lat, long) = coordinates.query_values();
    match provider {
        Provider::SunriseSunset => Some((
            SUNRISE_SUNSET_URL,
            vec![
                ("lat".to_string(), lat),
                ("lng".to_string(), long),
                ("date".to_string(), date.format("%Y-%m-%d").to_string()),
                ("formatted".to_string(), "0".to_string()),
            ],
        )),
        Provider::Ipgeolocation => Some((
            IPGEOLOCATION_URL,
            vec![
                ("apiKey".to_string(), api_key.unwrap_or_default().to_string()),
                ("lat".to_string(), lat),
                ("long".to_string(), long),
            ],
        )),
        Provider::Solar => None,
    }
}

/// Obtain a raw response body for today at `coordinates`.
///
/// The body is what gets cached, so the `solar` provider renders its
/// computed times in the sunrise-sunset.org shape.
pub fn fetch<Tz: TimeZone>(
    provider: Provider,
    coordinates: Coordinates,
    api_key: Option<&str>,
    fetcher: &dyn Fetcher,
    now: &DateTime<Tz>,
) -> Result<Vec<u8>, SunbarError> {
    let Some((url, query)) = request_for(provider, coordinates, api_key, now.date_naive()) else {
        log_decorated!("Computing sunrise and sunset locally");
        return solar_body(coordinates, now);
    };

    log_decorated!("Requesting astronomy data from {url}");
    let response = fetcher.get(url, &query)?;
    if !response.is_ok() {
        return Err(SunbarError::UpstreamHttp {
            url: url.to_string(),
            status: response.status,
            body: response.body_text(),
        });
    }
    log_indented!("Received {} bytes", response.body.len());

    Ok(response.body)
}

/// Compute today's events with the `sunrise` crate.
pub fn solar_body<Tz: TimeZone>(coordinates: Coordinates, now: &DateTime<Tz>) -> Result<Vec<u8>, SunbarError> {
    use sunrise::{SolarDay, SolarEvent};

    let coord = sunrise::Coordinates::new(coordinates.latitude, coordinates.longitude).ok_or_else(|| {
        SunbarError::Config(format!(
            "invalid coordinates {}, {}",
            coordinates.latitude, coordinates.longitude
        ))
    })?;
    let solar_day = SolarDay::new(coord, now.date_naive());
    let sunrise_utc = solar_day.event_time(SolarEvent::Sunrise);
    let sunset_utc = solar_day.event_time(SolarEvent::Sunset);

    log_indented!("Sunrise UTC: {}", sunrise_utc.format("%H:%M"));
    log_indented!(" Sunset UTC: {}", sunset_utc.format("%H:%M"));

    let body = serde_json::json!({
        "results": {
            "sunrise": sunrise_utc.to_rfc3339(),
            "sunset": sunset_utc.to_rfc3339(),
        },
        "status": "OK",
    });
    serde_json::to_vec(&body).map_err(|e| SunbarError::decode("computed solar data", e))
}
