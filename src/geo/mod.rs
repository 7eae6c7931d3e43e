//! Approximate location from the public IP address.
//!
//! A cache miss needs coordinates for the astronomy request. Unless the
//! configuration pins them, they come from ifconfig.co, which geolocates the
//! caller's public address to roughly city precision. That is plenty for
//! sunrise and sunset, which shift by about four minutes per degree of longitude.

use serde::Deserialize;

use crate::error::SunbarError;
use crate::http::Fetcher;

pub const LOCATION_URL: &str = "https://ifconfig.co/json";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Coordinates as query values, rounded to two decimals (about 1 km).
    pub fn query_values(&self) -> (String, String) {
        (format!("{:.2}", self.latitude), format!("{:.2}", self.longitude))
    }
}

/// Look up the caller's coordinates. No retry; every failure is fatal.
pub fn resolve(fetcher: &dyn Fetcher) -> Result<Coordinates, SunbarError> {
    log_decorated!("Resolving location from {LOCATION_URL}");

    let response = fetcher.get(LOCATION_URL, &[])?;
    if !response.is_ok() {
        return Err(SunbarError::UpstreamHttp {
            url: LOCATION_URL.to_string(),
            status: response.status,
            body: response.body_text(),
        });
    }

    let coordinates = parse_location(&response.body)?;
    log_indented!(
        "Coordinates: {:.4}°, {:.4}°",
        coordinates.latitude,
        coordinates.longitude
    );
    Ok(coordinates)
}

/// Extract numeric `latitude` and `longitude` from a location response.
pub fn parse_location(body: &[u8]) -> Result<Coordinates, SunbarError> {
    serde_json::from_slice::<Coordinates>(body).map_err(|e| SunbarError::decode("location response", e))
}
