//! Configuration validation.

use super::{Config, MAXIMUM_REQUEST_TIMEOUT, MINIMUM_REQUEST_TIMEOUT, Provider};
use crate::error::SunbarError;

/// Reject configurations that would only fail later, mid-run.
pub fn validate_config(config: &Config) -> Result<(), SunbarError> {
    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        return Err(SunbarError::Config(format!(
            "latitude must be between -90 and 90 degrees (got {lat})"
        )));
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        return Err(SunbarError::Config(format!(
            "longitude must be between -180 and 180 degrees (got {lon})"
        )));
    }

    if config.latitude.is_some() != config.longitude.is_some() {
        return Err(SunbarError::Config(
            "latitude and longitude must be set together".into(),
        ));
    }

    if let Some(timeout) = config.request_timeout
        && !(MINIMUM_REQUEST_TIMEOUT..=MAXIMUM_REQUEST_TIMEOUT).contains(&timeout)
    {
        return Err(SunbarError::Config(format!(
            "request_timeout ({timeout} s) must be between {MINIMUM_REQUEST_TIMEOUT} and {MAXIMUM_REQUEST_TIMEOUT} seconds"
        )));
    }

    config.timezone()?;

    Ok(())
}

/// Checks that only make sense once environment overrides are applied.
pub fn validate_provider_requirements(config: &Config) -> Result<(), SunbarError> {
    if config.provider() == Provider::Ipgeolocation
        && config.api_key.as_deref().is_none_or(|k| k.trim().is_empty())
    {
        return Err(SunbarError::Config(format!(
            "the ipgeolocation provider needs an api_key (or {})",
            super::API_KEY_ENV_VAR
        )));
    }
    Ok(())
}
