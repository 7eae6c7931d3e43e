//! Configuration for sunbar.
//!
//! sunbar runs without any configuration at all. An optional TOML file can pick a
//! different astronomy provider, pin the location, or change how durations are
//! displayed. It is looked up at:
//!
//! 1. **$SUNBAR_CONFIG_DIR**/sunbar.toml, when the variable is set
//! 2. **XDG_CONFIG_HOME**/sunbar/sunbar.toml (`~/Library/Application Support/sunbar`
//!    on macOS)
//!
//! A missing file means "all defaults".
//!
//! ```toml
//! provider = "sunrise-sunset"   # "sunrise-sunset", "ipgeolocation" or "solar"
//! api_key = "..."               # ipgeolocation.io key (or set SUNBAR_API_KEY)
//! latitude = 52.52              # Pin the location and skip the IP lookup
//! longitude = 13.40
//! timezone = "Europe/Berlin"    # Defaults to the system zone
//! duration_style = "padded"     # "padded" (08h 05m) or "compact" (8h 5m)
//! dst_compensation = false      # Add an hour to "now" while DST is active
//! darkmode_switch = false       # Toggle macOS dark mode at sunrise/sunset
//! request_timeout = 10          # Seconds, 1-120
//! cache_path = "~/.sun.json"
//! debug = false                 # Diagnostics on stderr
//! ```

pub mod loading;
pub mod validation;


use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SunbarError;
use crate::format::DurationStyle;

pub use loading::{get_config_path, load, load_from_path};

/// Environment variable overriding the configured API key.
pub const API_KEY_ENV_VAR: &str = "SUNBAR_API_KEY";
/// Environment variable pointing at a directory containing `sunbar.toml`.
pub const CONFIG_DIR_ENV_VAR: &str = "SUNBAR_CONFIG_DIR";

pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;
pub const MINIMUM_REQUEST_TIMEOUT: u64 = 1;
pub const MAXIMUM_REQUEST_TIMEOUT: u64 = 120;

/// File name of the astronomy cache inside the home directory.
pub const CACHE_FILE_NAME: &str = ".sun.json";

/// Source of sunrise and sunset data.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// api.sunrise-sunset.org, full ISO-8601 timestamps, no key required.
    #[default]
    SunriseSunset,
    /// api.ipgeolocation.io astronomy endpoint, "HH:MM" local times, needs a key.
    Ipgeolocation,
    /// Computed locally from the coordinates, no astronomy request.
    Solar,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::SunriseSunset => "sunrise-sunset",
            Provider::Ipgeolocation => "ipgeolocation",
            Provider::Solar => "solar",
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub provider: Option<Provider>,
    pub api_key: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub duration_style: Option<DurationStyle>,
    pub dst_compensation: Option<bool>,
    pub darkmode_switch: Option<bool>,
    pub request_timeout: Option<u64>,
    pub cache_path: Option<PathBuf>,
    pub debug: Option<bool>,
}

impl Config {
    /// Load the configuration from the default location.
    pub fn load() -> anyhow::Result<Self> {
        load()
    }

    pub fn provider(&self) -> Provider {
        self.provider.unwrap_or_default()
    }

    pub fn duration_style(&self) -> DurationStyle {
        self.duration_style.unwrap_or_default()
    }

    pub fn dst_compensation(&self) -> bool {
        self.dst_compensation.unwrap_or(false)
    }

    pub fn darkmode_switch(&self) -> bool {
        self.darkmode_switch.unwrap_or(false)
    }

    pub fn debug(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
    }

    /// Pinned coordinates, when both latitude and longitude are configured.
    pub fn coordinates(&self) -> Option<crate::geo::Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(crate::geo::Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// Configured IANA zone, or `None` for the system zone.
    pub fn timezone(&self) -> Result<Option<chrono_tz::Tz>, SunbarError> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<chrono_tz::Tz>()
                    .map_err(|_| SunbarError::Config(format!("unknown timezone '{name}'")))
            })
            .transpose()
    }

    /// Location of the astronomy cache, `~/.sun.json` unless overridden.
    pub fn cache_path(&self) -> Result<PathBuf, SunbarError> {
        if let Some(path) = &self.cache_path {
            return expand_home(path);
        }
        dirs::home_dir()
            .map(|home| home.join(CACHE_FILE_NAME))
            .ok_or(SunbarError::HomeDirectoryUnavailable)
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &std::path::Path) -> Result<PathBuf, SunbarError> {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or(SunbarError::HomeDirectoryUnavailable),
        Err(_) => Ok(path.to_path_buf()),
    }
}
