//! Day-scoped cache of the astronomy response.
//!
//! The raw body of the last successful astronomy response is kept in
//! `~/.sun.json`. Its modification time is the only freshness key: a file written
//! at or after local midnight today is used as-is, anything older (or no file at
//! all) triggers one fetch that overwrites it. A fresh file that no longer decodes,
//! for instance after switching providers, is treated as a miss too.
//!
//! The file is never locked; if two runs race, the last writer wins and both
//! write equivalent data.

use chrono::{DateTime, TimeZone, Utc};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::astronomy::{self, AstronomyRecord};
use crate::config::Provider;
use crate::error::SunbarError;
use crate::geo::{self, Coordinates};
use crate::http::Fetcher;
use crate::time_source::start_of_day;

/// Whether a cache written at `modified` is still valid at `now`.
pub fn is_fresh<Tz: TimeZone>(modified: SystemTime, now: &DateTime<Tz>) -> bool {
    DateTime::<Utc>::from(modified) >= start_of_day(now)
}

pub struct AstronomyCache<'a> {
    path: PathBuf,
    provider: Provider,
    api_key: Option<String>,
    coordinates: Option<Coordinates>,
    fetcher: &'a dyn Fetcher,
}

impl<'a> AstronomyCache<'a> {
    pub fn new(path: PathBuf, provider: Provider, fetcher: &'a dyn Fetcher) -> Self {
        Self {
            path,
            provider,
            api_key: None,
            coordinates: None,
            fetcher,
        }
    }

    /// Use fixed coordinates instead of an IP lookup on refresh.
    pub fn with_coordinates(mut self, coordinates: Option<Coordinates>) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Today's events, from the cache when it is fresh, from the provider otherwise.
    ///
    /// A missing cache file counts as a miss. Any other I/O failure is fatal.
    pub fn load<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<AstronomyRecord<Tz>, SunbarError> {
        log_block_start!("Loading astronomy data");

        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log_decorated!("No cache at {}", self.path.display());
                return self.refresh(now);
            }
            Err(e) => return Err(SunbarError::cache_io(&self.path, e)),
        };

        let modified = file
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|e| SunbarError::cache_io(&self.path, e))?;

        if !is_fresh(modified, now) {
            log_decorated!(
                "Cache is stale (written {})",
                DateTime::<Utc>::from(modified).format("%Y-%m-%d %H:%M:%S UTC")
            );
            drop(file);
            return self.refresh(now);
        }

        let mut body = Vec::new();
        file.read_to_end(&mut body)
            .map_err(|e| SunbarError::cache_io(&self.path, e))?;
        log_decorated!("Using cached data from {}", self.path.display());

        // A body written by another provider, or for another day, is replaced
        match astronomy::parse_response(&body, self.provider.schema(), now) {
            Err(SunbarError::Decode { message, .. }) => {
                log_warning!("Cached data is unusable ({message}), refreshing");
                self.refresh(now)
            }
            result => result,
        }
    }

    /// Fetch today's data, persist the raw body, and decode it.
    ///
    /// The body is written before it is decoded, so a malformed response is
    /// cached too and replaced by the next run's refresh.
    pub fn refresh<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<AstronomyRecord<Tz>, SunbarError> {
        log_block_start!("Refreshing astronomy data ({})", self.provider.name());

        let coordinates = match self.coordinates {
            Some(coordinates) => {
                log_decorated!("Using configured coordinates");
                coordinates
            }
            None => geo::resolve(self.fetcher)?,
        };

        let body = astronomy::fetch(
            self.provider,
            coordinates,
            self.api_key.as_deref(),
            self.fetcher,
            now,
        )?;

        write_private(&self.path, &body).map_err(|e| SunbarError::cache_io(&self.path, e))?;
        log_decorated!("Cache written to {}", self.path.display());

        astronomy::parse_response(&body, self.provider.schema(), now)
    }
}

/// Create or truncate `path` and write `body`, readable by the owner only.
fn write_private(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(body)?;

    // The mode above only applies when the file is created
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}
