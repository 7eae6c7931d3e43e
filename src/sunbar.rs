//! Application coordinator for a single sunbar run.
//!
//! One run reads the clock once, loads today's events through the cache,
//! decides which event comes next, writes the status and optionally flips the
//! desktop appearance. The `Sunbar` struct uses a builder pattern so every
//! outside dependency can be swapped:
//!
//! - Normal run: `Sunbar::new(config).run(&mut stdout)`
//! - Tests: `Sunbar::new(config).with_time_source(clock).with_fetcher(mock).run(&mut buf)`

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use std::io::Write;
use std::sync::Arc;

use crate::appearance::{AppearanceSwitch, MacosAppearance};
use crate::cache::AstronomyCache;
use crate::config::{Config, validation::validate_provider_requirements};
use crate::events::{DayPhase, compensate_dst, event_window};
use crate::http::{Fetcher, ReqwestFetcher};
use crate::status::render_window;
use crate::time_source::{RealTimeSource, TimeSource};

pub struct Sunbar {
    config: Config,
    time_source: Arc<dyn TimeSource>,
    fetcher: Option<Box<dyn Fetcher>>,
    appearance: Box<dyn AppearanceSwitch>,
}

impl Sunbar {
    /// Create a runner using the real clock, network and macOS appearance.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            time_source: Arc::new(RealTimeSource),
            fetcher: None,
            appearance: Box::new(MacosAppearance),
        }
    }

    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_appearance(mut self, appearance: Box<dyn AppearanceSwitch>) -> Self {
        self.appearance = appearance;
        self
    }

    /// Write the status to `out`.
    ///
    /// Returns the phase of the day, or `None` when `now` coincides with an
    /// event and nothing was written.
    pub fn run(&self, out: &mut dyn Write) -> Result<Option<DayPhase>> {
        log_version!();
        validate_provider_requirements(&self.config)?;

        match self.config.timezone()? {
            Some(zone) => self.run_in(zone, out),
            None => self.run_in(Local, out),
        }
    }

    fn run_in<Tz: TimeZone>(&self, zone: Tz, out: &mut dyn Write) -> Result<Option<DayPhase>> {
        let now = self.time_source.now().with_timezone(&zone);
        log_decorated!("Now: {}", now.naive_local().format("%Y-%m-%d %H:%M:%S"));

        let default_fetcher;
        let fetcher: &dyn Fetcher = match &self.fetcher {
            Some(fetcher) => fetcher.as_ref(),
            None => {
                default_fetcher = ReqwestFetcher::new(self.config.request_timeout())?;
                &default_fetcher
            }
        };

        let cache = AstronomyCache::new(self.config.cache_path()?, self.config.provider(), fetcher)
            .with_coordinates(self.config.coordinates())
            .with_api_key(self.config.api_key.clone());
        let record = cache
            .load(&now)
            .with_context(|| format!("Failed to load astronomy data via {}", cache.path().display()))?;

        log_block_start!("Today's events");
        log_indented!("Sunrise: {}", record.sunrise.naive_local().format("%H:%M:%S"));
        log_indented!(" Sunset: {}", record.sunset.naive_local().format("%H:%M:%S"));

        let now = if self.config.dst_compensation() {
            let adjusted = compensate_dst(now.clone());
            if adjusted != now {
                log_decorated!("DST active, counting from one hour later");
            }
            adjusted
        } else {
            now
        };

        let Some(window) = event_window(&now, &record.sunrise, &record.sunset) else {
            log_warning!("Current time coincides with a solar event, skipping this run");
            return Ok(None);
        };
        log_decorated!(
            "{}: next {} then {}",
            window.phase.display_name(),
            window.current.kind.name(),
            window.next.kind.name()
        );

        let status = render_window(&window, &now, self.config.duration_style());
        out.write_all(status.as_bytes()).context("Failed to write status")?;
        out.flush().context("Failed to write status")?;

        if self.config.darkmode_switch() {
            self.appearance.set_dark(window.phase.wants_dark());
        }

        Ok(Some(window.phase))
    }
}
