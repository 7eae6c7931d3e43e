//! Deciding which solar event comes next.
//!
//! Only today's sunrise and sunset are known. Once an event has passed, its
//! counterpart for tomorrow is approximated by adding 24 hours, which is
//! accurate to a couple of minutes and avoids a second astronomy request.

use chrono::{DateTime, TimeDelta, TimeZone};

/// A solar event shown in the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Sunrise,
    Sunset,
}

impl EventKind {
    /// Name used in the status line, doubling as an SF Symbol name.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Sunrise => "sunrise",
            EventKind::Sunset => "sunset",
        }
    }
}

/// Where `now` falls relative to today's sunrise and sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// Both events are still ahead.
    BeforeSunrise,
    /// Sunrise has passed, sunset has not.
    Daytime,
    /// Both events have passed; tomorrow's are next.
    AfterSunset,
}

impl DayPhase {
    /// Whether the desktop should be dark during this phase.
    pub fn wants_dark(&self) -> bool {
        match self {
            DayPhase::BeforeSunrise | DayPhase::AfterSunset => true,
            DayPhase::Daytime => false,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DayPhase::BeforeSunrise => "Before sunrise",
            DayPhase::Daytime => "Daytime",
            DayPhase::AfterSunset => "After sunset",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event<Tz: TimeZone> {
    pub kind: EventKind,
    pub at: DateTime<Tz>,
}

/// The event being counted down to in the title, and the one after it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWindow<Tz: TimeZone> {
    pub phase: DayPhase,
    pub current: Event<Tz>,
    pub next: Event<Tz>,
}

/// Classify `now` against today's sunrise and sunset.
///
/// Returns `None` when `now` coincides with either event, or for the
/// ordering sunrise > now > sunset that well-formed data never produces.
pub fn classify<Tz: TimeZone>(now: &DateTime<Tz>, sunrise: &DateTime<Tz>, sunset: &DateTime<Tz>) -> Option<DayPhase> {
    if sunrise > now && sunset > now {
        Some(DayPhase::BeforeSunrise)
    } else if sunrise < now && sunset > now {
        Some(DayPhase::Daytime)
    } else if sunrise < now && sunset < now {
        Some(DayPhase::AfterSunset)
    } else {
        None
    }
}

/// Build the event window for `now`, rolling passed events over to tomorrow.
pub fn event_window<Tz: TimeZone>(
    now: &DateTime<Tz>,
    sunrise: &DateTime<Tz>,
    sunset: &DateTime<Tz>,
) -> Option<EventWindow<Tz>> {
    let day = TimeDelta::hours(24);
    let event = |kind, at: DateTime<Tz>| Event { kind, at };

    let phase = classify(now, sunrise, sunset)?;
    let (current, next) = match phase {
        DayPhase::BeforeSunrise => (
            event(EventKind::Sunrise, sunrise.clone()),
            event(EventKind::Sunset, sunset.clone()),
        ),
        DayPhase::Daytime => (
            event(EventKind::Sunset, sunset.clone()),
            event(EventKind::Sunrise, sunrise.clone() + day),
        ),
        DayPhase::AfterSunset => (
            event(EventKind::Sunrise, sunrise.clone() + day),
            event(EventKind::Sunset, sunset.clone() + day),
        ),
    };

    Some(EventWindow {
        phase,
        current,
        next,
    })
}

/// Advance `now` by an hour while DST is in effect.
///
/// sunrise-sunset.org reports instants whose distance from a DST-observing
/// clock comes out an hour short; this restores the expected countdown.
pub fn compensate_dst<Tz: TimeZone>(now: DateTime<Tz>) -> DateTime<Tz> {
    if crate::time_source::is_dst_active(&now) {
        now + TimeDelta::hours(1)
    } else {
        now
    }
}
