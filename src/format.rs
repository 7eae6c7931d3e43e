//! Countdown formatting for the status line.

use chrono::{DateTime, TimeDelta, TimeZone};
use serde::Deserialize;

/// How a countdown is written.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// Absolute distance rounded to the nearest minute, zero-padded: `08h 05m`.
    #[default]
    Padded,
    /// Signed distance truncated to whole minutes, hours omitted when zero:
    /// `8h 5m`, `42m`.
    Compact,
}

/// Format the time left from `now` until `target`.
pub fn format_until<Tz1: TimeZone, Tz2: TimeZone>(
    target: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
    style: DurationStyle,
) -> String {
    format_duration(target.clone().signed_duration_since(now.clone()), style)
}

pub fn format_duration(delta: TimeDelta, style: DurationStyle) -> String {
    match style {
        DurationStyle::Padded => {
            // Half a minute rounds up
            let minutes = (delta.num_milliseconds().unsigned_abs() + 30_000) / 60_000;
            format!("{:02}h {:02}m", minutes / 60, minutes % 60)
        }
        DurationStyle::Compact => {
            // Both components truncate toward zero, so negatives keep their sign
            let minutes = delta.num_minutes();
            let (hours, minutes) = (minutes / 60, minutes % 60);
            if hours == 0 {
                format!("{minutes}m")
            } else {
                format!("{hours}h {minutes}m")
            }
        }
    }
}
