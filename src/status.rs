//! The two-line status consumed by the menu-bar host.
//!
//! SwiftBar/xbar read the first line as the menu-bar title and everything after
//! the `---` separator as dropdown items. `:sunrise:`/`:sunset:` are SF Symbol
//! names, which the host only resolves because of `symbolize = true`. The format
//! is a contract and must not change.

use chrono::{DateTime, TimeZone};

use crate::events::EventWindow;
use crate::format::{DurationStyle, format_until};

/// Assemble the status text. There is no trailing newline.
pub fn render(now_event: &str, now_duration: &str, next_event: &str, next_duration: &str) -> String {
    format!(":{now_event}: {now_duration}\n---\n:{next_event}: {next_duration} | [symbolize = true]")
}

/// Render the countdowns for an event window as seen from `now`.
pub fn render_window<Tz: TimeZone>(window: &EventWindow<Tz>, now: &DateTime<Tz>, style: DurationStyle) -> String {
    render(
        window.current.kind.name(),
        &format_until(&window.current.at, now, style),
        window.next.kind.name(),
        &format_until(&window.next.at, now, style),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_exact_format() {
        assert_eq!(
            render("sunset", "08h 15m", "sunrise", "18h 30m"),
            ":sunset: 08h 15m\n---\n:sunrise: 18h 30m | [symbolize = true]"
        );
    }

    #[test]
    fn test_render_has_three_lines_and_no_trailing_newline() {
        let text = render("sunrise", "1h 2m", "sunset", "13h 0m");
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.lines().nth(1), Some("---"));
        assert!(!text.ends_with('\n'));
    }
}
