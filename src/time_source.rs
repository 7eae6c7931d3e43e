//! Clock and time zone helpers.
//!
//! The current instant comes from a [`TimeSource`] so that tests can pin "now",
//! and every calendar computation takes its zone from the `DateTime` it is given
//! rather than reaching for the process-wide local zone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc};

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub DateTime<Utc>);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Build the instant for a wall-clock date and time in `zone`.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant. Times that
/// fall into a gap (clocks going forward) are pushed one hour later, past the gap.
pub fn local_instant<Tz: TimeZone>(zone: &Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    let naive = date.and_time(time);
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| zone.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
}

/// Local midnight at the start of the calendar day containing `now`.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    local_instant(&now.timezone(), now.date_naive(), NaiveTime::MIN)
        // A zone whose midnight and the following hour are both skipped does not exist
        .unwrap_or_else(|| now.clone())
}

/// Whether daylight-saving time is in effect in the zone of `now`.
///
/// The standard offset is taken as the smaller of the offsets in effect on
/// January 1 and July 1 of the same year, which covers both hemispheres.
pub fn is_dst_active<Tz: TimeZone>(now: &DateTime<Tz>) -> bool {
    let zone = now.timezone();
    let offset_on = |month: u32| {
        NaiveDate::from_ymd_opt(now.year(), month, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .map(|noon| zone.offset_from_utc_datetime(&noon).fix().local_minus_utc())
    };

    match (offset_on(1), offset_on(7)) {
        (Some(january), Some(july)) => now.offset().fix().local_minus_utc() > january.min(july),
        _ => false,
    }
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" in a specific zone.
pub fn parse_datetime_in_tz<Tz: TimeZone>(s: &str, zone: &Tz) -> Result<DateTime<Tz>, String> {
    use chrono::NaiveDateTime;

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;
    zone.from_local_datetime(&naive)
        .single()
        .ok_or_else(|| "Ambiguous or invalid local time".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::{America::Sao_Paulo, Australia::Sydney, Europe::Berlin, Tz};

    #[test]
    fn test_start_of_day_is_local_midnight() {
        let now = parse_datetime_in_tz("2024-06-21 15:42:10", &Berlin).unwrap();
        let midnight = start_of_day(&now);

        assert_eq!(midnight.date_naive(), now.date_naive());
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
        // 00:00 CEST is 22:00 UTC on the previous day
        assert_eq!(
            midnight.with_timezone(&Utc).to_rfc3339(),
            "2024-06-20T22:00:00+00:00"
        );
    }

    #[test]
    fn test_start_of_day_when_midnight_is_skipped() {
        // Brazil skipped 00:00-01:00 on 2018-11-04
        let now = parse_datetime_in_tz("2018-11-04 10:00:00", &Sao_Paulo).unwrap();
        let midnight = start_of_day(&now);
        assert_eq!(midnight.date_naive(), now.date_naive());
        assert!(midnight < now);
    }

    #[test]
    fn test_dst_detection_northern_hemisphere() {
        let summer = parse_datetime_in_tz("2024-07-15 12:00:00", &Berlin).unwrap();
        let winter = parse_datetime_in_tz("2024-01-15 12:00:00", &Berlin).unwrap();
        assert!(is_dst_active(&summer));
        assert!(!is_dst_active(&winter));
    }

    #[test]
    fn test_dst_detection_southern_hemisphere() {
        let summer = parse_datetime_in_tz("2024-01-15 12:00:00", &Sydney).unwrap();
        let winter = parse_datetime_in_tz("2024-07-15 12:00:00", &Sydney).unwrap();
        assert!(is_dst_active(&summer));
        assert!(!is_dst_active(&winter));
    }

    #[test]
    fn test_dst_never_active_in_utc() {
        let now = parse_datetime_in_tz("2024-07-15 12:00:00", &Tz::UTC).unwrap();
        assert!(!is_dst_active(&now));
    }

    #[test]
    fn test_fixed_time_source() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let clock = FixedTimeSource(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }
}
