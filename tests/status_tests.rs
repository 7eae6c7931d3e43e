use chrono::{DateTime, Utc};
use chrono_tz::Europe::Berlin;
use mockall::mock;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use sunbar::Sunbar;
use sunbar::appearance::AppearanceSwitch;
use sunbar::config::{Config, Provider};
use sunbar::error::{SunbarError, exit_code_for};
use sunbar::events::DayPhase;
use sunbar::format::DurationStyle;
use sunbar::http::{Fetcher, HttpResponse};
use sunbar::time_source::{FixedTimeSource, parse_datetime_in_tz};
use tempfile::tempdir;

mock! {
    pub Net {}
    impl Fetcher for Net {
        fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, SunbarError>;
    }
}

const CLOCK_TIME_BODY: &str = r#"{"date":"2024-06-21","sunrise":"06:30","sunset":"20:15","moonrise":"22:10"}"#;
const ISO_BODY: &str = r#"{"results":{"sunrise":"2024-06-21T04:30:00+00:00","sunset":"2024-06-21T18:15:00+00:00"},"status":"OK"}"#;

/// Records the last dark-mode decision.
struct RecordingAppearance(Rc<Cell<Option<bool>>>);

impl AppearanceSwitch for RecordingAppearance {
    fn set_dark(&self, dark: bool) {
        self.0.set(Some(dark));
    }
}

fn berlin_utc(s: &str) -> DateTime<Utc> {
    parse_datetime_in_tz(s, &Berlin).unwrap().with_timezone(&Utc)
}

fn config(provider: Provider, cache: &Path) -> Config {
    Config {
        provider: Some(provider),
        api_key: Some("test-key".to_string()),
        latitude: Some(52.52),
        longitude: Some(13.40),
        timezone: Some("Europe/Berlin".to_string()),
        cache_path: Some(cache.to_path_buf()),
        ..Default::default()
    }
}

fn serving(body: &'static str) -> MockNet {
    let mut net = MockNet::new();
    net.expect_get().times(1).returning(move |_, _| {
        Ok(HttpResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        })
    });
    net
}

fn run(config: Config, now: &str, net: MockNet) -> (anyhow::Result<Option<DayPhase>>, String) {
    let mut out = Vec::new();
    let result = Sunbar::new(config)
        .with_time_source(Arc::new(FixedTimeSource(berlin_utc(now))))
        .with_fetcher(Box::new(net))
        .run(&mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_midday_counts_down_to_sunset_then_next_sunrise() {
    let dir = tempdir().unwrap();
    let config = config(Provider::Ipgeolocation, &dir.path().join(".sun.json"));

    let (result, out) = run(config, "2024-06-21 12:00:00", serving(CLOCK_TIME_BODY));

    assert_eq!(result.unwrap(), Some(DayPhase::Daytime));
    assert_eq!(out, ":sunset: 08h 15m\n---\n:sunrise: 18h 30m | [symbolize = true]");
}

#[test]
fn test_early_morning_compact_style() {
    let dir = tempdir().unwrap();
    let config = Config {
        duration_style: Some(DurationStyle::Compact),
        ..config(Provider::Ipgeolocation, &dir.path().join(".sun.json"))
    };

    let (result, out) = run(config, "2024-06-21 06:00:00", serving(CLOCK_TIME_BODY));

    assert_eq!(result.unwrap(), Some(DayPhase::BeforeSunrise));
    assert_eq!(out, ":sunrise: 30m\n---\n:sunset: 14h 15m | [symbolize = true]");
}

#[test]
fn test_late_evening_rolls_both_events_to_tomorrow() {
    let dir = tempdir().unwrap();
    let config = config(Provider::Ipgeolocation, &dir.path().join(".sun.json"));

    let (result, out) = run(config, "2024-06-21 22:00:00", serving(CLOCK_TIME_BODY));

    assert_eq!(result.unwrap(), Some(DayPhase::AfterSunset));
    assert_eq!(out, ":sunrise: 08h 30m\n---\n:sunset: 22h 15m | [symbolize = true]");
}

#[test]
fn test_second_run_on_the_same_day_uses_the_cache() {
    let dir = tempdir().unwrap();
    let cache = dir.path().join(".sun.json");

    let (first, _) = run(
        config(Provider::Ipgeolocation, &cache),
        "2024-06-21 12:00:00",
        serving(CLOCK_TIME_BODY),
    );
    first.unwrap();
    assert_eq!(std::fs::read_to_string(&cache).unwrap(), CLOCK_TIME_BODY);

    let mut offline = MockNet::new();
    offline.expect_get().never();
    let (second, out) = run(config(Provider::Ipgeolocation, &cache), "2024-06-21 12:05:00", offline);

    assert_eq!(second.unwrap(), Some(DayPhase::Daytime));
    assert_eq!(out, ":sunset: 08h 10m\n---\n:sunrise: 18h 25m | [symbolize = true]");
}

#[test]
fn test_iso_provider_with_dst_compensation() {
    let dir = tempdir().unwrap();
    let config = Config {
        dst_compensation: Some(true),
        ..config(Provider::SunriseSunset, &dir.path().join(".sun.json"))
    };

    // Sunset 20:15 CEST, counted from 13:00 instead of 12:00
    let (result, out) = run(config, "2024-06-21 12:00:00", serving(ISO_BODY));

    assert_eq!(result.unwrap(), Some(DayPhase::Daytime));
    assert_eq!(out, ":sunset: 07h 15m\n---\n:sunrise: 17h 30m | [symbolize = true]");
}

#[test]
fn test_darkmode_switch_receives_phase_decision() {
    let dir = tempdir().unwrap();
    let decision = Rc::new(Cell::new(None));
    let config = Config {
        darkmode_switch: Some(true),
        ..config(Provider::Ipgeolocation, &dir.path().join(".sun.json"))
    };

    let mut out = Vec::new();
    Sunbar::new(config)
        .with_time_source(Arc::new(FixedTimeSource(berlin_utc("2024-06-21 23:00:00"))))
        .with_fetcher(Box::new(serving(CLOCK_TIME_BODY)))
        .with_appearance(Box::new(RecordingAppearance(decision.clone())))
        .run(&mut out)
        .unwrap();

    assert_eq!(decision.get(), Some(true));
}

#[test]
fn test_darkmode_switch_disabled_by_default() {
    let dir = tempdir().unwrap();
    let decision = Rc::new(Cell::new(None));

    let mut out = Vec::new();
    Sunbar::new(config(Provider::Ipgeolocation, &dir.path().join(".sun.json")))
        .with_time_source(Arc::new(FixedTimeSource(berlin_utc("2024-06-21 12:00:00"))))
        .with_fetcher(Box::new(serving(CLOCK_TIME_BODY)))
        .with_appearance(Box::new(RecordingAppearance(decision.clone())))
        .run(&mut out)
        .unwrap();

    assert_eq!(decision.get(), None);
}

#[test]
fn test_exact_event_time_prints_nothing() {
    let dir = tempdir().unwrap();
    let config = config(Provider::Ipgeolocation, &dir.path().join(".sun.json"));

    let (result, out) = run(config, "2024-06-21 20:15:00", serving(CLOCK_TIME_BODY));

    assert_eq!(result.unwrap(), None);
    assert!(out.is_empty());
}

#[test]
fn test_upstream_failure_exits_without_output() {
    let dir = tempdir().unwrap();
    let cache = dir.path().join(".sun.json");
    let mut net = MockNet::new();
    net.expect_get().times(1).returning(|_, _| {
        Ok(HttpResponse {
            status: 500,
            body: b"internal error".to_vec(),
        })
    });

    let (result, out) = run(config(Provider::SunriseSunset, &cache), "2024-06-21 12:00:00", net);

    let err = result.unwrap_err();
    assert_eq!(exit_code_for(&err), 5);
    assert!(out.is_empty());
    assert!(!cache.exists());
}

#[test]
fn test_malformed_clock_time_exits_with_date_parse_code() {
    let dir = tempdir().unwrap();
    let config = config(Provider::Ipgeolocation, &dir.path().join(".sun.json"));

    let (result, out) = run(
        config,
        "2024-06-21 12:00:00",
        serving(r#"{"sunrise":"-:-","sunset":"-:-"}"#),
    );

    assert_eq!(exit_code_for(&result.unwrap_err()), 7);
    assert!(out.is_empty());
}

#[test]
fn test_ip_lookup_used_without_pinned_coordinates() {
    let dir = tempdir().unwrap();
    let config = Config {
        latitude: None,
        longitude: None,
        ..config(Provider::Ipgeolocation, &dir.path().join(".sun.json"))
    };

    let mut net = MockNet::new();
    net.expect_get()
        .withf(|url, _| url == sunbar::geo::LOCATION_URL)
        .times(1)
        .returning(|_, _| {
            Ok(HttpResponse {
                status: 200,
                body: br#"{"latitude":48.1374,"longitude":11.5755}"#.to_vec(),
            })
        });
    net.expect_get()
        .withf(|_, query| query.contains(&("lat".to_string(), "48.14".to_string())))
        .times(1)
        .returning(|_, _| {
            Ok(HttpResponse {
                status: 200,
                body: CLOCK_TIME_BODY.as_bytes().to_vec(),
            })
        });

    let (result, _) = run(config, "2024-06-21 12:00:00", net);
    assert_eq!(result.unwrap(), Some(DayPhase::Daytime));
}

#[test]
fn test_missing_api_key_is_a_config_error() {
    let dir = tempdir().unwrap();
    let config = Config {
        api_key: None,
        ..config(Provider::Ipgeolocation, &dir.path().join(".sun.json"))
    };
    let mut net = MockNet::new();
    net.expect_get().never();

    let (result, _) = run(config, "2024-06-21 12:00:00", net);
    assert_eq!(exit_code_for(&result.unwrap_err()), 8);
}
