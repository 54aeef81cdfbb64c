// ABOUTME: Shared test utilities and fixture builders for integration tests
// ABOUTME: Provides quiet logging, pinned clocks, observation series, and tracker setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::cast_possible_wrap
)]
//! Shared test utilities for `trimtally`

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use std::env;
use std::sync::{Arc, Once, RwLock};
use tracing::Level;
use trimtally::store::{InMemoryObservationStore, InMemorySettingsProvider};
use trimtally::WeightTracker;
use trimtally_analytics::DailyPoint;
use trimtally_core::config::Settings;
use trimtally_core::models::Observation;
use trimtally_core::{Clock, FixedClock};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// "Now" for every fixture: 2025-03-31 20:00 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 31, 20, 0, 0).unwrap()
}

/// Today under the UTC fixture clock
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Clock frozen at [`now`] in UTC
pub fn utc_clock() -> FixedClock {
    FixedClock::utc(now())
}

/// Offset of `hours` east of UTC
pub fn offset_hours(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap()
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Instant at `hour:00` UTC on `day`
pub fn at(day: NaiveDate, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
}

/// `days` days before today
pub fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

/// A visible observation at `timestamp`
pub fn observation(clock: &dyn Clock, timestamp: DateTime<Utc>, value_kg: f64) -> Observation {
    Observation::new(timestamp, value_kg, clock)
}

/// One 08:00 UTC observation per consecutive day starting at `start`
pub fn daily_observations(clock: &dyn Clock, start: NaiveDate, values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| observation(clock, at(start + Duration::days(i as i64), 8), *value))
        .collect()
}

/// One observation per day ending today
pub fn recent_daily_observations(clock: &dyn Clock, values: &[f64]) -> Vec<Observation> {
    let start = days_ago(values.len() as i64 - 1);
    daily_observations(clock, start, values)
}

/// Daily points on consecutive days starting at `start`
pub fn series(start: NaiveDate, values: &[f64]) -> Vec<DailyPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| DailyPoint::new(start + Duration::days(i as i64), *value))
        .collect()
}

/// Linearly changing values: `start + step * i`
pub fn linear(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| step.mul_add(i as f64, start)).collect()
}

/// Tracker over an in-memory store with default settings
pub fn tracker(clock: Arc<dyn Clock>, observations: Vec<Observation>) -> WeightTracker {
    tracker_with_settings(clock, observations, Settings::default())
}

/// Tracker over an in-memory store with the given settings
pub fn tracker_with_settings(
    clock: Arc<dyn Clock>,
    observations: Vec<Observation>,
    settings: Settings,
) -> WeightTracker {
    init_test_logging();
    WeightTracker::new(
        Arc::new(InMemoryObservationStore::with_observations(observations)),
        Arc::new(InMemorySettingsProvider::new(settings)),
        clock,
    )
}

/// Clock whose timezone can change mid-test, like a phone crossing timezones
#[derive(Debug)]
pub struct TravellingClock {
    now: DateTime<Utc>,
    offset: RwLock<FixedOffset>,
}

impl TravellingClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now,
            offset: RwLock::new(offset),
        }
    }

    pub fn travel_to(&self, offset: FixedOffset) {
        *self.offset.write().unwrap() = offset;
    }
}

impl Clock for TravellingClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant
            .with_timezone(&*self.offset.read().unwrap())
            .date_naive()
    }
}
