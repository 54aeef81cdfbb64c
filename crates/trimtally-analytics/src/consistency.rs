// ABOUTME: Logging consistency metrics over rolling or goal-anchored windows
// ABOUTME: Computes the consistency score, the current daily streak, and the recent logging ratio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally
#![allow(clippy::cast_precision_loss)] // Safe: day counts are small

use crate::aggregation::DailyAggregator;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing::debug;
use trimtally_core::constants::consistency::REMINDER_WINDOW_DAYS;
use trimtally_core::models::Observation;
use trimtally_core::Clock;

/// Consistency scoring engine
pub struct ConsistencyScorer;

impl ConsistencyScorer {
    /// Fraction of days with at least one visible observation
    ///
    /// Without a goal anchor the window starts at the later of the first
    /// logged day and `today - window_days + 1`. With an anchor it starts at
    /// the anchor's local day. The denominator counts every calendar day from
    /// the window start through today inclusive, so someone who has logged
    /// every day since starting scores 1.0 no matter how short their history.
    ///
    /// Returns `None` when there is nothing to score (no visible observations
    /// and no anchor) or when the anchor lies in the future.
    #[must_use]
    pub fn score(
        observations: &[Observation],
        window_days: u32,
        goal_start_date: Option<DateTime<Utc>>,
        clock: &dyn Clock,
    ) -> Option<f64> {
        let logged_days = DailyAggregator::logged_days(observations, clock);
        let today = clock.today();

        let effective_start = match goal_start_date {
            Some(anchor) => clock.local_day(anchor),
            None => {
                let first_day = *logged_days.first()?;
                // A window reaching past the calendar's start covers the whole history
                today
                    .checked_sub_signed(Duration::days(i64::from(window_days.max(1)) - 1))
                    .map_or(first_day, |window_start| first_day.max(window_start))
            }
        };

        let total_days = (today - effective_start).num_days();
        if total_days < 0 {
            debug!(%effective_start, %today, "consistency window starts in the future");
            return None;
        }

        let days_with_entries = logged_days.range(effective_start..=today).count();
        Some(days_with_entries as f64 / (total_days + 1) as f64)
    }

    /// Consecutive logged days ending today
    ///
    /// Zero when today has no entry; any gap ends the streak.
    #[must_use]
    pub fn current_streak(logged_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut cursor = today;
        while logged_days.contains(&cursor) {
            streak += 1;
            match cursor.pred_opt() {
                Some(previous) => cursor = previous,
                None => break,
            }
        }
        streak
    }

    /// Fraction of the trailing 21 calendar days (today inclusive) with a log
    #[must_use]
    pub fn recent_logging_ratio(logged_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> f64 {
        if logged_days.is_empty() {
            return 0.0;
        }
        let window_start = today - Duration::days(REMINDER_WINDOW_DAYS - 1);
        let logged = logged_days.range(window_start..=today).count();
        logged as f64 / REMINDER_WINDOW_DAYS as f64
    }

    /// Whether the most recent `count` logged days are consecutive
    #[must_use]
    pub fn has_consecutive_run(logged_days: &BTreeSet<NaiveDate>, count: usize) -> bool {
        if count == 0 {
            return true;
        }
        if logged_days.len() < count {
            return false;
        }
        let recent: Vec<NaiveDate> = logged_days.iter().rev().take(count).copied().collect();
        recent
            .windows(2)
            .all(|pair| (pair[0] - pair[1]).num_days() == 1)
    }
}
