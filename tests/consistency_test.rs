// ABOUTME: Tests for the consistency score, current streak, and recent logging ratio
// ABOUTME: Covers rolling and goal-anchored windows, short histories, and future anchors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{at, days_ago, now, observation, recent_daily_observations, today, utc_clock};
use std::collections::BTreeSet;
use trimtally_analytics::ConsistencyScorer;

#[test]
fn test_short_perfect_history_scores_one() {
    let clock = utc_clock();
    let observations = recent_daily_observations(&clock, &[80.0, 79.9, 79.8]);

    let score = ConsistencyScorer::score(&observations, 30, None, &clock).unwrap();

    assert!((score - 1.0).abs() < 1e-9);
}

#[test]
fn test_one_gap_day_before_today_scores_two_thirds() {
    let clock = utc_clock();
    let observations = vec![
        observation(&clock, at(days_ago(2), 8), 80.0),
        observation(&clock, at(today(), 8), 79.8),
    ];

    let score = ConsistencyScorer::score(&observations, 30, None, &clock).unwrap();

    assert!((score - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_daily_logging_longer_than_window_scores_one() {
    let clock = utc_clock();
    let observations = recent_daily_observations(&clock, &[80.0; 45]);

    let score = ConsistencyScorer::score(&observations, 30, None, &clock).unwrap();

    assert!((score - 1.0).abs() < 1e-9);
}

#[test]
fn test_window_beyond_calendar_range_covers_whole_history() {
    let clock = utc_clock();
    let observations = vec![
        observation(&clock, at(days_ago(2), 8), 80.0),
        observation(&clock, at(today(), 8), 79.8),
    ];

    let huge = ConsistencyScorer::score(&observations, u32::MAX, None, &clock).unwrap();
    let large = ConsistencyScorer::score(&observations, 1_000_000_000, None, &clock).unwrap();

    assert!((huge - 2.0 / 3.0).abs() < 1e-9);
    assert!((large - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_no_observations_and_no_anchor_is_absent() {
    let clock = utc_clock();
    assert!(ConsistencyScorer::score(&[], 30, None, &clock).is_none());
}

#[test]
fn test_only_hidden_observations_is_absent() {
    let clock = utc_clock();
    let observations = vec![observation(&clock, at(today(), 8), 80.0).hidden()];
    assert!(ConsistencyScorer::score(&observations, 30, None, &clock).is_none());
}

#[test]
fn test_every_other_day_over_full_window_scores_half() {
    let clock = utc_clock();
    // Logged on even offsets for sixty days, so the 30-day window holds 15 logs
    let observations: Vec<_> = (0..60)
        .step_by(2)
        .map(|offset| observation(&clock, at(days_ago(offset), 8), 80.0))
        .collect();

    let score = ConsistencyScorer::score(&observations, 30, None, &clock).unwrap();

    assert!((score - 0.5).abs() < 1e-9);
}

#[test]
fn test_goal_anchor_sets_window_start() {
    let clock = utc_clock();
    let observations = recent_daily_observations(&clock, &[80.0; 5]);
    // Anchor ten days back: 5 logged days over 10 calendar days
    let anchor = at(days_ago(9), 6);

    let score = ConsistencyScorer::score(&observations, 30, Some(anchor), &clock).unwrap();

    assert!((score - 0.5).abs() < 1e-9);
}

#[test]
fn test_anchor_today_without_observations_scores_zero() {
    let clock = utc_clock();
    let score = ConsistencyScorer::score(&[], 30, Some(now()), &clock).unwrap();
    assert!(score.abs() < 1e-12);
}

#[test]
fn test_future_anchor_is_absent() {
    let clock = utc_clock();
    let observations = recent_daily_observations(&clock, &[80.0; 3]);
    let anchor = now() + Duration::days(2);
    assert!(ConsistencyScorer::score(&observations, 30, Some(anchor), &clock).is_none());
}

#[test]
fn test_zero_window_is_treated_as_one_day() {
    let clock = utc_clock();
    let observations = recent_daily_observations(&clock, &[80.0; 3]);
    let score = ConsistencyScorer::score(&observations, 0, None, &clock).unwrap();
    assert!((score - 1.0).abs() < 1e-9);
}

#[test]
fn test_score_stays_in_unit_interval() {
    let clock = utc_clock();
    let observations: Vec<_> = [0, 1, 3, 7, 8, 20, 45]
        .iter()
        .flat_map(|offset| {
            [
                observation(&clock, at(days_ago(*offset), 7), 80.0),
                observation(&clock, at(days_ago(*offset), 19), 80.5),
            ]
        })
        .collect();

    for window in [1, 7, 14, 30, 90, 365] {
        let score = ConsistencyScorer::score(&observations, window, None, &clock).unwrap();
        assert!((0.0..=1.0).contains(&score), "window {window} gave {score}");
    }
}

#[test]
fn test_current_streak_stops_at_gap() {
    let days: BTreeSet<_> = [0, 1, 2, 4, 5].iter().map(|d| days_ago(*d)).collect();
    assert_eq!(ConsistencyScorer::current_streak(&days, today()), 3);
}

#[test]
fn test_current_streak_is_zero_without_todays_log() {
    let days: BTreeSet<_> = [1, 2, 3].iter().map(|d| days_ago(*d)).collect();
    assert_eq!(ConsistencyScorer::current_streak(&days, today()), 0);
}

#[test]
fn test_recent_logging_ratio() {
    let all: BTreeSet<_> = (0..21).map(days_ago).collect();
    assert!((ConsistencyScorer::recent_logging_ratio(&all, today()) - 1.0).abs() < 1e-9);

    let some: BTreeSet<_> = (0..7).map(days_ago).chain([days_ago(40)]).collect();
    assert!((ConsistencyScorer::recent_logging_ratio(&some, today()) - 7.0 / 21.0).abs() < 1e-9);

    assert!(ConsistencyScorer::recent_logging_ratio(&BTreeSet::new(), today()).abs() < 1e-12);
}

#[test]
fn test_consecutive_run_uses_most_recent_days() {
    let run: BTreeSet<_> = (10..17).map(days_ago).collect();
    assert!(ConsistencyScorer::has_consecutive_run(&run, 7));

    let mut broken = run.clone();
    broken.insert(days_ago(2));
    assert!(!ConsistencyScorer::has_consecutive_run(&broken, 7));

    let short: BTreeSet<_> = (0..6).map(days_ago).collect();
    assert!(!ConsistencyScorer::has_consecutive_run(&short, 7));
}
