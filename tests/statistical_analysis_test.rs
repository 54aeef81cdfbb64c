// ABOUTME: Tests for moving averages, regression, and trend classification
// ABOUTME: Validates window lengths, smoothing factor, index-based regression, and stability threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{date, linear, series};
use trimtally_analytics::{DailyPoint, TrendDirection, TrendEngine};

#[test]
fn test_sma_output_length_and_values() {
    let points = series(date(2025, 3, 1), &[80.0, 81.0, 82.0, 83.0, 84.0]);

    let sma = TrendEngine::simple_moving_average(&points, 3);

    assert_eq!(sma.len(), 3);
    assert_eq!(sma[0].day, date(2025, 3, 3), "dated at the window's last day");
    assert!((sma[0].value - 81.0).abs() < 1e-9);
    assert!((sma[2].value - 83.0).abs() < 1e-9);
}

#[test]
fn test_sma_period_longer_than_series_is_empty() {
    let points = series(date(2025, 3, 1), &[80.0, 81.0]);
    assert!(TrendEngine::simple_moving_average(&points, 3).is_empty());
    assert!(TrendEngine::simple_moving_average(&points, 0).is_empty());
    assert_eq!(TrendEngine::simple_moving_average(&points, 2).len(), 1);
}

#[test]
fn test_constant_series_averages_to_the_constant() {
    let points = series(date(2025, 3, 1), &[70.3; 12]);

    let sma = TrendEngine::simple_moving_average(&points, 5);
    let ema = TrendEngine::exponential_moving_average(&points, 5);

    assert_eq!(sma.len(), 8);
    assert_eq!(ema.len(), 12);
    assert!(sma.iter().all(|p| (p.value - 70.3).abs() < 1e-9));
    assert!(ema.iter().all(|p| (p.value - 70.3).abs() < 1e-9));
}

#[test]
fn test_ema_with_zero_period_is_empty() {
    let points = series(date(2025, 3, 1), &[80.0, 81.0, 82.0]);
    assert!(TrendEngine::exponential_moving_average(&points, 0).is_empty());
    assert!(TrendEngine::exponential_moving_average(&[], 7).is_empty());
}

#[test]
fn test_ema_matches_input_length_and_seeds_with_first_value() {
    let points = series(date(2025, 3, 1), &[10.0, 20.0, 20.0]);

    // period 3 => alpha 0.5
    let ema = TrendEngine::exponential_moving_average(&points, 3);

    assert_eq!(ema.len(), points.len());
    assert!((ema[0].value - 10.0).abs() < 1e-9);
    assert!((ema[1].value - 15.0).abs() < 1e-9);
    assert!((ema[2].value - 17.5).abs() < 1e-9);
    assert_eq!(ema[2].day, date(2025, 3, 3));
}

#[test]
fn test_ema_of_empty_series_is_empty() {
    let empty: Vec<DailyPoint> = Vec::new();
    assert!(TrendEngine::exponential_moving_average(&empty, 7).is_empty());
}

#[test]
fn test_linear_regression_perfect_negative_line() {
    let points = series(date(2025, 3, 1), &linear(90.0, -0.1, 10));

    let result = TrendEngine::linear_regression(&points).unwrap();

    assert!((result.slope - (-0.1)).abs() < 1e-9);
    assert!((result.intercept - 90.0).abs() < 1e-9);
    assert!((result.correlation.unwrap() - 1.0).abs() < 1e-6);
    assert_eq!(result.point_count, 10);
    assert!((result.predict(20.0) - 88.0).abs() < 1e-9);
}

#[test]
fn test_linear_regression_uses_index_not_calendar_gap() {
    let points = vec![
        DailyPoint::new(date(2025, 3, 1), 80.0),
        DailyPoint::new(date(2025, 3, 10), 79.0),
        DailyPoint::new(date(2025, 3, 30), 78.0),
    ];

    let result = TrendEngine::linear_regression(&points).unwrap();
    assert!((result.slope - (-1.0)).abs() < 1e-9);
}

#[test]
fn test_linear_regression_insufficient_data() {
    let points = series(date(2025, 3, 1), &[80.0]);
    assert!(TrendEngine::linear_regression(&points).is_none());
    assert!(TrendEngine::linear_regression(&[]).is_none());
}

#[test]
fn test_linear_regression_constant_values_has_no_correlation() {
    let points = series(date(2025, 3, 1), &[80.0; 5]);
    let result = TrendEngine::linear_regression(&points).unwrap();
    assert!(result.slope.abs() < 1e-12);
    assert!(result.correlation.is_none());
}

#[test]
fn test_correlation_stays_in_unit_interval() {
    let points = series(date(2025, 3, 1), &[80.0, 83.0, 79.0, 84.0, 78.0, 85.0]);
    let correlation = TrendEngine::linear_regression(&points)
        .unwrap()
        .correlation
        .unwrap();
    assert!((0.0..=1.0).contains(&correlation));
}

#[test]
fn test_trend_needs_seven_points() {
    let points = series(date(2025, 3, 1), &linear(90.0, -1.0, 6));
    assert_eq!(TrendEngine::classify_trend(&points), TrendDirection::Stable);
}

#[test]
fn test_trend_direction_from_slope() {
    let down = series(date(2025, 3, 1), &linear(90.0, -0.1, 10));
    let up = series(date(2025, 3, 1), &linear(70.0, 0.1, 10));
    let flat = series(date(2025, 3, 1), &linear(80.0, 0.01, 10));

    assert_eq!(TrendEngine::classify_trend(&down), TrendDirection::Downward);
    assert_eq!(TrendEngine::classify_trend(&up), TrendDirection::Upward);
    assert_eq!(TrendEngine::classify_trend(&flat), TrendDirection::Stable);
}

#[test]
fn test_custom_stability_threshold() {
    let points = series(date(2025, 3, 1), &linear(90.0, -0.1, 10));
    assert_eq!(
        TrendEngine::classify_trend_with_threshold(&points, 0.5),
        TrendDirection::Stable
    );
}
