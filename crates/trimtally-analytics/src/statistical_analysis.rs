// ABOUTME: Trend engine for daily weight series
// ABOUTME: Implements SMA, EMA, index-based least-squares regression, and trend classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally
#![allow(clippy::cast_precision_loss)] // Safe: index and count values are far below 2^52

use crate::aggregation::DailyPoint;
use serde::{Deserialize, Serialize};
use trimtally_core::constants::trend::{
    MIN_POINTS_FOR_CLASSIFICATION, MIN_POINTS_FOR_REGRESSION, STABILITY_THRESHOLD_KG_PER_DAY,
};

/// Linear regression fit over a daily series
///
/// The independent variable is the zero-based index of each point, not the
/// elapsed calendar days, so gaps in logging do not stretch the x-axis. The
/// slope is therefore in kg per index step, which approximates kg per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope of the regression line (kg per index step)
    pub slope: f64,
    /// Y-intercept at index 0
    pub intercept: f64,
    /// Correlation strength `sqrt(1 - SSres/SStot)`; absent for zero variance in y
    pub correlation: Option<f64>,
    /// Number of points fitted
    pub point_count: usize,
}

impl RegressionResult {
    /// Predicted value at a given index
    #[must_use]
    pub fn predict(&self, index: f64) -> f64 {
        self.slope.mul_add(index, self.intercept)
    }
}

/// Direction of the weight trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Weight is going down
    Downward,
    /// Weight is going up
    Upward,
    /// Slope is within the stability threshold or data is insufficient
    Stable,
}

/// Moving averages and regression over daily series
pub struct TrendEngine;

impl TrendEngine {
    /// Simple moving average
    ///
    /// Emits one point per full window, dated at the window's last day.
    /// Returns empty when `period` is zero or longer than the series.
    #[must_use]
    pub fn simple_moving_average(series: &[DailyPoint], period: usize) -> Vec<DailyPoint> {
        if period == 0 || series.len() < period {
            return Vec::new();
        }

        series
            .windows(period)
            .map(|window| {
                let sum: f64 = window.iter().map(|p| p.value).sum();
                // windows() never yields an empty slice for period > 0
                let day = window[window.len() - 1].day;
                DailyPoint::new(day, sum / period as f64)
            })
            .collect()
    }

    /// Exponential moving average with `alpha = 2 / (period + 1)`
    ///
    /// The first output is the first raw value; output length always equals
    /// input length.
    #[must_use]
    pub fn exponential_moving_average(series: &[DailyPoint], period: usize) -> Vec<DailyPoint> {
        let Some(first) = series.first() else {
            return Vec::new();
        };
        if period == 0 {
            return Vec::new();
        }

        let alpha = 2.0 / (period as f64 + 1.0);
        let mut ema = first.value;
        let mut result = Vec::with_capacity(series.len());
        result.push(DailyPoint::new(first.day, ema));

        for point in &series[1..] {
            ema = point.value.mul_add(alpha, ema * (1.0 - alpha));
            result.push(DailyPoint::new(point.day, ema));
        }

        result
    }

    /// Ordinary least squares fit of value against point index
    ///
    /// Returns `None` for fewer than two points or zero variance in x.
    #[must_use]
    pub fn linear_regression(series: &[DailyPoint]) -> Option<RegressionResult> {
        if series.len() < MIN_POINTS_FOR_REGRESSION {
            return None;
        }

        let n = series.len() as f64;
        let mean_x = (0..series.len()).map(|i| i as f64).sum::<f64>() / n;
        let mean_y = series.iter().map(|p| p.value).sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut ss_total = 0.0;
        for (i, point) in series.iter().enumerate() {
            let dx = i as f64 - mean_x;
            let dy = point.value - mean_y;
            numerator += dx * dy;
            denominator += dx * dx;
            ss_total += dy * dy;
        }

        if denominator == 0.0 {
            return None;
        }

        let slope = numerator / denominator;
        let intercept = slope.mul_add(-mean_x, mean_y);

        let ss_residual: f64 = series
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let residual = point.value - slope.mul_add(i as f64, intercept);
                residual * residual
            })
            .sum();

        let correlation =
            (ss_total > 0.0).then(|| (1.0 - ss_residual / ss_total).max(0.0).sqrt());

        Some(RegressionResult {
            slope,
            intercept,
            correlation,
            point_count: series.len(),
        })
    }

    /// Classify the trend with the default stability threshold
    #[must_use]
    pub fn classify_trend(series: &[DailyPoint]) -> TrendDirection {
        Self::classify_trend_with_threshold(series, STABILITY_THRESHOLD_KG_PER_DAY)
    }

    /// Classify the trend of a series
    ///
    /// Fewer than seven points, no fit, or `|slope| < threshold` is stable.
    #[must_use]
    pub fn classify_trend_with_threshold(
        series: &[DailyPoint],
        stability_threshold: f64,
    ) -> TrendDirection {
        if series.len() < MIN_POINTS_FOR_CLASSIFICATION {
            return TrendDirection::Stable;
        }

        let Some(regression) = Self::linear_regression(series) else {
            return TrendDirection::Stable;
        };

        if regression.slope.abs() < stability_threshold {
            TrendDirection::Stable
        } else if regression.slope < 0.0 {
            TrendDirection::Downward
        } else {
            TrendDirection::Upward
        }
    }
}
