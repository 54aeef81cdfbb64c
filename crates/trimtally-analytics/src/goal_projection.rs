// ABOUTME: Projects the date a weight goal will be reached from the current trend
// ABOUTME: Applies a volatility guard and vetoes projections that move away from the target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally
#![allow(clippy::cast_possible_truncation)] // Safe: days_to_goal is bounded by MAX_PROJECTION_DAYS

use crate::aggregation::DailyPoint;
use crate::statistical_analysis::TrendEngine;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use trimtally_core::constants::projection::{
    GOAL_REACHED_DISTANCE_KG, MAX_PROJECTION_DAYS, VOLATILE_POINTS_DROPPED, VOLATILITY_THRESHOLD,
};
use trimtally_core::constants::trend::STABILITY_THRESHOLD_KG_PER_DAY;

/// Projected goal date and the fit that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProjection {
    /// Day the target is expected to be reached
    pub projected_date: NaiveDate,
    /// Whole index steps from the last fitted point to the target
    pub days_to_goal: i64,
    /// Regression slope the projection used
    pub slope_kg_per_day: f64,
    /// Whether the two most recent points were dropped as noise
    pub excluded_volatile_points: bool,
}

/// Goal date projection engine
pub struct GoalProjector;

impl GoalProjector {
    /// Project with the default stability threshold
    #[must_use]
    pub fn project(
        series: &[DailyPoint],
        target_kg: f64,
        min_days: usize,
    ) -> Option<GoalProjection> {
        Self::project_with_threshold(series, target_kg, min_days, STABILITY_THRESHOLD_KG_PER_DAY)
    }

    /// Project the date `target_kg` will be reached
    ///
    /// Returns `None` when data is short, the trend is flat, the trend moves
    /// away from the target, or the horizon falls outside `(0, 3650)` days.
    #[must_use]
    pub fn project_with_threshold(
        series: &[DailyPoint],
        target_kg: f64,
        min_days: usize,
        stability_threshold: f64,
    ) -> Option<GoalProjection> {
        if series.len() < min_days {
            return None;
        }

        let excluded_volatile_points = Self::is_volatile(series);
        let fitted = if excluded_volatile_points {
            let reduced = &series[..series.len() - VOLATILE_POINTS_DROPPED];
            debug!(
                original = series.len(),
                reduced = reduced.len(),
                "volatility guard dropped most recent points"
            );
            if reduced.len() < min_days {
                return None;
            }
            reduced
        } else {
            series
        };

        let regression = TrendEngine::linear_regression(fitted)?;
        let slope = regression.slope;
        if slope.abs() < stability_threshold {
            return None;
        }

        let last = fitted.last()?;
        let delta = target_kg - last.value;
        if (delta > 0.0 && slope < 0.0) || (delta < 0.0 && slope > 0.0) {
            debug!(delta, slope, "trend moving away from target");
            return None;
        }

        if delta.abs() < GOAL_REACHED_DISTANCE_KG {
            return Some(GoalProjection {
                projected_date: last.day,
                days_to_goal: 0,
                slope_kg_per_day: slope,
                excluded_volatile_points,
            });
        }

        let days_to_goal = delta / slope;
        let within_horizon = days_to_goal > 0.0 && days_to_goal < MAX_PROJECTION_DAYS;
        if !within_horizon {
            return None;
        }

        let whole_days = days_to_goal.trunc() as i64;
        let projected_date = last.day.checked_add_signed(Duration::days(whole_days))?;

        Some(GoalProjection {
            projected_date,
            days_to_goal: whole_days,
            slope_kg_per_day: slope,
            excluded_volatile_points,
        })
    }

    fn is_volatile(series: &[DailyPoint]) -> bool {
        if series.len() < 3 {
            return false;
        }
        let last = series[series.len() - 1].value;
        let third_last = series[series.len() - 3].value;
        if third_last == 0.0 {
            return false;
        }
        ((last - third_last) / third_last).abs() > VOLATILITY_THRESHOLD
    }
}
