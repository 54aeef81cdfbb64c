// ABOUTME: Summary statistics and range trimming for charted daily series
// ABOUTME: Also computes goal progress as a percentage of the planned change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally
#![allow(clippy::cast_precision_loss)] // Safe: series lengths are small

use crate::aggregation::DailyPoint;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use trimtally_core::AppError;

/// Min, max, average and range of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Lowest value
    pub min: f64,
    /// Highest value
    pub max: f64,
    /// Arithmetic mean
    pub average: f64,
    /// `max - min`
    pub range: f64,
}

impl SeriesStats {
    /// Statistics over a series; `None` when empty
    #[must_use]
    pub fn compute(series: &[DailyPoint]) -> Option<Self> {
        let first = series.first()?.value;
        let (min, max, sum) = series.iter().fold((first, first, 0.0), |(lo, hi, sum), p| {
            (lo.min(p.value), hi.max(p.value), sum + p.value)
        });
        Some(Self {
            min,
            max,
            average: sum / series.len() as f64,
            range: max - min,
        })
    }
}

/// Chart window length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartRange {
    /// Last 7 days
    Week,
    /// Last 30 days
    #[default]
    Month,
    /// Last 90 days
    Quarter,
    /// Last 365 days
    Year,
}

impl ChartRange {
    /// Window length in days
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Points within the window ending at `today` (inclusive)
    #[must_use]
    pub fn trim(self, series: &[DailyPoint], today: NaiveDate) -> Vec<DailyPoint> {
        let start = today - Duration::days(self.days() - 1);
        series
            .iter()
            .filter(|p| p.day >= start && p.day <= today)
            .copied()
            .collect()
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for ChartRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "7d" => Ok(Self::Week),
            "month" | "30d" => Ok(Self::Month),
            "quarter" | "90d" => Ok(Self::Quarter),
            "year" | "365d" => Ok(Self::Year),
            other => Err(AppError::invalid_input(format!("unknown chart range '{other}'"))),
        }
    }
}

/// Percentage of the planned change achieved so far
///
/// `(current - start) / (target - start) * 100`, capped at 100. Negative when
/// moving away from the target; `None` when start equals target.
#[must_use]
pub fn goal_progress_percent(start_kg: f64, current_kg: f64, target_kg: f64) -> Option<f64> {
    let planned = target_kg - start_kg;
    if planned == 0.0 {
        return None;
    }
    Some(((current_kg - start_kg) / planned * 100.0).min(100.0))
}
