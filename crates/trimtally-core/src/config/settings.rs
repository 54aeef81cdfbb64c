// ABOUTME: Settings snapshot consumed by the analytics engine
// ABOUTME: Replaces the singleton settings row with an explicitly passed, validated struct
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use crate::constants::defaults;
use crate::errors::ConfigError;
use crate::models::WeightUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How multiple observations on one day collapse into a single value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DailyAggregationMode {
    /// Use the chronologically last observation of the day
    #[default]
    Latest,
    /// Use the arithmetic mean of the day's observations
    Average,
}

impl fmt::Display for DailyAggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Average => write!(f, "average"),
        }
    }
}

impl FromStr for DailyAggregationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "average" | "mean" => Ok(Self::Average),
            other => Err(format!("unknown aggregation mode: {other}")),
        }
    }
}

/// Engine-relevant subset of the application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Daily aggregation mode
    pub daily_aggregation_mode: DailyAggregationMode,
    /// Rolling consistency window in days (at least 1)
    pub consistency_window_days: u32,
    /// Minimum daily points before a goal date is projected
    pub min_days_for_projection: usize,
    /// Maximum weight difference (kg) for an import to count as a duplicate
    pub duplicate_tolerance_kg: f64,
    /// Whether imported duplicates are detected and skipped
    pub auto_hide_duplicates: bool,
    /// Preferred display unit
    pub preferred_unit: WeightUnit,
    /// Simple moving average period (days)
    pub moving_average_period: usize,
    /// Exponential moving average period (days)
    pub ema_period: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_aggregation_mode: DailyAggregationMode::Latest,
            consistency_window_days: defaults::CONSISTENCY_WINDOW_DAYS,
            min_days_for_projection: defaults::MIN_DAYS_FOR_PROJECTION,
            duplicate_tolerance_kg: defaults::DUPLICATE_TOLERANCE_KG,
            auto_hide_duplicates: true,
            preferred_unit: WeightUnit::Pounds,
            moving_average_period: defaults::MOVING_AVERAGE_PERIOD,
            ema_period: defaults::EMA_PERIOD,
        }
    }
}

impl Settings {
    /// Validate ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` for a zero consistency window, a
    /// negative or non-finite duplicate tolerance, or a zero averaging period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consistency_window_days < 1 {
            return Err(ConfigError::OutOfRange {
                field: "consistency_window_days",
                reason: "must be at least 1".into(),
            });
        }
        if !self.duplicate_tolerance_kg.is_finite() || self.duplicate_tolerance_kg < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "duplicate_tolerance_kg",
                reason: format!(
                    "must be a non-negative number, got {}",
                    self.duplicate_tolerance_kg
                ),
            });
        }
        if self.moving_average_period == 0 {
            return Err(ConfigError::OutOfRange {
                field: "moving_average_period",
                reason: "must be at least 1".into(),
            });
        }
        if self.ema_period == 0 {
            return Err(ConfigError::OutOfRange {
                field: "ema_period",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
