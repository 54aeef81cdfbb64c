// ABOUTME: Plateau detection over the trailing window of a daily weight series
// ABOUTME: Flags two weeks of near-flat weight and skips plateaus the user already dismissed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally
#![allow(clippy::cast_precision_loss)] // Safe: window length is 14

use crate::aggregation::DailyPoint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;
use trimtally_core::constants::plateau::{CHANGE_THRESHOLD, MINIMUM_DAYS, STABLE_HINT_PERCENT};

/// How to read a detected plateau
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateauHint {
    /// Weight held almost perfectly flat
    Stable,
    /// Flat overall but with day-to-day fluctuation
    Fluctuation,
}

/// A detected plateau
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plateau {
    /// First day of the inspected window
    pub start_day: NaiveDate,
    /// Number of daily points inspected
    pub duration_days: usize,
    /// Mean value over the window (kg)
    pub average_kg: f64,
    /// `|last - first| / first` as a percentage
    pub change_percent: f64,
}

impl Plateau {
    /// Hint for the user
    #[must_use]
    pub fn hint(&self) -> PlateauHint {
        if self.change_percent < STABLE_HINT_PERCENT {
            PlateauHint::Stable
        } else {
            PlateauHint::Fluctuation
        }
    }

    /// Key used to remember a dismissal (`yyyy-MM-dd` of the start day)
    #[must_use]
    pub fn dismissal_key(&self) -> String {
        self.start_day.format("%Y-%m-%d").to_string()
    }
}

/// Plateau detection engine
pub struct PlateauDetector;

impl PlateauDetector {
    /// Inspect the last 14 daily points for a plateau
    ///
    /// A plateau is a change of at most 0.5% between the first and last point
    /// of the window. Returns `None` for shorter series.
    #[must_use]
    pub fn detect(series: &[DailyPoint]) -> Option<Plateau> {
        if series.len() < MINIMUM_DAYS {
            return None;
        }

        let window = &series[series.len() - MINIMUM_DAYS..];
        let first = window.first()?;
        let last = window.last()?;
        if first.value == 0.0 {
            return None;
        }

        let average_kg = window.iter().map(|p| p.value).sum::<f64>() / window.len() as f64;
        let change_percent = ((last.value - first.value) / first.value).abs() * 100.0;

        if change_percent > CHANGE_THRESHOLD * 100.0 {
            return None;
        }

        debug!(start = %first.day, change_percent, "plateau detected");
        Some(Plateau {
            start_day: first.day,
            duration_days: MINIMUM_DAYS,
            average_kg,
            change_percent,
        })
    }

    /// Detect a plateau unless its start day is in `dismissed`
    #[must_use]
    pub fn detect_undismissed(
        series: &[DailyPoint],
        dismissed: &BTreeSet<String>,
    ) -> Option<Plateau> {
        Self::detect(series).filter(|plateau| !dismissed.contains(&plateau.dismissal_key()))
    }
}
