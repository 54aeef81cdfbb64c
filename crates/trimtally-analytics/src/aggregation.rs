// ABOUTME: Collapses raw weight observations into one value per local calendar day
// ABOUTME: Hidden observations are skipped and day boundaries are recomputed through the clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use trimtally_core::config::DailyAggregationMode;
use trimtally_core::models::Observation;
use trimtally_core::Clock;

/// One aggregated value for a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Local calendar day
    pub day: NaiveDate,
    /// Aggregated value (kg)
    pub value: f64,
}

impl DailyPoint {
    /// Create a point
    #[must_use]
    pub const fn new(day: NaiveDate, value: f64) -> Self {
        Self { day, value }
    }
}

/// Day-indexed series, strictly increasing by day with no repeated days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries(Vec<DailyPoint>);

impl DailySeries {
    /// Build a series from arbitrary points
    ///
    /// Points are sorted by day; when a day repeats, the point supplied last
    /// wins.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = DailyPoint>) -> Self {
        let by_day: BTreeMap<NaiveDate, f64> =
            points.into_iter().map(|p| (p.day, p.value)).collect();
        Self(
            by_day
                .into_iter()
                .map(|(day, value)| DailyPoint::new(day, value))
                .collect(),
        )
    }

    /// Points in ascending day order
    #[must_use]
    pub fn points(&self) -> &[DailyPoint] {
        &self.0
    }

    /// Number of days with data
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent point
    #[must_use]
    pub fn last(&self) -> Option<&DailyPoint> {
        self.0.last()
    }

    /// Values in day order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|p| p.value)
    }

    /// Consume into the underlying points
    #[must_use]
    pub fn into_points(self) -> Vec<DailyPoint> {
        self.0
    }
}

impl AsRef<[DailyPoint]> for DailySeries {
    fn as_ref(&self) -> &[DailyPoint] {
        &self.0
    }
}

/// Daily aggregation engine
pub struct DailyAggregator;

impl DailyAggregator {
    /// Aggregate visible observations into one value per local day
    ///
    /// Within a day observations are ordered by timestamp; `Latest` keeps the
    /// last value, `Average` the arithmetic mean. Days without observations
    /// are simply absent.
    #[must_use]
    pub fn aggregate(
        observations: &[Observation],
        mode: DailyAggregationMode,
        clock: &dyn Clock,
    ) -> DailySeries {
        let mut groups: BTreeMap<NaiveDate, Vec<&Observation>> = BTreeMap::new();
        for observation in observations.iter().filter(|o| o.is_visible()) {
            groups
                .entry(observation.local_day(clock))
                .or_default()
                .push(observation);
        }

        let points = groups
            .into_iter()
            .filter_map(|(day, mut entries)| {
                entries.sort_by_key(|o| o.timestamp);
                let value = match mode {
                    DailyAggregationMode::Latest => entries.last()?.value_kg,
                    DailyAggregationMode::Average => {
                        entries.iter().map(|o| o.value_kg).sum::<f64>() / entries.len() as f64
                    }
                };
                Some(DailyPoint::new(day, value))
            })
            .collect();

        DailySeries(points)
    }

    /// Distinct local days with at least one visible observation
    #[must_use]
    pub fn logged_days(
        observations: &[Observation],
        clock: &dyn Clock,
    ) -> BTreeSet<NaiveDate> {
        observations
            .iter()
            .filter(|o| o.is_visible())
            .map(|o| o.local_day(clock))
            .collect()
    }
}
