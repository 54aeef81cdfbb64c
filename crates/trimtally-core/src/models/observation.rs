// ABOUTME: Weight observation model with source and display metadata
// ABOUTME: Normalized day is derived through a Clock and recomputed on demand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use super::WeightUnit;
use crate::clock::Clock;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Where an observation came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    /// Typed in by the user
    #[default]
    Manual,
    /// Pulled from an external health store
    Imported,
}

impl EntrySource {
    /// Stable lowercase identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Imported => "imported",
        }
    }
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single weight measurement
///
/// `normalized_day` is the local start-of-day of `timestamp` at the time the
/// observation was created. Aggregation does not trust it: day grouping is
/// always recomputed with [`Observation::local_day`] so that a timezone change
/// shifts day boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Unique identifier
    pub id: Uuid,
    /// Instant the weight was measured
    pub timestamp: DateTime<Utc>,
    /// Local calendar day of `timestamp` when stored
    pub normalized_day: NaiveDate,
    /// Mass in kilograms
    pub value_kg: f64,
    /// Unit shown to the user when the entry was recorded
    #[serde(default)]
    pub display_unit_at_entry: WeightUnit,
    /// Manual or imported
    #[serde(default)]
    pub source: EntrySource,
    /// Free-form user notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Hidden observations stay stored but are excluded from analytics
    #[serde(default)]
    pub is_hidden: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Observation {
    /// Create a visible manual observation, normalizing its day with `clock`
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, value_kg: f64, clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            id: Uuid::new_v4(),
            timestamp,
            normalized_day: clock.local_day(timestamp),
            value_kg,
            display_unit_at_entry: WeightUnit::Kilograms,
            source: EntrySource::Manual,
            notes: None,
            is_hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the entry source
    #[must_use]
    pub const fn with_source(mut self, source: EntrySource) -> Self {
        self.source = source;
        self
    }

    /// Set the display unit recorded at entry time
    #[must_use]
    pub const fn with_display_unit(mut self, unit: WeightUnit) -> Self {
        self.display_unit_at_entry = unit;
        self
    }

    /// Attach notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Mark hidden
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    /// Local calendar day of this observation under the clock's current timezone
    #[must_use]
    pub fn local_day(&self, clock: &dyn Clock) -> NaiveDate {
        clock.local_day(self.timestamp)
    }

    /// Recompute the stored normalized day for the clock's current timezone
    pub fn renormalize(&mut self, clock: &dyn Clock) {
        self.normalized_day = self.local_day(clock);
    }

    /// Weight in the unit recorded at entry time
    #[must_use]
    pub fn display_value(&self) -> f64 {
        self.display_unit_at_entry.from_kg(self.value_kg)
    }

    /// Whether this observation participates in analytics
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !self.is_hidden
    }
}
