// ABOUTME: Detects imported observations that repeat an existing same-day entry
// ABOUTME: A match needs both a close value and a close timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trimtally_core::constants::duplicates::DUPLICATE_WINDOW_SECONDS;
use trimtally_core::models::Observation;

/// An observation about to be recorded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCandidate {
    /// Mass in kilograms
    pub value_kg: f64,
    /// Measurement instant
    pub timestamp: DateTime<Utc>,
}

impl DuplicateCandidate {
    /// Create a candidate
    #[must_use]
    pub const fn new(value_kg: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            value_kg,
            timestamp,
        }
    }
}

/// Duplicate detection engine
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Whether `candidate` duplicates one of `same_day` observations
    ///
    /// `same_day` must already be restricted to the candidate's normalized
    /// day. When `enabled` is false the check is skipped and the candidate is
    /// never a duplicate.
    #[must_use]
    pub fn is_duplicate(
        candidate: &DuplicateCandidate,
        same_day: &[Observation],
        tolerance_kg: f64,
        enabled: bool,
    ) -> bool {
        enabled
            && same_day
                .iter()
                .any(|existing| Self::matches(candidate, existing, tolerance_kg))
    }

    /// First existing observation that `candidate` duplicates
    #[must_use]
    pub fn find_match<'a>(
        candidate: &DuplicateCandidate,
        same_day: &'a [Observation],
        tolerance_kg: f64,
    ) -> Option<&'a Observation> {
        same_day
            .iter()
            .find(|existing| Self::matches(candidate, existing, tolerance_kg))
    }

    fn matches(candidate: &DuplicateCandidate, existing: &Observation, tolerance_kg: f64) -> bool {
        let value_gap = (existing.value_kg - candidate.value_kg).abs();
        let time_gap_ms = (existing.timestamp - candidate.timestamp)
            .num_milliseconds()
            .abs();
        value_gap <= tolerance_kg && time_gap_ms <= DUPLICATE_WINDOW_SECONDS * 1000
    }
}
