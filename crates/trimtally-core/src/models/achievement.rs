// ABOUTME: Persisted progress and unlock state for a single achievement key
// ABOUTME: Unlock timestamps are sticky and never cleared by re-evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted state for one achievement descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementState {
    /// Stable descriptor key (e.g. `streak.week`)
    pub key: String,
    /// Latest progress in `0..=1`
    pub progress: f64,
    /// First instant the achievement was visibly unlocked
    pub unlocked_at: Option<DateTime<Utc>>,
    /// Last time the state changed during evaluation
    pub last_evaluated_at: DateTime<Utc>,
    /// Whether the descriptor requires an entitlement
    pub is_premium: bool,
    /// Whether the unlock has been celebrated in the UI
    pub did_celebrate_unlock: bool,
}

impl AchievementState {
    /// Fresh, locked state
    #[must_use]
    pub fn new(key: impl Into<String>, is_premium: bool, now: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            progress: 0.0,
            unlocked_at: None,
            last_evaluated_at: now,
            is_premium,
            did_celebrate_unlock: false,
        }
    }

    /// Whether the achievement has ever been unlocked
    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }

    /// Apply an evaluation result; returns whether anything changed
    ///
    /// Progress is clamped to `0..=1`. `unlocked_at` is only ever set, never
    /// cleared, so a regressing metric keeps its unlock.
    pub fn apply(&mut self, progress: f64, unlocked: bool, now: DateTime<Utc>) -> bool {
        let clamped = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let mut changed = false;
        if (self.progress - clamped).abs() > f64::EPSILON {
            self.progress = clamped;
            changed = true;
        }
        if unlocked && self.unlocked_at.is_none() {
            self.unlocked_at = Some(now);
            changed = true;
        }
        if changed {
            self.last_evaluated_at = now;
        }
        changed
    }
}
