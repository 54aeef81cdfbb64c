// ABOUTME: Weight goal model with lifecycle metadata
// ABOUTME: One goal is active at a time; inactive goals are immutable history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Why a goal stopped being open
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompletionReason {
    /// Target weight was reached
    Achieved,
    /// Superseded by a newer goal
    Changed,
    /// Given up by the user
    Abandoned,
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Achieved => write!(f, "achieved"),
            Self::Changed => write!(f, "changed"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// A target weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,
    /// Target weight in kilograms
    pub target_kg: f64,
    /// Weight when the goal was set; denominator for progress
    pub start_kg: Option<f64>,
    /// When the goal was set
    pub start_date: DateTime<Utc>,
    /// Optional date the user hopes to reach the target by
    pub target_date: Option<NaiveDate>,
    /// Whether this is the current goal
    pub is_active: bool,
    /// When the goal was achieved or archived
    pub completed_date: Option<DateTime<Utc>>,
    /// Why the goal was completed
    pub completion_reason: Option<CompletionReason>,
    /// User notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new active goal
    #[must_use]
    pub fn new(target_kg: f64, start_kg: Option<f64>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_kg,
            start_kg,
            start_date: now,
            target_date: None,
            is_active: true,
            completed_date: None,
            completion_reason: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the goal has been marked achieved
    #[must_use]
    pub fn is_achieved(&self) -> bool {
        self.completion_reason == Some(CompletionReason::Achieved)
    }

    /// Record achievement; the goal stays active until superseded
    pub fn mark_achieved(&mut self, now: DateTime<Utc>) {
        self.completed_date = Some(now);
        self.completion_reason = Some(CompletionReason::Achieved);
        self.updated_at = now;
    }

    /// Move the goal into history with the given reason
    pub fn archive(&mut self, reason: CompletionReason, now: DateTime<Utc>) {
        self.is_active = false;
        self.completed_date = Some(now);
        self.completion_reason = Some(reason);
        self.updated_at = now;
    }

    /// Deactivate an achieved goal, keeping its reason and completion date
    pub fn retire_achieved(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.completed_date = self.completed_date.or(Some(now));
        self.updated_at = now;
    }
}
