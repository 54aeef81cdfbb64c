// ABOUTME: Micro-celebrations for goal progress, consistency, first streak, and entry milestones
// ABOUTME: The caller owns the set of already-shown kinds; this module only decides what is due
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use crate::consistency::ConsistencyScorer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const FIRST_STREAK_DAYS: usize = 7;
const ENTRY_MILESTONE: usize = 10;

/// A one-off celebration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationKind {
    /// A quarter of the way to the goal
    Goal25Percent,
    /// Halfway to the goal
    Goal50Percent,
    /// Three quarters of the way to the goal
    Goal75Percent,
    /// Goal reached
    Goal100Percent,
    /// Consistency score of 85% or more
    Consistency85,
    /// Consistency score of 70% or more
    Consistency70,
    /// The seven most recent logged days are consecutive
    FirstWeekStreak,
    /// Ten entries logged
    TenEntries,
}

impl CelebrationKind {
    const GOAL_MILESTONES: [(f64, Self); 4] = [
        (0.25, Self::Goal25Percent),
        (0.50, Self::Goal50Percent),
        (0.75, Self::Goal75Percent),
        (1.00, Self::Goal100Percent),
    ];

    const CONSISTENCY_MILESTONES: [(f64, Self); 2] =
        [(0.85, Self::Consistency85), (0.70, Self::Consistency70)];

    /// Stable key for persisting the shown set
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Goal25Percent => "goal_25_percent",
            Self::Goal50Percent => "goal_50_percent",
            Self::Goal75Percent => "goal_75_percent",
            Self::Goal100Percent => "goal_100_percent",
            Self::Consistency85 => "consistency_85",
            Self::Consistency70 => "consistency_70",
            Self::FirstWeekStreak => "first_week_streak",
            Self::TenEntries => "ten_entries",
        }
    }

    /// Short message shown with the celebration
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Goal25Percent => "Quarter way there, steady progress!",
            Self::Goal50Percent => "Halfway to your goal, keep it up!",
            Self::Goal75Percent => "Three quarters there, you're doing great!",
            Self::Goal100Percent => "Goal achieved, congratulations!",
            Self::Consistency85 => "85% consistency, excellent dedication!",
            Self::Consistency70 => "70% consistency, building a solid habit!",
            Self::FirstWeekStreak => "Nice streak forming: 7 days of consistency!",
            Self::TenEntries => "Great progress: 10 entries logged!",
        }
    }
}

impl fmt::Display for CelebrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Snapshot the celebration checks run against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CelebrationInputs {
    /// Fraction of the way from start to target, if a goal is active
    pub goal_progress: Option<f64>,
    /// Rolling consistency score, if one can be computed
    pub consistency_score: Option<f64>,
    /// Distinct logged days
    pub logged_days: BTreeSet<NaiveDate>,
    /// Visible observation count
    pub entry_count: usize,
}

/// Celebration decision engine
pub struct CelebrationEngine;

impl CelebrationEngine {
    /// Fraction of the distance covered, `|current - start| / |target - start|`
    ///
    /// `None` when start equals target.
    #[must_use]
    pub fn goal_progress(start_kg: f64, current_kg: f64, target_kg: f64) -> Option<f64> {
        let total_change = target_kg - start_kg;
        if total_change == 0.0 {
            return None;
        }
        Some(((current_kg - start_kg) / total_change).abs())
    }

    /// The highest-priority celebration not yet shown
    ///
    /// Goal milestones come first, then consistency, then the first streak,
    /// then the entry milestone. Nothing is due without any entries.
    #[must_use]
    pub fn next(
        inputs: &CelebrationInputs,
        shown: &BTreeSet<CelebrationKind>,
    ) -> Option<CelebrationKind> {
        Self::newly_crossed(inputs, shown).into_iter().next()
    }

    /// Every crossed celebration not yet shown, in priority order
    #[must_use]
    pub fn newly_crossed(
        inputs: &CelebrationInputs,
        shown: &BTreeSet<CelebrationKind>,
    ) -> Vec<CelebrationKind> {
        if inputs.entry_count == 0 {
            return Vec::new();
        }

        let mut crossed = Vec::new();

        if let Some(progress) = inputs.goal_progress {
            crossed.extend(
                CelebrationKind::GOAL_MILESTONES
                    .iter()
                    .filter(|(threshold, _)| progress >= *threshold)
                    .map(|(_, kind)| *kind),
            );
        }

        if let Some(score) = inputs.consistency_score {
            crossed.extend(
                CelebrationKind::CONSISTENCY_MILESTONES
                    .iter()
                    .filter(|(threshold, _)| score >= *threshold)
                    .map(|(_, kind)| *kind),
            );
        }

        if ConsistencyScorer::has_consecutive_run(&inputs.logged_days, FIRST_STREAK_DAYS) {
            crossed.push(CelebrationKind::FirstWeekStreak);
        }

        if inputs.entry_count >= ENTRY_MILESTONE {
            crossed.push(CelebrationKind::TenEntries);
        }

        crossed.retain(|kind| !shown.contains(kind));
        crossed
    }
}
