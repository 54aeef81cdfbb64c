// ABOUTME: Achievement catalog and evaluator over logging, streak, habit, and goal metrics
// ABOUTME: Produces progress and unlock state with premium gating and sticky unlocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally
#![allow(clippy::cast_precision_loss)] // Safe: counts are far below 2^52

//! # Achievements
//!
//! Each [`AchievementDescriptor`] pairs a stable key with an
//! [`AchievementMetric`]. Evaluation is a single match over the metric and
//! yields `(progress, unlocked)`. Refreshing folds those results into the
//! persisted [`AchievementState`] map, where an unlock, once recorded, is never
//! cleared.

use self::AchievementCategory::{Goals, Habits, Logging, Streaks};
use self::AchievementMetric::{
    Consistency, GoalsAchieved, ReminderConsistency, RemindersEnabled, StreakDays, TotalEntries,
    UniqueDays,
};
use crate::aggregation::DailyAggregator;
use crate::consistency::ConsistencyScorer;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};
use trimtally_core::models::{AchievementState, Observation, ReminderSchedule};
use trimtally_core::Clock;

/// Persisted achievement states keyed by descriptor key
pub type AchievementStates = BTreeMap<String, AchievementState>;

/// Grouping used by achievement lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Entry counts
    Logging,
    /// Consecutive-day streaks
    Streaks,
    /// Long-term habits, consistency, and reminders
    Habits,
    /// Goals reached
    Goals,
}

/// What an achievement measures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementMetric {
    /// Visible observation count reaches the target
    TotalEntries {
        /// Entries required
        target: u32,
    },
    /// Distinct logged days reach the target
    UniqueDays {
        /// Days required
        target: u32,
    },
    /// Current streak ending today reaches the target
    StreakDays {
        /// Streak length required
        target: u32,
    },
    /// Consistency score and history length both meet their thresholds
    Consistency {
        /// Minimum consistency score
        threshold: f64,
        /// Minimum distinct logged days
        min_days: u32,
    },
    /// Achieved goals reach the target
    GoalsAchieved {
        /// Goals required
        target: u32,
    },
    /// At least one reminder is configured
    RemindersEnabled,
    /// Share of the last 21 days with a log reaches the ratio
    ReminderConsistency {
        /// Required ratio in `0..=1`
        target_ratio: f64,
    },
}

/// Static definition of an achievement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AchievementDescriptor {
    /// Stable key
    pub key: &'static str,
    /// List grouping
    pub category: AchievementCategory,
    /// Evaluation rule
    pub metric: AchievementMetric,
    /// Whether unlocking requires an entitlement
    pub is_premium: bool,
}

const fn define(
    key: &'static str,
    category: AchievementCategory,
    metric: AchievementMetric,
    is_premium: bool,
) -> AchievementDescriptor {
    AchievementDescriptor {
        key,
        category,
        metric,
        is_premium,
    }
}

const CATALOG: [AchievementDescriptor; 16] = [
    define("logging.newcomer", Logging, TotalEntries { target: 10 }, false),
    define("logging.regular", Logging, TotalEntries { target: 50 }, false),
    define("logging.ledger", Logging, TotalEntries { target: 365 }, true),
    define("streak.week", Streaks, StreakDays { target: 7 }, false),
    define("streak.month", Streaks, StreakDays { target: 30 }, false),
    define("streak.quarter", Streaks, StreakDays { target: 90 }, true),
    define("habits.month", Habits, UniqueDays { target: 30 }, false),
    define("habits.season", Habits, UniqueDays { target: 90 }, false),
    define("habits.year", Habits, UniqueDays { target: 365 }, true),
    define(
        "consistency.solid",
        Habits,
        Consistency {
            threshold: 0.70,
            min_days: 10,
        },
        false,
    ),
    define(
        "consistency.excellent",
        Habits,
        Consistency {
            threshold: 0.90,
            min_days: 30,
        },
        true,
    ),
    define("goals.first", Goals, GoalsAchieved { target: 1 }, false),
    define("goals.triple", Goals, GoalsAchieved { target: 3 }, false),
    define("goals.major", Goals, GoalsAchieved { target: 5 }, true),
    define("reminders.enabled", Habits, RemindersEnabled, false),
    define(
        "reminders.routine",
        Habits,
        ReminderConsistency { target_ratio: 0.85 },
        false,
    ),
];

impl AchievementDescriptor {
    /// The full achievement catalog in display order
    #[must_use]
    pub const fn catalog() -> &'static [Self] {
        &CATALOG
    }

    /// Look up a descriptor by key
    #[must_use]
    pub fn find(key: &str) -> Option<&'static Self> {
        CATALOG.iter().find(|d| d.key == key)
    }
}

/// Result of evaluating one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AchievementEvaluation {
    /// Progress in `0..=1`
    pub progress: f64,
    /// Whether the metric's condition is met, before entitlement gating
    pub unlocked: bool,
}

/// Numbers every metric is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EvaluationContext {
    /// Visible observation count
    pub total_entries: usize,
    /// Distinct local days with a visible observation
    pub unique_day_count: usize,
    /// Consecutive logged days ending today
    pub current_streak: u32,
    /// Rolling consistency score; zero when there is nothing to score
    pub consistency_score: f64,
    /// Goals completed with reason achieved
    pub goals_achieved: usize,
    /// Whether a reminder time is configured
    pub reminders_enabled: bool,
    /// Share of the last 21 days with a log
    pub recent_reminder_ratio: f64,
}

impl EvaluationContext {
    /// Gather metric inputs from raw observations
    #[must_use]
    pub fn build(
        observations: &[Observation],
        consistency_window_days: u32,
        goals_achieved: usize,
        reminders: &ReminderSchedule,
        clock: &dyn Clock,
    ) -> Self {
        let logged_days = DailyAggregator::logged_days(observations, clock);
        let today = clock.today();
        Self {
            total_entries: observations.iter().filter(|o| o.is_visible()).count(),
            unique_day_count: logged_days.len(),
            current_streak: ConsistencyScorer::current_streak(&logged_days, today),
            consistency_score: ConsistencyScorer::score(
                observations,
                consistency_window_days,
                None,
                clock,
            )
            .unwrap_or(0.0),
            goals_achieved,
            reminders_enabled: reminders.is_enabled(),
            recent_reminder_ratio: ConsistencyScorer::recent_logging_ratio(&logged_days, today),
        }
    }

    /// Snapshot for diagnostics output
    #[must_use]
    pub const fn diagnostics(&self, evaluated_at: DateTime<Utc>) -> AchievementDiagnostics {
        AchievementDiagnostics {
            context: *self,
            evaluated_at,
        }
    }
}

/// Evaluation inputs as of a refresh
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AchievementDiagnostics {
    /// Inputs used
    #[serde(flatten)]
    pub context: EvaluationContext,
    /// When the refresh ran
    pub evaluated_at: DateTime<Utc>,
}

/// A descriptor joined with its persisted state after a refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementSnapshot {
    /// Static definition
    pub descriptor: AchievementDescriptor,
    /// Persisted state after this refresh
    pub state: AchievementState,
    /// Metric result before entitlement gating
    pub computed_unlocked: bool,
    /// Whether the user may unlock this achievement
    pub can_unlock: bool,
    /// Premium achievement the user is not entitled to
    pub requires_entitlement: bool,
}

impl AchievementSnapshot {
    /// Persisted progress
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.state.progress
    }

    /// Whether the achievement is visibly unlocked
    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        self.state.is_unlocked()
    }
}

/// Outcome of refreshing every descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementRefresh {
    /// One snapshot per catalog entry, in catalog order
    pub snapshots: Vec<AchievementSnapshot>,
    /// Keys that became unlocked during this refresh
    pub newly_unlocked: Vec<String>,
    /// Inputs the refresh used
    pub diagnostics: AchievementDiagnostics,
}

/// Achievement evaluation engine
pub struct AchievementEvaluator;

impl AchievementEvaluator {
    /// Evaluate a metric against the context
    #[must_use]
    pub fn evaluate(
        metric: &AchievementMetric,
        context: &EvaluationContext,
    ) -> AchievementEvaluation {
        match *metric {
            AchievementMetric::TotalEntries { target } => {
                Self::counting(context.total_entries as f64, target)
            }
            AchievementMetric::UniqueDays { target } => {
                Self::counting(context.unique_day_count as f64, target)
            }
            AchievementMetric::StreakDays { target } => {
                Self::counting(f64::from(context.current_streak), target)
            }
            AchievementMetric::GoalsAchieved { target } => {
                Self::counting(context.goals_achieved as f64, target)
            }
            AchievementMetric::Consistency {
                threshold,
                min_days,
            } => {
                let days = context.unique_day_count as f64;
                let score = context.consistency_score;
                let has_history = days >= f64::from(min_days);
                let meets_threshold = score >= threshold && score > 0.0;
                // Each requirement fills half of the bar
                let days_part = Self::fraction(days, f64::from(min_days));
                let score_part = Self::fraction(score, threshold);
                AchievementEvaluation {
                    progress: 0.5f64.mul_add(days_part, 0.5 * score_part),
                    unlocked: has_history && meets_threshold,
                }
            }
            AchievementMetric::RemindersEnabled => AchievementEvaluation {
                progress: if context.reminders_enabled { 1.0 } else { 0.0 },
                unlocked: context.reminders_enabled,
            },
            AchievementMetric::ReminderConsistency { target_ratio } => {
                let ratio = context.recent_reminder_ratio;
                AchievementEvaluation {
                    progress: Self::fraction(ratio, target_ratio).max(0.0),
                    unlocked: ratio >= target_ratio,
                }
            }
        }
    }

    fn counting(current: f64, target: u32) -> AchievementEvaluation {
        if target == 0 {
            return AchievementEvaluation {
                progress: 0.0,
                unlocked: false,
            };
        }
        let target = f64::from(target);
        AchievementEvaluation {
            progress: (current / target).min(1.0),
            unlocked: current >= target,
        }
    }

    fn fraction(current: f64, target: f64) -> f64 {
        if target <= 0.0 {
            return 1.0;
        }
        (current / target).min(1.0)
    }

    /// Re-evaluate the whole catalog and fold results into `states`
    ///
    /// Premium descriptors only unlock when `entitled`; progress is recorded
    /// either way. Missing states are created.
    pub fn refresh(
        states: &mut AchievementStates,
        context: &EvaluationContext,
        entitled: bool,
        now: DateTime<Utc>,
    ) -> AchievementRefresh {
        debug!(
            entries = context.total_entries,
            unique_days = context.unique_day_count,
            consistency = context.consistency_score,
            "refreshing achievements"
        );

        let mut snapshots = Vec::with_capacity(CATALOG.len());
        let mut newly_unlocked = Vec::new();

        for descriptor in &CATALOG {
            let evaluation = Self::evaluate(&descriptor.metric, context);
            let can_unlock = !descriptor.is_premium || entitled;

            let state = states
                .entry(descriptor.key.to_owned())
                .or_insert_with(|| {
                    AchievementState::new(descriptor.key, descriptor.is_premium, now)
                });
            if state.is_premium != descriptor.is_premium {
                state.is_premium = descriptor.is_premium;
                state.last_evaluated_at = now;
            }

            let was_unlocked = state.is_unlocked();
            state.apply(evaluation.progress, evaluation.unlocked && can_unlock, now);
            if !was_unlocked && state.is_unlocked() {
                info!(key = descriptor.key, "achievement unlocked");
                newly_unlocked.push(descriptor.key.to_owned());
            }

            snapshots.push(AchievementSnapshot {
                descriptor: *descriptor,
                state: state.clone(),
                computed_unlocked: evaluation.unlocked,
                can_unlock,
                requires_entitlement: descriptor.is_premium && !can_unlock,
            });
        }

        AchievementRefresh {
            snapshots,
            newly_unlocked,
            diagnostics: context.diagnostics(now),
        }
    }

    /// Unlocked achievements not yet celebrated, oldest unlock first
    #[must_use]
    pub fn uncelebrated(states: &AchievementStates) -> Vec<&AchievementState> {
        let mut pending: Vec<&AchievementState> = states
            .values()
            .filter(|s| s.is_unlocked() && !s.did_celebrate_unlock)
            .collect();
        pending.sort_by_key(|s| s.unlocked_at);
        pending
    }

    /// Record that an unlock was celebrated; returns whether anything changed
    pub fn mark_celebrated(states: &mut AchievementStates, key: &str) -> bool {
        match states.get_mut(key) {
            Some(state) if !state.did_celebrate_unlock => {
                state.did_celebrate_unlock = true;
                true
            }
            _ => false,
        }
    }
}
