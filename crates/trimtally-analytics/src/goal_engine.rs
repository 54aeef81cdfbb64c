// ABOUTME: Goal lifecycle state machine with automatic completion on observations
// ABOUTME: Keeps at most one active goal and hands out each achievement celebration once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! # Goal Lifecycle
//!
//! A goal is created `Active`, may be marked achieved while staying active,
//! and is archived when abandoned or superseded. Archived goals are history
//! and never change again.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use trimtally_core::constants::goals::ACHIEVEMENT_TOLERANCE_KG;
use trimtally_core::errors::GoalError;
use trimtally_core::models::{CompletionReason, Goal};
use uuid::Uuid;

/// Lifecycle state of the goal system or of a single goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalState {
    /// No goal is active
    NoActiveGoal,
    /// A goal is active (possibly already achieved)
    Active,
    /// The goal is history
    Archived,
}

impl GoalState {
    /// State of an individual goal
    #[must_use]
    pub const fn of(goal: &Goal) -> Self {
        if goal.is_active {
            Self::Active
        } else {
            Self::Archived
        }
    }
}

/// Parameters for a new goal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoalRequest {
    /// Target weight in kilograms
    pub target_kg: f64,
    /// Explicit starting weight; falls back to the current weight
    pub starting_kg: Option<f64>,
    /// Optional date the user hopes to reach the target by
    pub target_date: Option<NaiveDate>,
    /// User notes
    pub notes: Option<String>,
}

impl GoalRequest {
    /// Request a goal for `target_kg`
    #[must_use]
    pub fn new(target_kg: f64) -> Self {
        Self {
            target_kg,
            ..Self::default()
        }
    }

    /// Use an explicit starting weight
    #[must_use]
    pub const fn starting_at(mut self, starting_kg: f64) -> Self {
        self.starting_kg = Some(starting_kg);
        self
    }

    /// Set a target date
    #[must_use]
    pub const fn by(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Attach notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// All goals plus the pending achievement celebration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalLifecycle {
    goals: Vec<Goal>,
    pending_celebration: Option<Uuid>,
}

impl GoalLifecycle {
    /// Empty lifecycle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted goals
    ///
    /// If more than one goal is marked active, only the one with the latest
    /// start date stays active; the rest are archived as changed.
    #[must_use]
    pub fn from_goals(mut goals: Vec<Goal>, now: DateTime<Utc>) -> Self {
        let newest_active = goals
            .iter()
            .filter(|g| g.is_active)
            .max_by_key(|g| g.start_date)
            .map(|g| g.id);

        for goal in goals
            .iter_mut()
            .filter(|g| g.is_active && Some(g.id) != newest_active)
        {
            warn!(goal_id = %goal.id, "multiple active goals restored, archiving older one");
            if goal.is_achieved() {
                goal.retire_achieved(now);
            } else {
                goal.archive(CompletionReason::Changed, now);
            }
        }

        Self {
            goals,
            pending_celebration: None,
        }
    }

    /// Whether a goal is currently active
    #[must_use]
    pub fn state(&self) -> GoalState {
        if self.active().is_some() {
            GoalState::Active
        } else {
            GoalState::NoActiveGoal
        }
    }

    /// The active goal, if any
    #[must_use]
    pub fn active(&self) -> Option<&Goal> {
        self.goals.iter().find(|g| g.is_active)
    }

    fn active_mut(&mut self) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.is_active)
    }

    /// Every goal ever created, in creation order
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Inactive goals, newest start date first
    #[must_use]
    pub fn history(&self) -> Vec<&Goal> {
        let mut history: Vec<&Goal> = self.goals.iter().filter(|g| !g.is_active).collect();
        history.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        history
    }

    /// Goals completed with reason achieved, active or archived
    #[must_use]
    pub fn achieved_count(&self) -> usize {
        self.goals.iter().filter(|g| g.is_achieved()).count()
    }

    /// Create a new active goal, superseding the current one
    ///
    /// The starting weight is the request's explicit value, else
    /// `current_weight`. When neither exists the call fails with
    /// [`GoalError::MissingStartingWeight`] and nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not a positive finite number or no
    /// starting weight can be resolved.
    pub fn set_goal(
        &mut self,
        request: GoalRequest,
        current_weight: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<&Goal, GoalError> {
        if !request.target_kg.is_finite() || request.target_kg <= 0.0 {
            return Err(GoalError::InvalidTarget(request.target_kg.to_string()));
        }
        let starting_kg = request
            .starting_kg
            .or(current_weight)
            .ok_or(GoalError::MissingStartingWeight)?;

        if let Some(previous) = self.active_mut() {
            if previous.is_achieved() {
                previous.retire_achieved(now);
            } else {
                previous.archive(CompletionReason::Changed, now);
            }
            info!(goal_id = %previous.id, "previous goal archived");
        }

        let mut goal = Goal::new(request.target_kg, Some(starting_kg), now);
        goal.target_date = request.target_date;
        goal.notes = request.notes;
        info!(
            goal_id = %goal.id,
            target_kg = goal.target_kg,
            starting_kg,
            "goal set"
        );
        self.goals.push(goal);

        let index = self.goals.len() - 1;
        Ok(&self.goals[index])
    }

    /// Complete the active goal
    ///
    /// `Achieved` keeps the goal active and queues a celebration; any other
    /// reason archives it. Returns the affected goal, or `None` when no goal
    /// is active.
    pub fn complete_goal(&mut self, reason: CompletionReason, now: DateTime<Utc>) -> Option<&Goal> {
        let goal = self.goals.iter_mut().find(|g| g.is_active)?;
        if reason == CompletionReason::Achieved {
            goal.mark_achieved(now);
            self.pending_celebration = Some(goal.id);
        } else {
            goal.archive(reason, now);
        }
        info!(goal_id = %goal.id, %reason, "goal completed");
        Some(&*goal)
    }

    /// Check the active goal against a new current weight
    ///
    /// Fires at most once per goal: once achieved, later observations are
    /// ignored. `fallback_start_kg` stands in when the goal has no starting
    /// weight. Returns whether the goal was completed by this call.
    pub fn record_observation(
        &mut self,
        current_kg: f64,
        fallback_start_kg: Option<f64>,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(goal) = self.active() else {
            return false;
        };
        if goal.completed_date.is_some() {
            return false;
        }
        let Some(start_kg) = goal.start_kg.or(fallback_start_kg) else {
            return false;
        };
        if !Self::meets_target(start_kg, goal.target_kg, current_kg) {
            return false;
        }

        self.complete_goal(CompletionReason::Achieved, now).is_some()
    }

    /// Whether `current_kg` reaches `target_kg` given the direction of travel
    #[must_use]
    pub fn meets_target(start_kg: f64, target_kg: f64, current_kg: f64) -> bool {
        if start_kg > target_kg {
            current_kg <= target_kg + ACHIEVEMENT_TOLERANCE_KG
        } else if start_kg < target_kg {
            current_kg >= target_kg - ACHIEVEMENT_TOLERANCE_KG
        } else {
            (current_kg - target_kg).abs() <= ACHIEVEMENT_TOLERANCE_KG
        }
    }

    /// Consume the pending goal celebration
    ///
    /// Returns true at most once per achievement, and only while that goal is
    /// still recorded as achieved.
    pub fn take_goal_celebration(&mut self) -> bool {
        let Some(goal_id) = self.pending_celebration.take() else {
            return false;
        };
        self.goals
            .iter()
            .any(|g| g.id == goal_id && g.is_achieved())
    }
}
