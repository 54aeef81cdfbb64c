// ABOUTME: Weight tracker service wiring the store, settings, clock, and analytics engine
// ABOUTME: Reads immutable snapshots from collaborators and delegates all math to the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! # Weight Tracker
//!
//! [`WeightTracker`] is the host boundary. Every analytic call takes a fresh
//! snapshot from the [`ObservationStore`] and the [`SettingsProvider`], so
//! results always reflect the clock's current timezone and the latest
//! settings. The goal lifecycle and achievement states are owned here.

use crate::errors::{AppError, AppResult};
use crate::export::observations_to_csv;
use crate::import::{
    import_observations, CancellationSignal, ImportItem, ImportProgress, ImportSummary,
};
use crate::store::{ObservationStore, SettingsProvider};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info};
use trimtally_analytics::{
    AchievementEvaluator, AchievementRefresh, AchievementStates, CelebrationEngine,
    CelebrationInputs, CelebrationKind, ChartRange, ConsistencyScorer, DailyAggregator,
    DailyPoint, DailySeries, DuplicateCandidate, DuplicateDetector, EvaluationContext,
    GoalLifecycle, GoalProjection, GoalProjector, GoalRequest, Plateau, PlateauDetector,
    RegressionResult, SeriesStats, TrendDirection, TrendEngine,
};
use trimtally_core::config::Settings;
use trimtally_core::models::{
    AchievementState, CompletionReason, Goal, Observation, ReminderSchedule, WeightUnit,
};
use trimtally_core::Clock;
use uuid::Uuid;

/// Tracker service over a store, a settings provider, and a clock
pub struct WeightTracker {
    store: Arc<dyn ObservationStore>,
    settings: Arc<dyn SettingsProvider>,
    clock: Arc<dyn Clock>,
    goals: RwLock<GoalLifecycle>,
    achievements: RwLock<AchievementStates>,
    entitled: AtomicBool,
}

impl WeightTracker {
    /// Create a tracker with no goals and no achievement history
    #[must_use]
    pub fn new(
        store: Arc<dyn ObservationStore>,
        settings: Arc<dyn SettingsProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            settings,
            clock,
            goals: RwLock::new(GoalLifecycle::new()),
            achievements: RwLock::new(AchievementStates::new()),
            entitled: AtomicBool::new(false),
        }
    }

    /// Restore persisted goals
    #[must_use]
    pub fn with_goals(self, goals: Vec<Goal>) -> Self {
        let lifecycle = GoalLifecycle::from_goals(goals, self.clock.now());
        Self {
            goals: RwLock::new(lifecycle),
            ..self
        }
    }

    /// Restore persisted achievement states
    #[must_use]
    pub fn with_achievements(self, states: AchievementStates) -> Self {
        Self {
            achievements: RwLock::new(states),
            ..self
        }
    }

    /// Set whether premium achievements may unlock
    pub fn set_entitled(&self, entitled: bool) {
        self.entitled.store(entitled, Ordering::Relaxed);
    }

    /// The clock used for day boundaries
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Current settings snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the settings provider fails
    pub async fn settings(&self) -> AppResult<Settings> {
        Ok(self.settings.settings().await?)
    }

    /// Apply a settings change through the provider
    ///
    /// # Errors
    ///
    /// Returns an error if the change produces invalid settings
    pub async fn update_settings(
        &self,
        change: &(dyn for<'s> Fn(&'s mut Settings) + Send + Sync),
    ) -> AppResult<Settings> {
        Ok(self.settings.update(change).await?)
    }

    /// Replace the reminder schedule
    ///
    /// # Errors
    ///
    /// Returns an error if the settings provider fails
    pub async fn set_reminders(&self, schedule: ReminderSchedule) -> AppResult<()> {
        Ok(self.settings.set_reminders(schedule).await?)
    }

    async fn observations(&self) -> AppResult<Vec<Observation>> {
        Ok(self.store.all().await?)
    }

    // ================================
    // Observations
    // ================================

    /// Record a manual observation
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a positive finite number or the
    /// store rejects the observation
    pub async fn add_observation(
        &self,
        value_kg: f64,
        timestamp: DateTime<Utc>,
        unit: WeightUnit,
    ) -> AppResult<Observation> {
        let observation =
            Observation::new(timestamp, value_kg, self.clock.as_ref()).with_display_unit(unit);
        self.record(observation).await
    }

    /// Persist a prepared observation and re-check the active goal
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a positive finite number or the
    /// store rejects the observation
    pub async fn record(&self, observation: Observation) -> AppResult<Observation> {
        if !observation.value_kg.is_finite() || observation.value_kg <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "weight must be a positive number, got {}",
                observation.value_kg
            )));
        }
        self.store.insert(observation.clone()).await?;
        self.evaluate_goal().await?;
        Ok(observation)
    }

    async fn evaluate_goal(&self) -> AppResult<()> {
        let observations = self.observations().await?;
        let Some(current) = current_weight_of(&observations) else {
            return Ok(());
        };
        let start = start_weight_of(&observations);
        let achieved = self
            .goals
            .write()
            .await
            .record_observation(current, start, self.clock.now());
        if achieved {
            info!(current_kg = current, "active goal reached");
        }
        Ok(())
    }

    /// Hide or unhide an observation; hidden entries are excluded from analytics
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown id
    pub async fn set_hidden(&self, id: Uuid, hidden: bool) -> AppResult<Observation> {
        let observation = self.store.set_hidden(id, hidden).await?;
        debug!(%id, hidden, "observation visibility changed");
        Ok(observation)
    }

    /// Delete an observation permanently
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown id
    pub async fn delete_observation(&self, id: Uuid) -> AppResult<Observation> {
        Ok(self.store.remove(id).await?)
    }

    /// Whether a candidate repeats an existing same-day observation
    ///
    /// Always false when duplicate hiding is disabled in settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn is_duplicate(&self, candidate: &DuplicateCandidate) -> AppResult<bool> {
        let settings = self.settings().await?;
        if !settings.auto_hide_duplicates {
            return Ok(false);
        }
        let day = self.clock.local_day(candidate.timestamp);
        let same_day = self.store.for_day(day, self.clock.as_ref()).await?;
        Ok(DuplicateDetector::is_duplicate(
            candidate,
            &same_day,
            settings.duplicate_tolerance_kg,
            settings.auto_hide_duplicates,
        ))
    }

    /// Number of stored observations, hidden ones included
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn observation_count(&self) -> AppResult<usize> {
        Ok(self.store.count().await?)
    }

    /// Most recent visible weight
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn current_weight(&self) -> AppResult<Option<f64>> {
        Ok(current_weight_of(&self.observations().await?))
    }

    /// Oldest visible weight
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn start_weight(&self) -> AppResult<Option<f64>> {
        Ok(start_weight_of(&self.observations().await?))
    }

    // ================================
    // Analytics
    // ================================

    /// Daily series under the configured aggregation mode
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn daily_series(&self) -> AppResult<DailySeries> {
        let settings = self.settings().await?;
        let observations = self.observations().await?;
        Ok(DailyAggregator::aggregate(
            &observations,
            settings.daily_aggregation_mode,
            self.clock.as_ref(),
        ))
    }

    /// Simple moving average with the configured period
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn moving_average(&self) -> AppResult<Vec<DailyPoint>> {
        let period = self.settings().await?.moving_average_period;
        let series = self.daily_series().await?;
        Ok(TrendEngine::simple_moving_average(series.points(), period))
    }

    /// Exponential moving average with the configured period
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn ema(&self) -> AppResult<Vec<DailyPoint>> {
        let period = self.settings().await?.ema_period;
        let series = self.daily_series().await?;
        Ok(TrendEngine::exponential_moving_average(series.points(), period))
    }

    /// Regression over the daily series
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn regression(&self) -> AppResult<Option<RegressionResult>> {
        Ok(TrendEngine::linear_regression(self.daily_series().await?.points()))
    }

    /// Trend direction of the daily series
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn trend(&self) -> AppResult<TrendDirection> {
        Ok(TrendEngine::classify_trend(self.daily_series().await?.points()))
    }

    /// Rolling consistency score over the configured window
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn consistency_score(&self) -> AppResult<Option<f64>> {
        let window = self.settings().await?.consistency_window_days;
        let observations = self.observations().await?;
        Ok(ConsistencyScorer::score(
            &observations,
            window,
            None,
            self.clock.as_ref(),
        ))
    }

    /// Consistency since the active goal was set
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn goal_consistency_score(&self) -> AppResult<Option<f64>> {
        let Some(anchor) = self.active_goal().await.map(|g| g.start_date) else {
            return Ok(None);
        };
        let window = self.settings().await?.consistency_window_days;
        let observations = self.observations().await?;
        Ok(ConsistencyScorer::score(
            &observations,
            window,
            Some(anchor),
            self.clock.as_ref(),
        ))
    }

    /// Projected arrival date for the active goal
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn goal_projection(&self) -> AppResult<Option<GoalProjection>> {
        let Some(goal) = self.active_goal().await else {
            return Ok(None);
        };
        let min_days = self.settings().await?.min_days_for_projection;
        let series = self.daily_series().await?;
        Ok(GoalProjector::project(series.points(), goal.target_kg, min_days))
    }

    /// Chart points for a range plus their statistics
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn chart(
        &self,
        range: ChartRange,
    ) -> AppResult<(Vec<DailyPoint>, Option<SeriesStats>)> {
        let series = self.daily_series().await?;
        let points = range.trim(series.points(), self.clock.today());
        let stats = SeriesStats::compute(&points);
        Ok((points, stats))
    }

    /// Plateau over the last two weeks unless dismissed
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn plateau(&self, dismissed: &BTreeSet<String>) -> AppResult<Option<Plateau>> {
        let series = self.daily_series().await?;
        Ok(PlateauDetector::detect_undismissed(series.points(), dismissed))
    }

    // ================================
    // Goals
    // ================================

    /// The active goal
    pub async fn active_goal(&self) -> Option<Goal> {
        self.goals.read().await.active().cloned()
    }

    /// Inactive goals, newest first
    pub async fn goal_history(&self) -> Vec<Goal> {
        self.goals
            .read()
            .await
            .history()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Set a new goal, archiving the current one
    ///
    /// # Errors
    ///
    /// Returns `MISSING_STARTING_WEIGHT` when no start weight is supplied and
    /// nothing has been logged, or `INVALID_INPUT` for a bad target
    pub async fn set_goal(&self, request: GoalRequest) -> AppResult<Goal> {
        let current = self.current_weight().await?;
        let now = self.clock.now();
        let goal = self
            .goals
            .write()
            .await
            .set_goal(request, current, now)?
            .clone();
        Ok(goal)
    }

    /// Complete the active goal with a reason
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when no goal is active
    pub async fn complete_goal(&self, reason: CompletionReason) -> AppResult<Goal> {
        self.goals
            .write()
            .await
            .complete_goal(reason, self.clock.now())
            .cloned()
            .ok_or_else(|| AppError::not_found("active goal"))
    }

    /// Consume the pending goal-achieved celebration
    pub async fn take_goal_celebration(&self) -> bool {
        self.goals.write().await.take_goal_celebration()
    }

    // ================================
    // Achievements and celebrations
    // ================================

    /// Re-evaluate every achievement
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn refresh_achievements(&self) -> AppResult<AchievementRefresh> {
        let settings = self.settings().await?;
        let reminders = self.settings.reminders().await?;
        let observations = self.observations().await?;
        let goals_achieved = self.goals.read().await.achieved_count();

        let context = EvaluationContext::build(
            &observations,
            settings.consistency_window_days,
            goals_achieved,
            &reminders,
            self.clock.as_ref(),
        );
        let entitled = self.entitled.load(Ordering::Relaxed);

        let mut states = self.achievements.write().await;
        let refresh =
            AchievementEvaluator::refresh(&mut states, &context, entitled, self.clock.now());
        debug!(newly_unlocked = refresh.newly_unlocked.len(), "achievements refreshed");
        Ok(refresh)
    }

    /// Unlocked achievements awaiting a celebration
    pub async fn uncelebrated_achievements(&self) -> Vec<AchievementState> {
        AchievementEvaluator::uncelebrated(&*self.achievements.read().await)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Record that an unlock was celebrated
    pub async fn mark_achievement_celebrated(&self, key: &str) -> bool {
        AchievementEvaluator::mark_celebrated(&mut *self.achievements.write().await, key)
    }

    /// Snapshot of persisted achievement states
    pub async fn achievement_states(&self) -> AchievementStates {
        self.achievements.read().await.clone()
    }

    /// Next micro-celebration not yet in `shown`
    ///
    /// # Errors
    ///
    /// Returns an error if the store or settings provider fails
    pub async fn next_celebration(
        &self,
        shown: &BTreeSet<CelebrationKind>,
    ) -> AppResult<Option<CelebrationKind>> {
        let inputs = self.celebration_inputs().await?;
        Ok(CelebrationEngine::next(&inputs, shown))
    }

    async fn celebration_inputs(&self) -> AppResult<CelebrationInputs> {
        let observations = self.observations().await?;
        let clock = self.clock.as_ref();
        let current = current_weight_of(&observations);
        let goal_progress = self.active_goal().await.and_then(|goal| {
            let start = goal.start_kg.or_else(|| start_weight_of(&observations))?;
            CelebrationEngine::goal_progress(start, current?, goal.target_kg)
        });

        Ok(CelebrationInputs {
            goal_progress,
            consistency_score: self.consistency_score().await?,
            logged_days: DailyAggregator::logged_days(&observations, clock),
            entry_count: observations.iter().filter(|o| o.is_visible()).count(),
        })
    }

    // ================================
    // Import and export
    // ================================

    /// Import external observations chronologically
    ///
    /// # Errors
    ///
    /// Returns `CANCELLED` when `cancel` fires between items, or a store error
    pub async fn import_observations(
        &self,
        items: Vec<ImportItem>,
        progress: Option<&watch::Sender<ImportProgress>>,
        cancel: &CancellationSignal,
    ) -> AppResult<ImportSummary> {
        import_observations(self, items, progress, cancel).await
    }

    /// Full history as CSV, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn export_csv(&self) -> AppResult<String> {
        let observations = self.observations().await?;
        Ok(observations_to_csv(&observations, self.clock.as_ref()))
    }
}

fn current_weight_of(observations: &[Observation]) -> Option<f64> {
    observations
        .iter()
        .filter(|o| o.is_visible())
        .max_by_key(|o| o.timestamp)
        .map(|o| o.value_kg)
}

fn start_weight_of(observations: &[Observation]) -> Option<f64> {
    observations
        .iter()
        .filter(|o| o.is_visible())
        .min_by_key(|o| o.timestamp)
        .map(|o| o.value_kg)
}
