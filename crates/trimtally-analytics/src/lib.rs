// ABOUTME: Weight progress analytics and achievement engine
// ABOUTME: Aggregation, trends, consistency, projection, duplicates, goals, and achievements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

#![deny(unsafe_code)]

//! # TrimTally Analytics
//!
//! Pure functions over immutable observation snapshots. Nothing here performs
//! I/O or holds shared mutable state; results are plain values that can be
//! handed across threads freely.
//!
//! Data flow: observations go through [`aggregation`] into a
//! [`DailySeries`], which feeds [`statistical_analysis`], [`consistency`] and
//! [`goal_projection`]. [`achievements`] consumes raw observations plus the
//! outputs of those components. [`goal_engine`] owns the single active goal.

/// Achievement catalog and evaluator
pub mod achievements;
/// Daily aggregation of raw observations
pub mod aggregation;
/// Micro-celebrations for goal, consistency, streak and entry milestones
pub mod celebrations;
/// Consistency score, streaks, and recent logging ratio
pub mod consistency;
/// Duplicate detection for imported observations
pub mod duplicate_detection;
/// Goal lifecycle state machine
pub mod goal_engine;
/// Goal arrival-date projection
pub mod goal_projection;
/// Plateau detection
pub mod pattern_detection;
/// Chart statistics, ranges, and goal progress percentage
pub mod series_stats;
/// Moving averages, regression, and trend classification
pub mod statistical_analysis;

pub use achievements::{
    AchievementCategory, AchievementDescriptor, AchievementDiagnostics, AchievementEvaluation,
    AchievementEvaluator, AchievementMetric, AchievementRefresh, AchievementSnapshot,
    AchievementStates, EvaluationContext,
};
pub use aggregation::{DailyAggregator, DailyPoint, DailySeries};
pub use celebrations::{CelebrationEngine, CelebrationInputs, CelebrationKind};
pub use consistency::ConsistencyScorer;
pub use duplicate_detection::{DuplicateCandidate, DuplicateDetector};
pub use goal_engine::{GoalLifecycle, GoalRequest, GoalState};
pub use goal_projection::{GoalProjection, GoalProjector};
pub use pattern_detection::{Plateau, PlateauDetector, PlateauHint};
pub use series_stats::{goal_progress_percent, ChartRange, SeriesStats};
pub use statistical_analysis::{RegressionResult, TrendDirection, TrendEngine};
