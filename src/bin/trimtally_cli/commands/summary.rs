// ABOUTME: Summary command for trimtally-cli
// ABOUTME: Collects trend, averages, consistency, chart statistics, and goal projection into one JSON report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};
use trimtally::{AppResult, Goal, WeightTracker};
use trimtally_analytics::{
    goal_progress_percent, ChartRange, DailyPoint, GoalProjection, GoalRequest, Plateau,
    RegressionResult, SeriesStats, TrendDirection,
};

/// Everything the summary command reports
#[derive(Debug, Serialize)]
pub struct Summary {
    entries: usize,
    days_logged: usize,
    current_kg: Option<f64>,
    start_kg: Option<f64>,
    trend: TrendDirection,
    regression: Option<RegressionResult>,
    moving_average: Option<DailyPoint>,
    ema: Option<DailyPoint>,
    consistency_score: Option<f64>,
    range: ChartRange,
    range_stats: Option<SeriesStats>,
    plateau: Option<Plateau>,
    goal: Option<GoalSummary>,
}

#[derive(Debug, Serialize)]
struct GoalSummary {
    goal: Goal,
    progress_percent: Option<f64>,
    consistency_since_start: Option<f64>,
    projection: Option<GoalProjection>,
}

/// Build the summary and print it as JSON
pub async fn run(
    tracker: &WeightTracker,
    target_kg: Option<f64>,
    range: ChartRange,
) -> AppResult<()> {
    let summary = build(tracker, target_kg, range).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn build(
    tracker: &WeightTracker,
    target_kg: Option<f64>,
    range: ChartRange,
) -> AppResult<Summary> {
    let series = tracker.daily_series().await?;
    let current_kg = tracker.current_weight().await?;
    let start_kg = tracker.start_weight().await?;
    let (_, range_stats) = tracker.chart(range).await?;

    let goal = match (target_kg, start_kg) {
        (Some(target), Some(start)) => {
            Some(goal_summary(tracker, target, start, current_kg).await?)
        }
        (Some(target), None) => {
            warn!(target_kg = target, "no weigh-ins logged, skipping goal");
            None
        }
        (None, _) => None,
    };

    Ok(Summary {
        entries: tracker.observation_count().await?,
        days_logged: series.len(),
        current_kg,
        start_kg,
        trend: tracker.trend().await?,
        regression: tracker.regression().await?,
        moving_average: tracker.moving_average().await?.last().copied(),
        ema: tracker.ema().await?.last().copied(),
        consistency_score: tracker.consistency_score().await?,
        range,
        range_stats,
        plateau: tracker.plateau(&BTreeSet::new()).await?,
        goal,
    })
}

async fn goal_summary(
    tracker: &WeightTracker,
    target_kg: f64,
    start_kg: f64,
    current_kg: Option<f64>,
) -> AppResult<GoalSummary> {
    let goal = tracker
        .set_goal(GoalRequest::new(target_kg).starting_at(start_kg))
        .await?;
    info!(target_kg, start_kg, "goal set for summary");

    Ok(GoalSummary {
        progress_percent: current_kg
            .and_then(|current| goal_progress_percent(start_kg, current, target_kg)),
        consistency_since_start: tracker.goal_consistency_score().await?,
        projection: tracker.goal_projection().await?,
        goal,
    })
}
