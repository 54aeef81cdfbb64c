// ABOUTME: Achievements command for trimtally-cli
// ABOUTME: Refreshes every achievement and prints a table or the raw JSON refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use tracing::info;
use trimtally::{AppResult, WeightTracker};

use crate::helpers::display::display_achievements;

/// Evaluate all achievements against the loaded history
pub async fn run(tracker: &WeightTracker, json: bool) -> AppResult<()> {
    let refresh = tracker.refresh_achievements().await?;
    info!(
        unlocked = refresh.snapshots.iter().filter(|s| s.is_unlocked()).count(),
        total = refresh.snapshots.len(),
        "achievements evaluated"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&refresh)?);
    } else {
        display_achievements(&refresh);
    }
    Ok(())
}
