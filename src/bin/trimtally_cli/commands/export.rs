// ABOUTME: Export command for trimtally-cli
// ABOUTME: Writes the CSV history to a file or stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use std::path::Path;
use tokio::fs;
use tracing::info;
use trimtally::{AppError, AppResult, WeightTracker};

/// Export every observation as CSV
pub async fn run(tracker: &WeightTracker, output: Option<&Path>) -> AppResult<()> {
    let csv = tracker.export_csv().await?;

    match output {
        Some(path) => {
            fs::write(path, &csv).await.map_err(|e| {
                AppError::internal(format!("cannot write {}: {e}", path.display())).with_source(e)
            })?;
            info!(rows = csv.lines().count().saturating_sub(1), "exported to {}", path.display());
        }
        None => print!("{csv}"),
    }

    Ok(())
}
