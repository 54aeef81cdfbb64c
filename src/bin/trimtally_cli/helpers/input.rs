// ABOUTME: Loads the weigh-in JSON file and builds an in-memory tracker from it
// ABOUTME: Manual rows are recorded as-is; the rest go through the import path with duplicate skipping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::info;
use trimtally::config::EnvironmentConfig;
use trimtally::store::{InMemoryObservationStore, InMemorySettingsProvider};
use trimtally::{
    AppError, AppResult, CancellationSignal, Clock, EntrySource, FixedClock, ImportItem,
    Observation, SystemClock, WeightTracker,
};

/// One row of the input file
///
/// `source` defaults to imported. Manual rows skip duplicate detection.
#[derive(Debug, Deserialize)]
pub struct WeighIn {
    #[serde(flatten)]
    item: ImportItem,
    #[serde(default)]
    source: Option<EntrySource>,
}

/// Read a JSON array of weigh-ins
pub async fn load_items(path: &Path) -> AppResult<Vec<WeighIn>> {
    let raw = fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("cannot read {}: {e}", path.display())).with_source(e)
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Build a tracker over an in-memory store seeded from `path`
pub async fn open_tracker(
    path: &Path,
    now: Option<DateTime<Utc>>,
    config: &EnvironmentConfig,
) -> AppResult<WeightTracker> {
    let clock: Arc<dyn Clock> = match now {
        Some(instant) => Arc::new(FixedClock::utc(instant)),
        None => Arc::new(SystemClock),
    };

    let tracker = WeightTracker::new(
        Arc::new(InMemoryObservationStore::new()),
        Arc::new(InMemorySettingsProvider::new(config.settings.clone())),
        clock,
    );
    tracker.set_entitled(config.entitled);

    let (mut manual, imported): (Vec<WeighIn>, Vec<WeighIn>) = load_items(path)
        .await?
        .into_iter()
        .partition(|row| row.source == Some(EntrySource::Manual));

    manual.sort_by_key(|row| row.item.timestamp);
    for WeighIn { item, .. } in manual {
        let mut observation = Observation::new(item.timestamp, item.value_kg, tracker.clock())
            .with_display_unit(item.unit);
        observation.notes = item.notes;
        tracker.record(observation).await?;
    }

    let items = imported.into_iter().map(|row| row.item).collect();
    let summary = tracker
        .import_observations(items, None, &CancellationSignal::new())
        .await?;
    info!(
        imported = summary.imported,
        skipped = summary.skipped_duplicates,
        rejected = summary.rejected,
        "loaded {}",
        path.display()
    );

    Ok(tracker)
}
