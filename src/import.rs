// ABOUTME: Bulk import of externally sourced observations with progress and cancellation
// ABOUTME: Items are processed oldest first; each accepted item is stored before the next is read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! # Bulk Import
//!
//! Progress is published on a `tokio::sync::watch` channel after every item,
//! so a UI can observe `processed / total` without polling the importer.
//! Cancellation is checked between items; everything accepted before the
//! signal fired stays stored.

#![allow(clippy::cast_precision_loss)] // Safe: item counts are far below 2^52

use crate::errors::{AppError, AppResult};
use crate::tracker::WeightTracker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task;
use tracing::{debug, info, warn};
use trimtally_analytics::DuplicateCandidate;
use trimtally_core::models::{EntrySource, Observation, WeightUnit};

/// One externally sourced measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportItem {
    /// Mass in kilograms
    pub value_kg: f64,
    /// Measurement instant
    pub timestamp: DateTime<Utc>,
    /// Unit to record as the display unit
    #[serde(default)]
    pub unit: WeightUnit,
    /// Free-text notes carried onto the stored observation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ImportItem {
    /// Create an item
    #[must_use]
    pub const fn new(value_kg: f64, timestamp: DateTime<Utc>, unit: WeightUnit) -> Self {
        Self {
            value_kg,
            timestamp,
            unit,
            notes: None,
        }
    }

    /// Attach notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Progress of a running import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportProgress {
    /// Items handled so far
    pub processed: usize,
    /// Items in the batch
    pub total: usize,
    /// Items stored
    pub imported: usize,
    /// Items skipped as duplicates
    pub skipped_duplicates: usize,
    /// Items rejected for a non-positive or non-finite weight
    pub rejected: usize,
}

impl ImportProgress {
    /// `processed / total`; 1.0 for an empty batch
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Outcome of a completed import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Items in the batch
    pub total: usize,
    /// Items stored
    pub imported: usize,
    /// Items skipped as duplicates
    pub skipped_duplicates: usize,
    /// Items rejected for a non-positive or non-finite weight
    pub rejected: usize,
}

/// Cooperative cancellation flag shared between an import and its caller
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationSignal {
    /// Fresh, untriggered signal
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Whether cancellation was requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Wait until cancellation is requested
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // Only fails if the sender is dropped, which `self` prevents
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

/// Import `items` into the tracker in chronological order
///
/// Duplicates (per the tracker's settings) are skipped and invalid weights
/// rejected. Progress is published after each item and never decreases.
///
/// # Errors
///
/// Returns `CANCELLED` if the signal fires between items, or the first store
/// error encountered. Items stored before the error remain stored.
pub async fn import_observations(
    tracker: &WeightTracker,
    mut items: Vec<ImportItem>,
    progress: Option<&watch::Sender<ImportProgress>>,
    cancel: &CancellationSignal,
) -> AppResult<ImportSummary> {
    items.sort_by_key(|item| item.timestamp);

    let mut state = ImportProgress {
        total: items.len(),
        ..ImportProgress::default()
    };
    publish(progress, state);

    for item in items {
        if cancel.is_cancelled() {
            warn!(
                processed = state.processed,
                total = state.total,
                "import cancelled"
            );
            return Err(AppError::cancelled(format!(
                "import cancelled after {} of {} items",
                state.processed, state.total
            )));
        }

        let candidate = DuplicateCandidate::new(item.value_kg, item.timestamp);
        if !item.value_kg.is_finite() || item.value_kg <= 0.0 {
            warn!(value_kg = item.value_kg, "rejecting invalid import item");
            state.rejected += 1;
        } else if tracker.is_duplicate(&candidate).await? {
            debug!(timestamp = %item.timestamp, "skipping duplicate import");
            state.skipped_duplicates += 1;
        } else {
            let mut observation =
                Observation::new(item.timestamp, item.value_kg, tracker.clock())
                    .with_source(EntrySource::Imported)
                    .with_display_unit(item.unit);
            observation.notes = item.notes;
            tracker.record(observation).await?;
            state.imported += 1;
        }

        state.processed += 1;
        publish(progress, state);
        task::yield_now().await;
    }

    info!(
        total = state.total,
        imported = state.imported,
        skipped = state.skipped_duplicates,
        rejected = state.rejected,
        "import finished"
    );

    Ok(ImportSummary {
        total: state.total,
        imported: state.imported,
        skipped_duplicates: state.skipped_duplicates,
        rejected: state.rejected,
    })
}

fn publish(progress: Option<&watch::Sender<ImportProgress>>, state: ImportProgress) {
    if let Some(sender) = progress {
        sender.send_replace(state);
    }
}
