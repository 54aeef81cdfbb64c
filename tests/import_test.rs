// ABOUTME: Tests for bulk import with progress reporting, duplicate skipping, and cancellation
// ABOUTME: Uses a store wrapper that trips the cancellation signal after a fixed number of inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use common::{init_test_logging, now, observation, tracker, tracker_with_settings, utc_clock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::watch;
use tokio::time::timeout;
use trimtally::store::{
    InMemoryObservationStore, InMemorySettingsProvider, ObservationStore, StoreResult,
};
use trimtally::{
    CancellationSignal, CompletionReason, EntrySource, ErrorCode, ImportItem, ImportProgress,
    WeightTracker, WeightUnit,
};
use trimtally_analytics::GoalRequest;
use trimtally_core::config::Settings;
use trimtally_core::models::Observation;
use trimtally_core::Clock;
use uuid::Uuid;

/// One item per day going back from now, oldest last
fn daily_items(count: usize) -> Vec<ImportItem> {
    (0..count)
        .map(|i| {
            let days = i64::try_from(i).unwrap();
            ImportItem::new(80.0, now() - Duration::days(days), WeightUnit::Kilograms)
        })
        .collect()
}

/// Store that requests cancellation once `limit` observations were inserted
struct CancellingStore {
    inner: InMemoryObservationStore,
    inserted: AtomicUsize,
    limit: usize,
    signal: CancellationSignal,
}

#[async_trait]
impl ObservationStore for CancellingStore {
    async fn all(&self) -> StoreResult<Vec<Observation>> {
        self.inner.all().await
    }

    async fn for_day(&self, day: NaiveDate, clock: &dyn Clock) -> StoreResult<Vec<Observation>> {
        self.inner.for_day(day, clock).await
    }

    async fn insert(&self, observation: Observation) -> StoreResult<()> {
        self.inner.insert(observation).await?;
        if self.inserted.fetch_add(1, Ordering::SeqCst) + 1 == self.limit {
            self.signal.cancel();
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> StoreResult<Observation> {
        self.inner.remove(id).await
    }

    async fn set_hidden(&self, id: Uuid, hidden: bool) -> StoreResult<Observation> {
        self.inner.set_hidden(id, hidden).await
    }
}

#[tokio::test]
async fn test_import_reports_monotonic_progress() {
    let tracker = Arc::new(tracker(Arc::new(utc_clock()), Vec::new()));
    let items = daily_items(20);
    let (tx, mut rx) = watch::channel(ImportProgress::default());

    let task_tracker = Arc::clone(&tracker);
    let handle = tokio::spawn(async move {
        let cancel = CancellationSignal::new();
        task_tracker
            .import_observations(items, Some(&tx), &cancel)
            .await
    });

    let mut seen = Vec::new();
    while rx.changed().await.is_ok() {
        seen.push(*rx.borrow_and_update());
    }
    let summary = handle.await.unwrap().unwrap();

    assert!(seen
        .windows(2)
        .all(|pair| pair[0].processed <= pair[1].processed));
    let last = *rx.borrow();
    assert_eq!(last.processed, 20);
    assert_eq!(last.total, 20);
    assert!((last.fraction() - 1.0).abs() < 1e-9);
    assert_eq!(summary.imported, 20);
    assert_eq!(tracker.observation_count().await.unwrap(), 20);
}

#[tokio::test]
async fn test_imported_observations_are_tagged() {
    init_test_logging();
    let clock: Arc<dyn Clock> = Arc::new(utc_clock());
    let store = Arc::new(InMemoryObservationStore::new());
    let tracker = WeightTracker::new(
        store.clone(),
        Arc::new(InMemorySettingsProvider::default()),
        clock,
    );
    let items = vec![ImportItem::new(80.0, now(), WeightUnit::Pounds).with_notes("morning")];

    tracker
        .import_observations(items, None, &CancellationSignal::new())
        .await
        .unwrap();

    let stored = store.all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].source, EntrySource::Imported);
    assert_eq!(stored[0].display_unit_at_entry, WeightUnit::Pounds);
    assert_eq!(stored[0].notes.as_deref(), Some("morning"));
}

#[tokio::test]
async fn test_duplicates_are_skipped() {
    let clock = utc_clock();
    let existing = vec![observation(&clock, now() - Duration::hours(2), 80.0)];
    let tracker = tracker(Arc::new(clock), existing);
    let items = vec![
        // Matches the stored entry
        ImportItem::new(
            80.05,
            now() - Duration::hours(2) + Duration::minutes(3),
            WeightUnit::Kilograms,
        ),
        // New, then repeated within the same batch
        ImportItem::new(79.6, now() - Duration::minutes(30), WeightUnit::Kilograms),
        ImportItem::new(79.6, now() - Duration::minutes(29), WeightUnit::Kilograms),
    ];

    let summary = tracker
        .import_observations(items, None, &CancellationSignal::new())
        .await
        .unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped_duplicates, 2);
    assert_eq!(tracker.observation_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_duplicates_kept_when_detection_disabled() {
    let clock = utc_clock();
    let existing = vec![observation(&clock, now() - Duration::hours(2), 80.0)];
    let settings = Settings {
        auto_hide_duplicates: false,
        ..Settings::default()
    };
    let tracker = tracker_with_settings(Arc::new(clock), existing, settings);
    let items = vec![ImportItem::new(
        80.0,
        now() - Duration::hours(2),
        WeightUnit::Kilograms,
    )];

    let summary = tracker
        .import_observations(items, None, &CancellationSignal::new())
        .await
        .unwrap();

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped_duplicates, 0);
}

#[tokio::test]
async fn test_invalid_weights_are_rejected_without_aborting() {
    let tracker = tracker(Arc::new(utc_clock()), Vec::new());
    let items = vec![
        ImportItem::new(0.0, now() - Duration::days(2), WeightUnit::Kilograms),
        ImportItem::new(f64::NAN, now() - Duration::days(1), WeightUnit::Kilograms),
        ImportItem::new(81.0, now(), WeightUnit::Kilograms),
    ];

    let summary = tracker
        .import_observations(items, None, &CancellationSignal::new())
        .await
        .unwrap();

    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.imported, 1);
}

#[tokio::test]
async fn test_items_are_applied_oldest_first() {
    let tracker = tracker(Arc::new(utc_clock()), Vec::new());
    tracker
        .set_goal(GoalRequest::new(85.0).starting_at(90.0))
        .await
        .unwrap();

    // Newest first in the batch; the older reading crosses the target but the
    // newer one is the current weight once both are stored
    let items = vec![
        ImportItem::new(92.0, now(), WeightUnit::Kilograms),
        ImportItem::new(84.0, now() - Duration::days(1), WeightUnit::Kilograms),
    ];

    tracker
        .import_observations(items, None, &CancellationSignal::new())
        .await
        .unwrap();

    let goal = tracker.active_goal().await.unwrap();
    assert_eq!(goal.completion_reason, Some(CompletionReason::Achieved));
}

#[tokio::test]
async fn test_cancel_before_start_imports_nothing() {
    let tracker = tracker(Arc::new(utc_clock()), Vec::new());
    let cancel = CancellationSignal::new();
    cancel.cancel();

    let err = tracker
        .import_observations(daily_items(5), None, &cancel)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Cancelled);
    assert_eq!(tracker.observation_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_cancel_midway_keeps_accepted_items() {
    init_test_logging();
    let signal = CancellationSignal::new();
    let store = Arc::new(CancellingStore {
        inner: InMemoryObservationStore::new(),
        inserted: AtomicUsize::new(0),
        limit: 3,
        signal: signal.clone(),
    });
    let tracker = WeightTracker::new(
        store.clone(),
        Arc::new(InMemorySettingsProvider::default()),
        Arc::new(utc_clock()),
    );
    let (tx, rx) = watch::channel(ImportProgress::default());

    let err = tracker
        .import_observations(daily_items(10), Some(&tx), &signal)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Cancelled);
    assert_eq!(store.count().await.unwrap(), 3);
    let progress = *rx.borrow();
    assert_eq!(progress.processed, 3);
    assert_eq!(progress.total, 10);
}

#[tokio::test]
async fn test_cancelled_future_resolves_after_cancel() {
    let signal = CancellationSignal::new();
    let waiter = signal.clone();
    let handle = tokio::spawn(async move { waiter.cancelled().await });

    assert!(!signal.is_cancelled());
    signal.cancel();

    timeout(StdDuration::from_secs(1), handle)
        .await
        .expect("cancellation should wake the waiter")
        .unwrap();
    assert!(signal.is_cancelled());
}

#[test]
fn test_empty_batch_progress_is_complete() {
    assert!((ImportProgress::default().fraction() - 1.0).abs() < 1e-9);
}
