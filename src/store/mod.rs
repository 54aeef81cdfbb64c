// ABOUTME: Collaborator contracts for observation storage and settings
// ABOUTME: Async traits consumed by the tracker, with an in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! Storage abstraction
//!
//! The engine never touches storage directly. The tracker reads immutable
//! snapshots through these traits and hands them to the pure analytics
//! functions.

/// In-memory store and settings provider
pub mod memory;

pub use memory::{InMemoryObservationStore, InMemorySettingsProvider};

use crate::errors::StoreError;
use async_trait::async_trait;
use chrono::NaiveDate;
use trimtally_core::config::Settings;
use trimtally_core::models::{Observation, ReminderSchedule};
use trimtally_core::Clock;
use uuid::Uuid;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Observation persistence
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Every stored observation, hidden ones included, most recent first
    async fn all(&self) -> StoreResult<Vec<Observation>>;

    /// Observations whose local day under `clock` is `day`, oldest first
    async fn for_day(&self, day: NaiveDate, clock: &dyn Clock) -> StoreResult<Vec<Observation>>;

    /// Persist a new observation
    async fn insert(&self, observation: Observation) -> StoreResult<()>;

    /// Delete an observation, returning it
    async fn remove(&self, id: Uuid) -> StoreResult<Observation>;

    /// Hide or unhide an observation
    async fn set_hidden(&self, id: Uuid, hidden: bool) -> StoreResult<Observation>;

    /// Number of stored observations
    async fn count(&self) -> StoreResult<usize> {
        Ok(self.all().await?.len())
    }
}

/// Source of the settings snapshot
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Current settings snapshot
    async fn settings(&self) -> StoreResult<Settings>;

    /// Read the snapshot, apply `change`, validate, and write it back
    ///
    /// Returns the new snapshot. An invalid result is rejected and the stored
    /// settings stay as they were.
    async fn update(
        &self,
        change: &(dyn for<'s> Fn(&'s mut Settings) + Send + Sync),
    ) -> StoreResult<Settings>;

    /// Configured reminder times
    async fn reminders(&self) -> StoreResult<ReminderSchedule>;

    /// Replace the reminder times
    async fn set_reminders(&self, schedule: ReminderSchedule) -> StoreResult<()>;
}
