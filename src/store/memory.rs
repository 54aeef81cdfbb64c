// ABOUTME: In-memory observation store and settings provider
// ABOUTME: Backed by tokio RwLocks; used by the CLI and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use super::{ObservationStore, SettingsProvider, StoreResult};
use crate::errors::StoreError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::debug;
use trimtally_core::config::Settings;
use trimtally_core::models::{Observation, ReminderSchedule};
use trimtally_core::Clock;
use uuid::Uuid;

/// Observations held in memory
#[derive(Debug, Default)]
pub struct InMemoryObservationStore {
    observations: RwLock<Vec<Observation>>,
}

impl InMemoryObservationStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with observations
    #[must_use]
    pub fn with_observations(observations: Vec<Observation>) -> Self {
        Self {
            observations: RwLock::new(observations),
        }
    }
}

#[async_trait]
impl ObservationStore for InMemoryObservationStore {
    async fn all(&self) -> StoreResult<Vec<Observation>> {
        let mut snapshot = self.observations.read().await.clone();
        snapshot.sort_by_key(|o| Reverse(o.timestamp));
        Ok(snapshot)
    }

    async fn for_day(&self, day: NaiveDate, clock: &dyn Clock) -> StoreResult<Vec<Observation>> {
        let mut matching: Vec<Observation> = self
            .observations
            .read()
            .await
            .iter()
            .filter(|o| o.local_day(clock) == day)
            .cloned()
            .collect();
        matching.sort_by_key(|o| o.timestamp);
        Ok(matching)
    }

    async fn insert(&self, observation: Observation) -> StoreResult<()> {
        let mut observations = self.observations.write().await;
        if observations.iter().any(|o| o.id == observation.id) {
            return Err(StoreError::Conflict(observation.id));
        }
        debug!(id = %observation.id, value_kg = observation.value_kg, "observation stored");
        observations.push(observation);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> StoreResult<Observation> {
        let mut observations = self.observations.write().await;
        let index = observations
            .iter()
            .position(|o| o.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(observations.remove(index))
    }

    async fn set_hidden(&self, id: Uuid, hidden: bool) -> StoreResult<Observation> {
        let mut observations = self.observations.write().await;
        let observation = observations
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StoreError::NotFound(id))?;
        observation.is_hidden = hidden;
        Ok(observation.clone())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.observations.read().await.len())
    }
}

/// Settings and reminders held in memory
#[derive(Debug, Default)]
pub struct InMemorySettingsProvider {
    settings: RwLock<Settings>,
    reminders: RwLock<ReminderSchedule>,
}

impl InMemorySettingsProvider {
    /// Provider starting from the given snapshot
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
            reminders: RwLock::new(ReminderSchedule::default()),
        }
    }
}

#[async_trait]
impl SettingsProvider for InMemorySettingsProvider {
    async fn settings(&self) -> StoreResult<Settings> {
        Ok(self.settings.read().await.clone())
    }

    async fn update(
        &self,
        change: &(dyn for<'s> Fn(&'s mut Settings) + Send + Sync),
    ) -> StoreResult<Settings> {
        let mut guard = self.settings.write().await;
        let mut updated = guard.clone();
        change(&mut updated);
        updated.validate()?;
        *guard = updated.clone();
        Ok(updated)
    }

    async fn reminders(&self) -> StoreResult<ReminderSchedule> {
        Ok(*self.reminders.read().await)
    }

    async fn set_reminders(&self, schedule: ReminderSchedule) -> StoreResult<()> {
        *self.reminders.write().await = schedule;
        Ok(())
    }
}
