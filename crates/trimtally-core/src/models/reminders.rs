// ABOUTME: Reminder schedule snapshot consumed by reminder achievements
// ABOUTME: Scheduling mechanics live in the host; only the configured times matter here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Configured daily reminder times
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSchedule {
    /// Primary reminder time
    pub primary: Option<NaiveTime>,
    /// Optional second reminder time
    pub secondary: Option<NaiveTime>,
}

impl ReminderSchedule {
    /// Whether at least one reminder is configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.primary.is_some() || self.secondary.is_some()
    }
}
