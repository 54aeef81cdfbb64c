// ABOUTME: Core data models for the TrimTally weight analytics engine
// ABOUTME: Re-exports Observation, Goal, AchievementState, WeightUnit and reminder types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! # Data Models
//!
//! Immutable value types passed into the analytics engine. The engine never
//! mutates these in shared storage; hosts read a snapshot, compute, and write
//! back through their own store.
//!
//! ## Core Models
//!
//! - `Observation`: A single weight measurement
//! - `Goal`: A target weight with lifecycle metadata
//! - `AchievementState`: Persisted progress/unlock state for one achievement
//! - `WeightUnit`: Display unit with kilogram conversion
//! - `ReminderSchedule`: Reminder times that feed reminder achievements

mod achievement;
mod goal;
mod observation;
mod reminders;
mod unit;

pub use achievement::AchievementState;
pub use goal::{CompletionReason, Goal};
pub use observation::{EntrySource, Observation};
pub use reminders::ReminderSchedule;
pub use unit::WeightUnit;
