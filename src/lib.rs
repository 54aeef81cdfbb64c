// ABOUTME: Main library entry point for the TrimTally weight tracker
// ABOUTME: Wires storage, settings, and the clock into the analytics engine for hosts and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

#![deny(unsafe_code)]

//! # TrimTally
//!
//! Weight progress analytics: daily aggregation, trends, consistency,
//! goal projection, duplicate detection, goal lifecycle, and achievements.
//!
//! The engine itself lives in `trimtally-analytics` and is pure. This crate
//! is the host boundary around it:
//!
//! - **store**: Async observation store and settings provider contracts
//! - **tracker**: [`WeightTracker`], the service hosts talk to
//! - **import**: Bulk import with progress reporting and cancellation
//! - **export**: CSV export of the full history
//! - **config**: Environment overlay for engine settings
//! - **logging**: Structured logging setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Utc;
//! use trimtally::store::{InMemoryObservationStore, InMemorySettingsProvider};
//! use trimtally::{AppResult, SystemClock, WeightTracker, WeightUnit};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let tracker = WeightTracker::new(
//!         Arc::new(InMemoryObservationStore::new()),
//!         Arc::new(InMemorySettingsProvider::default()),
//!         Arc::new(SystemClock),
//!     );
//!     tracker.add_observation(82.4, Utc::now(), WeightUnit::Kilograms).await?;
//!     println!("trend: {:?}", tracker.trend().await?);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Error types for the host boundary
pub mod errors;

/// CSV export
pub mod export;

/// Bulk import with progress and cancellation
pub mod import;

/// Structured logging setup
pub mod logging;

/// Observation storage and settings contracts
pub mod store;

/// The tracker service
pub mod tracker;

pub use errors::{AppError, AppResult, ErrorCode, StoreError};
pub use import::{CancellationSignal, ImportItem, ImportProgress, ImportSummary};
pub use tracker::WeightTracker;
pub use trimtally_core::models::{CompletionReason, EntrySource, Goal, Observation, WeightUnit};
pub use trimtally_core::{Clock, FixedClock, SystemClock};
