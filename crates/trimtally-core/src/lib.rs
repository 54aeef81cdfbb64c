// ABOUTME: Core types and constants for the TrimTally weight analytics engine
// ABOUTME: Foundation crate with error handling, domain models, settings, and the clock contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

#![deny(unsafe_code)]

//! # TrimTally Core
//!
//! Foundation crate providing the value types shared by the analytics engine
//! and the host application. Nothing here performs I/O.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Unit conversion factors and engine thresholds
//! - **models**: Observations, goals, achievement state, and units
//! - **config**: The engine settings snapshot
//! - **clock**: "Now" and local day-boundary semantics

/// Unified error handling system with standard error codes
pub mod errors;

/// Engine constants organized by domain
pub mod constants;

/// Core data models (Observation, Goal, AchievementState, WeightUnit)
pub mod models;

/// Engine settings snapshot and validation
pub mod config;

/// Clock abstraction for local day boundaries
pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{AppError, AppResult, ErrorCode};
