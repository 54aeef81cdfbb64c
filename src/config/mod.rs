// ABOUTME: Configuration management for the tracker host
// ABOUTME: Overlays environment variables on the engine settings defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! Configuration module
//!
//! - **Environment**: `TRIMTALLY_*` overrides on top of [`Settings`] defaults

/// Environment-driven configuration
pub mod environment;

pub use environment::EnvironmentConfig;
pub use trimtally_core::config::{DailyAggregationMode, Settings};
