// ABOUTME: Engine configuration module
// ABOUTME: Exposes the settings snapshot passed explicitly into analytics calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

/// Settings snapshot, defaults, and validation
pub mod settings;

pub use settings::{DailyAggregationMode, Settings};
