// ABOUTME: Unit conversion constants for body mass
// ABOUTME: Provides named constants to eliminate magic numbers in conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

/// Pounds per kilogram
pub const KG_TO_LB: f64 = 2.20462;
