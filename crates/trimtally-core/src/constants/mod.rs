// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Thresholds and windows used by the weight analytics engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! Constants module
//!
//! Engine thresholds grouped by the component that consumes them.

/// Unit conversion constants
pub mod units;

pub use units::*;

/// Trend classification
pub mod trend {
    /// Slope magnitude (kg per index step) below which a trend is stable
    pub const STABILITY_THRESHOLD_KG_PER_DAY: f64 = 0.02;
    /// Minimum daily points before a trend is classified
    pub const MIN_POINTS_FOR_CLASSIFICATION: usize = 7;
    /// Minimum points for a regression fit
    pub const MIN_POINTS_FOR_REGRESSION: usize = 2;
}

/// Goal projection policy
pub mod projection {
    /// Relative swing between the last and third-last points that marks them as noise
    pub const VOLATILITY_THRESHOLD: f64 = 0.05;
    /// Number of trailing points dropped when the volatility guard fires
    pub const VOLATILE_POINTS_DROPPED: usize = 2;
    /// Distance to target (kg) treated as already reached
    pub const GOAL_REACHED_DISTANCE_KG: f64 = 0.5;
    /// Longest projection horizon in days (about ten years)
    pub const MAX_PROJECTION_DAYS: f64 = 3650.0;
}

/// Duplicate detection
pub mod duplicates {
    /// Maximum time separation (seconds) for two observations to be duplicates
    pub const DUPLICATE_WINDOW_SECONDS: i64 = 300;
}

/// Goal lifecycle
pub mod goals {
    /// Tolerance (kg) when deciding an observation has reached the target
    pub const ACHIEVEMENT_TOLERANCE_KG: f64 = 0.05;
}

/// Consistency and streak windows
pub mod consistency {
    /// Trailing window (days, today inclusive) for the reminder routine ratio
    pub const REMINDER_WINDOW_DAYS: i64 = 21;
}

/// Plateau detection
pub mod plateau {
    /// Trailing daily points inspected for a plateau
    pub const MINIMUM_DAYS: usize = 14;
    /// Maximum relative change across the window (0.5%)
    pub const CHANGE_THRESHOLD: f64 = 0.005;
    /// Change percentage below which the plateau is reported as stable
    pub const STABLE_HINT_PERCENT: f64 = 0.5;
}

/// Settings defaults mirrored from the mobile app
pub mod defaults {
    /// Default consistency window (days)
    pub const CONSISTENCY_WINDOW_DAYS: u32 = 30;
    /// Default minimum daily points before projecting a goal date
    pub const MIN_DAYS_FOR_PROJECTION: usize = 10;
    /// Default duplicate tolerance (kg)
    pub const DUPLICATE_TOLERANCE_KG: f64 = 0.1;
    /// Default moving average period (days)
    pub const MOVING_AVERAGE_PERIOD: usize = 7;
    /// Default EMA period (days)
    pub const EMA_PERIOD: usize = 7;
}
