// ABOUTME: Environment-based configuration for engine settings and entitlement
// ABOUTME: Unparsable or out-of-range values log a warning and keep the default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};
use trimtally_core::config::{DailyAggregationMode, Settings};
use trimtally_core::errors::ConfigError;
use trimtally_core::models::WeightUnit;

/// Environment variable names
pub mod keys {
    /// `latest` or `average`
    pub const AGGREGATION_MODE: &str = "TRIMTALLY_AGGREGATION_MODE";
    /// Rolling consistency window in days
    pub const CONSISTENCY_WINDOW_DAYS: &str = "TRIMTALLY_CONSISTENCY_WINDOW_DAYS";
    /// Minimum daily points before projecting
    pub const MIN_DAYS_FOR_PROJECTION: &str = "TRIMTALLY_MIN_DAYS_FOR_PROJECTION";
    /// Duplicate value tolerance in kilograms
    pub const DUPLICATE_TOLERANCE_KG: &str = "TRIMTALLY_DUPLICATE_TOLERANCE_KG";
    /// Whether imported duplicates are skipped
    pub const AUTO_HIDE_DUPLICATES: &str = "TRIMTALLY_AUTO_HIDE_DUPLICATES";
    /// `kg` or `lb`
    pub const PREFERRED_UNIT: &str = "TRIMTALLY_PREFERRED_UNIT";
    /// Whether premium achievements may unlock
    pub const ENTITLED: &str = "TRIMTALLY_ENTITLED";
}

/// Settings plus host-level flags read from the environment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvironmentConfig {
    /// Engine settings snapshot
    pub settings: Settings,
    /// Whether the user holds the premium entitlement
    pub entitled: bool,
}

impl EnvironmentConfig {
    /// Load configuration from the environment
    ///
    /// Never fails: each bad value is reported and replaced by its default.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Settings::default();

        let consistency_window_days =
            parse_env(keys::CONSISTENCY_WINDOW_DAYS, defaults.consistency_window_days);
        let consistency_window_days = if consistency_window_days == 0 {
            warn!(
                key = keys::CONSISTENCY_WINDOW_DAYS,
                "consistency window must be at least one day, using default"
            );
            defaults.consistency_window_days
        } else {
            consistency_window_days
        };

        let duplicate_tolerance_kg =
            parse_env(keys::DUPLICATE_TOLERANCE_KG, defaults.duplicate_tolerance_kg);
        let duplicate_tolerance_kg =
            if duplicate_tolerance_kg.is_finite() && duplicate_tolerance_kg >= 0.0 {
                duplicate_tolerance_kg
            } else {
                warn!(
                    key = keys::DUPLICATE_TOLERANCE_KG,
                    "duplicate tolerance must be a non-negative number, using default"
                );
                defaults.duplicate_tolerance_kg
            };

        let settings = Settings {
            daily_aggregation_mode: parse_env::<DailyAggregationMode>(
                keys::AGGREGATION_MODE,
                defaults.daily_aggregation_mode,
            ),
            consistency_window_days,
            min_days_for_projection: parse_env(
                keys::MIN_DAYS_FOR_PROJECTION,
                defaults.min_days_for_projection,
            ),
            duplicate_tolerance_kg,
            auto_hide_duplicates: parse_flag(
                keys::AUTO_HIDE_DUPLICATES,
                defaults.auto_hide_duplicates,
            ),
            preferred_unit: parse_env::<WeightUnit>(keys::PREFERRED_UNIT, defaults.preferred_unit),
            ..defaults
        };

        let config = Self {
            settings,
            entitled: parse_flag(keys::ENTITLED, false),
        };
        debug!(?config, "environment configuration loaded");
        config
    }

    /// Validate the loaded settings
    ///
    /// # Errors
    ///
    /// Returns an error if a setting is outside its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()
    }
}

/// Parse an environment variable, keeping `default` when unset or invalid
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(e) => {
                warn!(key, value = %raw, error = %e, "invalid configuration value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a boolean flag accepting `true/false/1/0/yes/no`
fn parse_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => {
                warn!(key, value = %raw, "invalid boolean flag, using default");
                default
            }
        },
        Err(_) => default,
    }
}
