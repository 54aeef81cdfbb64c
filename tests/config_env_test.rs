// ABOUTME: Tests for environment configuration overlay, settings validation, and logging config
// ABOUTME: Environment-mutating tests run serially to avoid cross-test interference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use trimtally::config::environment::keys;
use trimtally::config::{DailyAggregationMode, EnvironmentConfig, Settings};
use trimtally::logging::{init_from_env, LogFormat, LoggingConfig};
use trimtally::WeightUnit;
use trimtally_core::errors::ConfigError;

const ALL_KEYS: [&str; 7] = [
    keys::AGGREGATION_MODE,
    keys::CONSISTENCY_WINDOW_DAYS,
    keys::MIN_DAYS_FOR_PROJECTION,
    keys::DUPLICATE_TOLERANCE_KG,
    keys::AUTO_HIDE_DUPLICATES,
    keys::PREFERRED_UNIT,
    keys::ENTITLED,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = EnvironmentConfig::from_env();

    assert_eq!(config.settings, Settings::default());
    assert!(!config.entitled);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(keys::AGGREGATION_MODE, "mean");
    env::set_var(keys::CONSISTENCY_WINDOW_DAYS, "14");
    env::set_var(keys::MIN_DAYS_FOR_PROJECTION, "21");
    env::set_var(keys::DUPLICATE_TOLERANCE_KG, "0.25");
    env::set_var(keys::AUTO_HIDE_DUPLICATES, "no");
    env::set_var(keys::PREFERRED_UNIT, "KG");
    env::set_var(keys::ENTITLED, "1");

    let config = EnvironmentConfig::from_env();
    clear_env();

    assert_eq!(
        config.settings.daily_aggregation_mode,
        DailyAggregationMode::Average
    );
    assert_eq!(config.settings.consistency_window_days, 14);
    assert_eq!(config.settings.min_days_for_projection, 21);
    assert!((config.settings.duplicate_tolerance_kg - 0.25).abs() < 1e-12);
    assert!(!config.settings.auto_hide_duplicates);
    assert_eq!(config.settings.preferred_unit, WeightUnit::Kilograms);
    assert!(config.entitled);
}

#[test]
#[serial]
fn test_invalid_values_fall_back_to_defaults() {
    clear_env();
    env::set_var(keys::AGGREGATION_MODE, "median");
    env::set_var(keys::CONSISTENCY_WINDOW_DAYS, "0");
    env::set_var(keys::DUPLICATE_TOLERANCE_KG, "-1");
    env::set_var(keys::AUTO_HIDE_DUPLICATES, "maybe");
    env::set_var(keys::PREFERRED_UNIT, "stone");
    env::set_var(keys::MIN_DAYS_FOR_PROJECTION, "ten");

    let config = EnvironmentConfig::from_env();
    clear_env();

    assert_eq!(config.settings, Settings::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_settings_validation_ranges() {
    let zero_window = Settings {
        consistency_window_days: 0,
        ..Settings::default()
    };
    let negative_tolerance = Settings {
        duplicate_tolerance_kg: -0.1,
        ..Settings::default()
    };
    let zero_ema = Settings {
        ema_period: 0,
        ..Settings::default()
    };

    assert!(matches!(
        zero_window.validate(),
        Err(ConfigError::OutOfRange {
            field: "consistency_window_days",
            ..
        })
    ));
    assert!(negative_tolerance.validate().is_err());
    assert!(zero_ema.validate().is_err());
}

#[test]
fn test_settings_deserialize_with_defaults() {
    let empty: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Settings::default());

    let partial: Settings =
        serde_json::from_str(r#"{"daily_aggregation_mode":"average","preferred_unit":"kg"}"#)
            .unwrap();
    assert_eq!(partial.daily_aggregation_mode, DailyAggregationMode::Average);
    assert_eq!(partial.preferred_unit, WeightUnit::Kilograms);
    assert_eq!(partial.consistency_window_days, 30);
}

#[test]
fn test_default_settings_values() {
    let settings = Settings::default();
    assert_eq!(settings.daily_aggregation_mode, DailyAggregationMode::Latest);
    assert_eq!(settings.consistency_window_days, 30);
    assert_eq!(settings.min_days_for_projection, 10);
    assert!((settings.duplicate_tolerance_kg - 0.1).abs() < 1e-12);
    assert!(settings.auto_hide_duplicates);
    assert_eq!(settings.preferred_unit, WeightUnit::Pounds);
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_LOCATION", "1");
    env::set_var("SERVICE_NAME", "trimtally-test");

    let config = LoggingConfig::from_env();

    env::remove_var("LOG_FORMAT");
    env::remove_var("LOG_INCLUDE_LOCATION");
    env::remove_var("SERVICE_NAME");

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(!config.include_thread);
    assert_eq!(config.service_name, "trimtally-test");

    let defaults = LoggingConfig::from_env();
    assert_eq!(defaults.format, LogFormat::Compact);
    assert_eq!(defaults.with_level("debug").level, "debug");
}

#[test]
#[serial]
fn test_pretty_logging_installs_once() {
    env::set_var("LOG_FORMAT", "pretty");

    let config = LoggingConfig::from_env();
    let first = init_from_env();
    let second = init_from_env();

    env::remove_var("LOG_FORMAT");

    assert_eq!(config.format, LogFormat::Pretty);
    assert!(first.is_ok());
    assert!(second.is_err(), "a global subscriber is already installed");
}
