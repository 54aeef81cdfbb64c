// ABOUTME: Host-level error types for the store boundary and import cancellation
// ABOUTME: Re-exports the unified engine errors and converts store failures into them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! # Error Handling
//!
//! Engine errors live in `trimtally-core`; this module adds [`StoreError`] for
//! collaborator failures and re-exports the unified types.

use thiserror::Error;
use uuid::Uuid;

pub use trimtally_core::errors::{AppError, AppResult, ConfigError, ErrorCode, GoalError};

/// Failures raised by observation stores and settings providers
#[derive(Debug, Error)]
pub enum StoreError {
    /// No observation with the given id
    #[error("observation {0} not found")]
    NotFound(Uuid),
    /// An observation with the same id is already stored
    #[error("observation {0} already exists")]
    Conflict(Uuid),
    /// A settings update produced an invalid snapshot
    #[error("settings rejected: {0}")]
    InvalidSettings(#[from] ConfigError),
    /// The backing store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::not_found(format!("observation {id}")),
            StoreError::InvalidSettings(config) => config.into(),
            other => Self::storage(other.to_string()).with_source(other),
        }
    }
}
