// ABOUTME: Goal lifecycle error types
// ABOUTME: Surfaces the missing-starting-weight failure as a distinct error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by the goal lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    /// No starting weight was supplied and no observation exists to derive one
    #[error("starting weight required before saving a goal")]
    MissingStartingWeight,
    /// Target weight is not a positive finite number
    #[error("invalid target weight: {0}")]
    InvalidTarget(String),
}

impl From<GoalError> for AppError {
    fn from(error: GoalError) -> Self {
        let code = match error {
            GoalError::MissingStartingWeight => ErrorCode::MissingStartingWeight,
            GoalError::InvalidTarget(_) => ErrorCode::InvalidInput,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
