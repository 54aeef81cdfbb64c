// ABOUTME: Re-exports command modules for trimtally-cli
// ABOUTME: Provides access to summary, export, and achievements commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

pub mod achievements;
pub mod export;
pub mod summary;
