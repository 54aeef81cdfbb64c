// ABOUTME: Re-exports helper modules for trimtally-cli
// ABOUTME: Provides access to input loading and display formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

pub mod display;
pub mod input;
