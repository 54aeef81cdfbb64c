// ABOUTME: TrimTally CLI - runs the analytics engine over a JSON file of weigh-ins
// ABOUTME: Prints summaries, exports CSV, and reports achievement progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally
//!
//! Usage:
//! ```bash
//! # Trend, averages, consistency and a projection toward 72 kg
//! trimtally-cli summary --input weights.json --target-kg 72
//!
//! # Same, with "now" pinned for reproducible output
//! trimtally-cli summary --input weights.json --now 2025-03-01T08:00:00Z
//!
//! # Export the full history as CSV
//! trimtally-cli export --input weights.json --output history.csv
//!
//! # Achievement progress, as a table or JSON
//! trimtally-cli achievements --input weights.json --json
//! ```
//!
//! The input is a JSON array of `{ "value_kg": 81.2, "timestamp": "...", "unit": "kg" }`.

mod commands;
mod helpers;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use trimtally::config::EnvironmentConfig;
use trimtally::logging::LoggingConfig;
use trimtally_analytics::ChartRange;

use helpers::input::open_tracker;

#[derive(Parser)]
#[command(
    name = "trimtally-cli",
    about = "TrimTally weight analytics CLI",
    long_about = "Runs the TrimTally analytics engine over a JSON file of weigh-ins: trends, consistency, goal projection, CSV export, and achievements."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Where observations come from and what "now" is
#[derive(Args)]
struct SourceArgs {
    /// JSON file with an array of weigh-ins
    ///
    /// Each row has `value_kg`, `timestamp`, and optionally `unit`, `notes`,
    /// and `source` (`manual` or `imported`, default `imported`). Imported rows
    /// that repeat an existing entry are skipped.
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Pin the current instant (RFC 3339, evaluated in UTC)
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print trend, averages, consistency, and goal projection as JSON
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Goal target in kilograms
        #[arg(long)]
        target_kg: Option<f64>,

        /// Chart range for the min/max/average block (week, month, quarter, year)
        #[arg(long, default_value = "month")]
        range: ChartRange,
    },

    /// Export the full history as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (defaults to stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Evaluate achievements
    Achievements {
        #[command(flatten)]
        source: SourceArgs,

        /// Treat the user as entitled to premium achievements
        #[arg(long)]
        entitled: bool,

        /// Print the full refresh as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let config = EnvironmentConfig::from_env();
    config.validate()?;
    debug!(settings = ?config.settings, "configuration loaded");

    match cli.command {
        Command::Summary {
            source,
            target_kg,
            range,
        } => {
            let tracker = open_tracker(&source.input, source.now, &config).await?;
            commands::summary::run(&tracker, target_kg, range).await?;
        }
        Command::Export { source, output } => {
            let tracker = open_tracker(&source.input, source.now, &config).await?;
            commands::export::run(&tracker, output.as_deref()).await?;
        }
        Command::Achievements {
            source,
            entitled,
            json,
        } => {
            let tracker = open_tracker(&source.input, source.now, &config).await?;
            if entitled {
                tracker.set_entitled(true);
            }
            commands::achievements::run(&tracker, json).await?;
        }
    }

    Ok(())
}
