// ABOUTME: health-sample CLI - drives consent, step queries, daily sums, and sample writes
// ABOUTME: Runs every command against an in-memory store seeded with synthetic step data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Ask for consent and print the outcome
//! health-sample authorize
//!
//! # List step samples of the last day and their total
//! health-sample samples
//!
//! # Daily step sums over the last week, as JSON
//! health-sample --days 7 --seed-days 7 --json daily
//!
//! # Save a body mass measurement
//! health-sample save --type body_mass --unit kg --value 61.5
//!
//! # Run the whole flow once
//! health-sample demo
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use health_sample::config::HealthConfig;
use health_sample::logging::{init_from_env, LoggingConfig};
use health_sample::session::{demo_store, HealthSession};
use health_sample::{SampleType, Unit};
use tracing::info;

use helpers::output::Output;

#[derive(Parser)]
#[command(
    name = "health-sample",
    about = "Health data consent, step queries, and sample writes",
    long_about = "Requests consent to a health data store, reads step samples and daily sums, and writes samples back. The store is simulated in memory and seeded with synthetic step data."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Days covered by the query window ending now
    #[arg(long, global = true)]
    days: Option<u32>,

    /// Days of synthetic step data to seed the store with
    #[arg(long, global = true)]
    seed_days: Option<u32>,

    /// Seed for the synthetic data generator
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Request read and write consent
    Authorize,

    /// List samples fully inside the query window and their total
    Samples {
        /// Sample type (steps, body_mass)
        #[arg(long = "type", default_value = "steps")]
        sample_type: SampleType,

        /// Unit to report values in (defaults to the type's unit)
        #[arg(long)]
        unit: Option<Unit>,
    },

    /// Daily cumulative sums over the query window
    Daily {
        /// Sample type (only cumulative types have daily sums)
        #[arg(long = "type", default_value = "steps")]
        sample_type: SampleType,

        /// Unit to report sums in (defaults to the type's unit)
        #[arg(long)]
        unit: Option<Unit>,
    },

    /// Save one sample ending now
    Save {
        /// Sample type (steps, body_mass)
        #[arg(long = "type", default_value = "body_mass")]
        sample_type: SampleType,

        /// Unit of the value (defaults to the type's unit)
        #[arg(long)]
        unit: Option<Unit>,

        /// Measured value
        #[arg(long)]
        value: f64,

        /// Minutes the measurement spans, ending now
        #[arg(long, default_value = "0")]
        minutes: u32,
    },

    /// Authorize, read samples and daily sums concurrently, then save a sample
    Demo {
        /// Body mass in kilograms to save at the end
        #[arg(long, default_value = "60")]
        body_mass: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        LoggingConfig::from_env().with_level("debug").init()?;
    } else {
        init_from_env()?;
    }

    let mut config = HealthConfig::from_env()?;
    if let Some(days) = cli.days {
        config.lookback_days = i64::from(days);
    }
    if let Some(seed_days) = cli.seed_days {
        config = config.with_seed_days(seed_days)?;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let now = Utc::now();
    let session = HealthSession::new(demo_store(&config, now)?, config);
    let output = Output::new(cli.json);
    info!("health-sample CLI ready");

    match cli.command {
        Command::Authorize => commands::authorize::run(&session, &output).await?,
        Command::Samples { sample_type, unit } => {
            commands::samples::run(&session, &output, now, sample_type, unit).await?;
        }
        Command::Daily { sample_type, unit } => {
            commands::daily::run(&session, &output, now, sample_type, unit).await?;
        }
        Command::Save {
            sample_type,
            unit,
            value,
            minutes,
        } => {
            commands::save::run(&session, &output, now, sample_type, unit, value, minutes).await?;
        }
        Command::Demo { body_mass } => {
            commands::demo::run(&session, &output, now, body_mass).await?;
        }
    }

    Ok(())
}
