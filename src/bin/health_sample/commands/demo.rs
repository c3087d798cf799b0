// ABOUTME: End-to-end demo command for health-sample
// ABOUTME: Authorizes, reads samples and daily sums concurrently, then saves a body mass sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use health_sample::session::HealthSession;
use health_sample::{DateRange, SampleType, Unit};
use tracing::warn;

use crate::helpers::output::Output;

/// Walk through every operation once
pub async fn run(
    session: &HealthSession,
    output: &Output,
    now: DateTime<Utc>,
    body_mass: f64,
) -> Result<()> {
    let outcome = session.authorize().await;
    output.authorization(&outcome)?;
    if !outcome.is_granted() {
        warn!(outcome = %outcome, "consent not granted, skipping queries");
        return Ok(());
    }

    let range = session.default_range(now)?;
    let overview = session.step_overview(range).await?;
    output.overview(&overview)?;

    let instant = DateRange::new(now, now)?;
    let sample = session
        .save(SampleType::BodyMass, Unit::Kilogram, body_mass, &instant)
        .await?;
    output.saved(&sample, Unit::Kilogram)
}
