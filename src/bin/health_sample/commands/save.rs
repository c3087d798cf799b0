// ABOUTME: Sample write command for health-sample
// ABOUTME: Saves one measurement ending now and prints the stored sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use health_sample::session::HealthSession;
use health_sample::{CalendarOffset, DateRange, SampleType, Unit};

use crate::helpers::output::Output;

/// Save `value` spanning the `minutes` before `now`
pub async fn run(
    session: &HealthSession,
    output: &Output,
    now: DateTime<Utc>,
    sample_type: SampleType,
    unit: Option<Unit>,
    value: f64,
    minutes: u32,
) -> Result<()> {
    let unit = unit.unwrap_or_else(|| sample_type.default_unit());
    let span = CalendarOffset::default().with_minutes(i64::from(minutes));
    let range = DateRange::preceding(now, span)?;
    let sample = session.save(sample_type, unit, value, &range).await?;
    output.saved(&sample, unit)
}
