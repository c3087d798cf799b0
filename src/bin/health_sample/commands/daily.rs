// ABOUTME: Daily statistics command for health-sample
// ABOUTME: Prints one cumulative sum per day of the query window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use health_sample::session::HealthSession;
use health_sample::{SampleType, Unit};

use crate::helpers::output::Output;

/// Query daily sums of `sample_type` over the default window ending at `now`
pub async fn run(
    session: &HealthSession,
    output: &Output,
    now: DateTime<Utc>,
    sample_type: SampleType,
    unit: Option<Unit>,
) -> Result<()> {
    let unit = unit.unwrap_or_else(|| sample_type.default_unit());
    let range = session.default_range(now)?;
    let buckets = session.daily(sample_type, unit, &range).await?;
    output.daily(&buckets, unit)
}
