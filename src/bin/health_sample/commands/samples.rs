// ABOUTME: Sample listing command for health-sample
// ABOUTME: Prints every sample inside the query window followed by the truncated total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use health_sample::session::HealthSession;
use health_sample::{SampleType, Unit};

use crate::helpers::output::Output;

/// Query samples of `sample_type` over the default window ending at `now`
pub async fn run(
    session: &HealthSession,
    output: &Output,
    now: DateTime<Utc>,
    sample_type: SampleType,
    unit: Option<Unit>,
) -> Result<()> {
    let unit = unit.unwrap_or_else(|| sample_type.default_unit());
    let range = session.default_range(now)?;
    let summary = session.samples(sample_type, unit, &range).await?;
    output.samples(&summary, unit)
}
