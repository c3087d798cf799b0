// ABOUTME: Output formatting helpers for health-sample
// ABOUTME: Prints results as the demo screen's text lines or as pretty JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::{DateTime, Utc};
use health_sample::services::SampleSummary;
use health_sample::session::StepOverview;
use health_sample::{AuthorizationOutcome, DailyBucket, Sample, Unit};
use serde::Serialize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Writes command results to stdout
pub struct Output {
    json: bool,
}

impl Output {
    #[must_use]
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn authorization(&self, outcome: &AuthorizationOutcome) -> Result<()> {
        if self.json {
            return print_json(outcome);
        }
        println!("authorized: {} ({outcome})", outcome.is_granted());
        Ok(())
    }

    pub fn samples(&self, summary: &SampleSummary, unit: Unit) -> Result<()> {
        if self.json {
            return print_json(summary);
        }
        for sample in &summary.samples {
            print_sample(sample, unit)?;
            println!("---");
        }
        println!("total: {} {unit}", summary.total);
        Ok(())
    }

    pub fn daily(&self, buckets: &[DailyBucket], unit: Unit) -> Result<()> {
        if self.json {
            return print_json(&buckets);
        }
        if buckets.is_empty() {
            println!("no data in range");
        }
        for bucket in buckets {
            println!("startDate: {}", timestamp(bucket.start));
            println!("endDate: {}", timestamp(bucket.end));
            println!("value: {} {unit}", bucket.sum);
        }
        Ok(())
    }

    pub fn saved(&self, sample: &Sample, unit: Unit) -> Result<()> {
        if self.json {
            return print_json(sample);
        }
        println!("saved {} sample {}", sample.sample_type(), sample.uuid());
        print_sample(sample, unit)
    }

    pub fn overview(&self, overview: &StepOverview) -> Result<()> {
        if self.json {
            return print_json(overview);
        }
        println!(
            "range: {} .. {}",
            timestamp(overview.range.start()),
            timestamp(overview.range.end())
        );
        self.samples(&overview.samples, Unit::Count)?;
        println!("===");
        self.daily(&overview.daily, Unit::Count)
    }
}

fn print_sample(sample: &Sample, unit: Unit) -> Result<()> {
    println!("startDate: {}", timestamp(sample.start()));
    println!("endDate: {}", timestamp(sample.end()));
    println!("device: {}", sample.source_device_name().unwrap_or("unknown"));
    println!("value: {} {unit}", sample.value_in(unit)?);
    Ok(())
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
