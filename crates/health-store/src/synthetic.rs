// ABOUTME: Deterministic synthetic step-count samples for demos and tests
// ABOUTME: Generates hourly pedometer samples with a seeded RNG and a day/night activity curve
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Timelike, Utc};
use health_core::constants::{defaults, devices};
use health_core::{HealthError, HealthResult, Quantity, Sample, SampleType, Unit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic sample generator
pub struct SyntheticSamples;

impl SyntheticSamples {
    /// Hourly step samples for the `days` days before `end`
    ///
    /// Each hour gets at most one sample, starting on the hour and lasting
    /// 10 to 55 minutes. Night hours are mostly empty. The same `seed` always
    /// produces the same values.
    ///
    /// # Errors
    ///
    /// Returns `HealthError::Config` if `days` exceeds
    /// `defaults::MAX_SEED_DAYS` and `HealthError::InvalidDate` if the window
    /// falls outside the calendar
    pub fn hourly_steps(end: DateTime<Utc>, days: u32, seed: u64) -> HealthResult<Vec<Sample>> {
        if days > defaults::MAX_SEED_DAYS {
            return Err(HealthError::config(format!(
                "seed days {days} exceeds maximum of {}",
                defaults::MAX_SEED_DAYS
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let hours = i64::from(days) * 24;
        let outside = || HealthError::InvalidDate(format!("{days} days before {end} overflows"));
        let first_hour = end
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(end)
            .checked_sub_signed(Duration::try_hours(hours).ok_or_else(outside)?)
            .ok_or_else(outside)?;

        let mut samples = Vec::new();
        for offset in 0..hours {
            let start = first_hour
                .checked_add_signed(Duration::hours(offset))
                .ok_or_else(outside)?;
            let peak: u32 = match start.hour() {
                0..=5 => 40,
                6..=8 | 18..=22 => 900,
                9..=17 => 600,
                _ => 150,
            };
            if rng.gen_bool(0.2) {
                continue;
            }
            let steps = f64::from(rng.gen_range(0..=peak));
            let minutes = rng.gen_range(10..=55);
            let Some(sample_end) = start.checked_add_signed(Duration::minutes(minutes)) else {
                break;
            };
            if sample_end > end {
                break;
            }
            samples.push(
                Sample::new(
                    SampleType::StepCount,
                    Quantity::new(steps, Unit::Count),
                    start,
                    sample_end,
                )?
                .with_device_name(devices::SYNTHETIC_PEDOMETER),
            );
        }
        Ok(samples)
    }
}
