// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, fixed timestamps, sample builders, and pre-authorized stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `health_sample`

use std::collections::BTreeSet;
use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, TimeZone, Utc};
use health_sample::{HealthStore, InMemoryHealthStore, Quantity, Sample, SampleType, Unit};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// 2024-05-`day` at `hour`:00 UTC
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

/// Step sample starting at `start` and lasting `minutes`
pub fn steps(value: f64, start: DateTime<Utc>, minutes: i64) -> Sample {
    Sample::new(
        SampleType::StepCount,
        Quantity::new(value, Unit::Count),
        start,
        start + Duration::minutes(minutes),
    )
    .unwrap()
}

/// Instantaneous body mass sample in kilograms
pub fn body_mass(kilograms: f64, at: DateTime<Utc>) -> Sample {
    Sample::new(
        SampleType::BodyMass,
        Quantity::new(kilograms, Unit::Kilogram),
        at,
        at,
    )
    .unwrap()
}

/// Every sample type
pub fn all_types() -> BTreeSet<SampleType> {
    [SampleType::StepCount, SampleType::BodyMass].into()
}

/// Store holding `samples` with read and write consent already granted for every type
pub async fn authorized_store(samples: Vec<Sample>) -> Arc<InMemoryHealthStore> {
    init_test_logging();
    let store = Arc::new(InMemoryHealthStore::new().with_samples(samples));
    let granted = store
        .request_authorization(&all_types(), &all_types())
        .await
        .unwrap();
    assert!(granted);
    store
}
