// ABOUTME: Session facade owning the shared store handle and the four health components
// ABOUTME: Enforces consent before reads and writes and runs independent reads concurrently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Session
//!
//! One store handle is created per process and shared by every component.
//! [`HealthSession`] wires that handle into the gate, both readers and the
//! writer, and refuses to run a query or a save until consent is granted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use health_core::constants::devices;
use health_core::{
    AuthorizationOutcome, DailyBucket, DateRange, HealthResult, Sample, SampleType, Unit,
};
use health_store::{ConsentPolicy, InMemoryHealthStore, SharedHealthStore, SyntheticSamples};
use serde::Serialize;
use tracing::info;

use crate::config::HealthConfig;
use crate::services::{
    AggregateReader, AuthorizationGate, AuthorizationScope, SampleReader, SampleSummary,
    SampleWriter,
};

/// Raw and daily views of the same range, fetched together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOverview {
    /// Range both queries covered
    pub range: DateRange,
    /// Raw samples and their total
    pub samples: SampleSummary,
    /// Daily cumulative sums
    pub daily: Vec<DailyBucket>,
}

/// Components bound to one shared store handle
pub struct HealthSession {
    store: SharedHealthStore,
    config: HealthConfig,
    gate: AuthorizationGate,
    sample_reader: SampleReader,
    aggregate_reader: AggregateReader,
    writer: SampleWriter,
}

impl HealthSession {
    /// Build a session over `store` with the demo consent scope
    #[must_use]
    pub fn new(store: SharedHealthStore, config: HealthConfig) -> Self {
        Self::with_scope(store, config, AuthorizationScope::demo())
    }

    /// Build a session asking consent for a custom scope
    #[must_use]
    pub fn with_scope(
        store: SharedHealthStore,
        config: HealthConfig,
        scope: AuthorizationScope,
    ) -> Self {
        let policy = config.query_failure_policy;
        Self {
            gate: AuthorizationGate::new(Arc::clone(&store), scope),
            sample_reader: SampleReader::new(Arc::clone(&store), policy),
            aggregate_reader: AggregateReader::new(Arc::clone(&store), policy),
            writer: SampleWriter::new(Arc::clone(&store), config.device_name.clone()),
            store,
            config,
        }
    }

    /// The shared store handle
    #[must_use]
    pub fn store(&self) -> SharedHealthStore {
        Arc::clone(&self.store)
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Consent gate
    #[must_use]
    pub const fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    /// Default query window: the configured lookback ending at `now`
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if the window start is not representable
    pub fn default_range(&self, now: DateTime<Utc>) -> HealthResult<DateRange> {
        DateRange::preceding(now, self.config.lookback())
    }

    /// Request consent, always contacting the store unless data is unavailable
    pub async fn authorize(&self) -> AuthorizationOutcome {
        self.gate.request_authorization().await
    }

    /// Samples of `sample_type` fully inside `range`, with their truncated total
    ///
    /// # Errors
    ///
    /// Returns `HealthError::AuthorizationDenied` without querying when consent
    /// is not granted, otherwise whatever the reader returns
    pub async fn samples(
        &self,
        sample_type: SampleType,
        unit: Unit,
        range: &DateRange,
    ) -> HealthResult<SampleSummary> {
        self.gate.ensure_authorized().await?;
        self.sample_reader
            .query_samples(sample_type, unit, range)
            .await
    }

    /// Daily cumulative sums of `sample_type` over `range`
    ///
    /// # Errors
    ///
    /// Returns `HealthError::AuthorizationDenied` without querying when consent
    /// is not granted, otherwise whatever the reader returns
    pub async fn daily(
        &self,
        sample_type: SampleType,
        unit: Unit,
        range: &DateRange,
    ) -> HealthResult<Vec<DailyBucket>> {
        self.gate.ensure_authorized().await?;
        self.aggregate_reader
            .query_daily_statistics(sample_type, unit, range)
            .await
    }

    /// Persist one sample covering `range`
    ///
    /// # Errors
    ///
    /// Returns `HealthError::AuthorizationDenied` without saving when consent is
    /// not granted, otherwise whatever the writer returns
    pub async fn save(
        &self,
        sample_type: SampleType,
        unit: Unit,
        value: f64,
        range: &DateRange,
    ) -> HealthResult<Sample> {
        self.gate.ensure_authorized().await?;
        self.writer
            .save_sample(sample_type, unit, value, range)
            .await
    }

    /// Step samples and daily step sums for `range`, queried concurrently
    ///
    /// # Errors
    ///
    /// Returns `HealthError::AuthorizationDenied` when consent is not granted,
    /// or the first reader error
    pub async fn step_overview(&self, range: DateRange) -> HealthResult<StepOverview> {
        self.gate.ensure_authorized().await?;
        let (samples, daily) = tokio::join!(
            self.sample_reader
                .query_samples(SampleType::StepCount, Unit::Count, &range),
            self.aggregate_reader
                .query_daily_statistics(SampleType::StepCount, Unit::Count, &range),
        );
        Ok(StepOverview {
            range,
            samples: samples?,
            daily: daily?,
        })
    }
}

/// Build the in-memory store described by `config`, seeded with synthetic steps ending at `now`
///
/// # Errors
///
/// Returns an error if synthetic sample timestamps fall outside the calendar
pub fn demo_store(
    config: &HealthConfig,
    now: DateTime<Utc>,
) -> HealthResult<Arc<InMemoryHealthStore>> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let samples = SyntheticSamples::hourly_steps(now, config.seed_days, seed)?;
    info!(
        seed,
        days = config.seed_days,
        count = samples.len(),
        device = devices::SYNTHETIC_PEDOMETER,
        "demo store seeded"
    );

    Ok(Arc::new(
        InMemoryHealthStore::new()
            .with_samples(samples)
            .with_availability(config.data_available)
            .with_consent(ConsentPolicy::GrantAll)
            .with_latency(config.store_latency),
    ))
}
