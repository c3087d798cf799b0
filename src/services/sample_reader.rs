// ABOUTME: Reads raw quantity samples over a date range and reduces them to a total
// ABOUTME: Uses a strict-boundary predicate and truncates each sample before summing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use health_core::constants::defaults;
use health_core::{DateRange, HealthError, HealthResult, Sample, SampleType, Unit};
use health_store::{SamplePredicate, SampleQuery, SharedHealthStore, StoreError};
use serde::Serialize;
use tracing::{debug, warn};

use super::authorization::elapsed_ms;
use crate::config::QueryFailurePolicy;
use crate::logging::StoreLogger;

/// Samples returned by a query and their truncated total
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Samples in store order, which is unspecified
    pub samples: Vec<Sample>,
    /// Sum of each sample's value in the requested unit, truncated per sample
    pub total: i64,
}

impl SampleSummary {
    /// Whether no sample matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Fetches samples fully contained in a range
pub struct SampleReader {
    store: SharedHealthStore,
    policy: QueryFailurePolicy,
}

impl SampleReader {
    /// Create a reader over a shared store handle
    #[must_use]
    pub const fn new(store: SharedHealthStore, policy: QueryFailurePolicy) -> Self {
        Self { store, policy }
    }

    /// Fetch every sample of `sample_type` whose start and end both lie in `range`
    ///
    /// No limit and no ordering are requested. An empty store answer yields an
    /// empty summary with total 0.
    ///
    /// # Errors
    ///
    /// Returns `HealthError::IncompatibleUnit` before contacting the store when
    /// `unit` does not measure `sample_type`. Store failures are returned only
    /// under [`QueryFailurePolicy::Propagate`].
    pub async fn query_samples(
        &self,
        sample_type: SampleType,
        unit: Unit,
        range: &DateRange,
    ) -> HealthResult<SampleSummary> {
        sample_type.ensure_compatible(unit)?;

        let query = SampleQuery::new(sample_type, SamplePredicate::strict(range))
            .with_limit(defaults::NO_LIMIT);

        let started = Instant::now();
        let result = self.store.execute_sample_query(&query).await;
        StoreLogger::log_operation(
            self.store.name(),
            "execute_sample_query",
            result.is_ok(),
            elapsed_ms(started),
        );

        let samples = match result {
            Ok(samples) => samples,
            Err(e) => return self.on_failure(sample_type, e),
        };

        let total = truncated_total(&samples, unit)?;
        debug!(
            sample_type = %sample_type,
            count = samples.len(),
            total,
            "samples fetched"
        );
        Ok(SampleSummary { samples, total })
    }

    fn on_failure(
        &self,
        sample_type: SampleType,
        error: StoreError,
    ) -> HealthResult<SampleSummary> {
        match self.policy {
            QueryFailurePolicy::Empty => {
                warn!(
                    sample_type = %sample_type,
                    error = %error,
                    "sample query failed, returning empty result"
                );
                Ok(SampleSummary::default())
            }
            QueryFailurePolicy::Propagate => Err(HealthError::from(error)),
        }
    }
}

/// Sum sample values in `unit`, truncating each one toward zero first
///
/// `[1.6, 1.6]` totals 2, not 3.
///
/// # Errors
///
/// Returns `HealthError::IncompatibleUnit` if a sample cannot be expressed in `unit`
pub fn truncated_total(samples: &[Sample], unit: Unit) -> HealthResult<i64> {
    samples.iter().try_fold(0_i64, |acc, sample| {
        Ok(acc.saturating_add(sample.value_in(unit)? as i64))
    })
}
