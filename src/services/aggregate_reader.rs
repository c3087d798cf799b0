// ABOUTME: Reads daily cumulative sums through the store's statistics query
// ABOUTME: Anchors one-day buckets at the range start and walks them forward in order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use health_core::constants::defaults;
use health_core::{
    CalendarOffset, DailyBucket, DateRange, HealthError, HealthResult, SampleType, Unit,
};
use health_store::{SamplePredicate, SharedHealthStore, StatisticsQuery, StoreError};
use tracing::{debug, warn};

use super::authorization::elapsed_ms;
use crate::config::QueryFailurePolicy;
use crate::logging::StoreLogger;

/// Fetches per-day totals without client-side bucketing
pub struct AggregateReader {
    store: SharedHealthStore,
    policy: QueryFailurePolicy,
}

impl AggregateReader {
    /// Create a reader over a shared store handle
    #[must_use]
    pub const fn new(store: SharedHealthStore, policy: QueryFailurePolicy) -> Self {
        Self { store, policy }
    }

    /// Daily cumulative sums of `sample_type` over `range`, ascending by day
    ///
    /// Buckets are one day wide and anchored at `range.start()`. Days without
    /// samples are omitted, never zero-filled.
    ///
    /// # Errors
    ///
    /// Returns `HealthError::IncompatibleUnit` before contacting the store when
    /// `unit` does not measure `sample_type`. Store failures, including a
    /// discrete type that has no cumulative sum, are returned only under
    /// [`QueryFailurePolicy::Propagate`].
    pub async fn query_daily_statistics(
        &self,
        sample_type: SampleType,
        unit: Unit,
        range: &DateRange,
    ) -> HealthResult<Vec<DailyBucket>> {
        sample_type.ensure_compatible(unit)?;

        let query = StatisticsQuery::cumulative_sum(
            sample_type,
            SamplePredicate::strict(range),
            range.start(),
            CalendarOffset::days(defaults::STATISTICS_INTERVAL_DAYS),
        );

        let started = Instant::now();
        let result = self.store.execute_statistics_query(&query).await;
        StoreLogger::log_operation(
            self.store.name(),
            "execute_statistics_query",
            result.is_ok(),
            elapsed_ms(started),
        );

        let collection = match result {
            Ok(collection) => collection,
            Err(e) => return self.on_failure(sample_type, e),
        };

        let mut buckets = Vec::new();
        for statistics in collection.enumerate(range.start(), range.end()) {
            let Some(sum) = statistics.sum else {
                continue;
            };
            buckets.push(DailyBucket {
                day: statistics.start.date_naive(),
                start: statistics.start,
                end: statistics.end,
                sum: sum.value_in(sample_type, unit)?,
            });
        }

        debug!(
            sample_type = %sample_type,
            days = buckets.len(),
            "daily statistics fetched"
        );
        Ok(buckets)
    }

    fn on_failure(
        &self,
        sample_type: SampleType,
        error: StoreError,
    ) -> HealthResult<Vec<DailyBucket>> {
        match self.policy {
            QueryFailurePolicy::Empty => {
                warn!(
                    sample_type = %sample_type,
                    error = %error,
                    "statistics query failed, returning no buckets"
                );
                Ok(Vec::new())
            }
            QueryFailurePolicy::Propagate => Err(HealthError::from(error)),
        }
    }
}
