// ABOUTME: In-memory health store for demos, development, and testing
// ABOUTME: Simulates platform availability, consent decisions, latency, and store faults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to StoreError::Internal
// for proper error propagation through the components

//! # In-Memory Health Store
//!
//! Stands in for a platform health service:
//!
//! - Reports availability from a flag instead of probing hardware
//! - Resolves consent requests from a [`ConsentPolicy`] instead of a dialog
//! - Enforces read consent on queries and share consent on saves
//! - Optionally delays every request to exercise asynchronous callers
//! - Counts every contact so callers can assert what reached the store
//!
//! ## Thread Safety
//!
//! All data access is protected by `RwLock`. No lock is held across an await
//! point, so concurrent requests against one handle interleave freely.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use health_core::models::Access;
use health_core::{Sample, SampleType};
use tracing::debug;

use crate::core::HealthStore;
use crate::errors::{StoreError, StoreResult};
use crate::query::{SampleQuery, StatisticsCollection, StatisticsQuery};

const STORE_NAME: &str = "in_memory";

/// How the store answers authorization requests
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConsentPolicy {
    /// Grant every requested type
    #[default]
    GrantAll,
    /// Decline every request
    DenyAll,
    /// Fail the request with a reason
    Fail(String),
}

#[derive(Debug, Default)]
struct StoreCounters {
    authorization_requests: AtomicU64,
    sample_queries: AtomicU64,
    statistics_queries: AtomicU64,
    saves: AtomicU64,
}

/// Point-in-time copy of the store's contact counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Authorization requests received
    pub authorization_requests: u64,
    /// Sample queries received
    pub sample_queries: u64,
    /// Statistics queries received
    pub statistics_queries: u64,
    /// Save requests received
    pub saves: u64,
}

impl CounterSnapshot {
    /// Total number of requests that reached the store
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.authorization_requests + self.sample_queries + self.statistics_queries + self.saves
    }
}

/// In-memory health store
#[derive(Debug)]
pub struct InMemoryHealthStore {
    samples: RwLock<Vec<Sample>>,
    read_grants: RwLock<BTreeSet<SampleType>>,
    share_grants: RwLock<BTreeSet<SampleType>>,
    query_failure: RwLock<Option<String>>,
    save_failure: RwLock<Option<String>>,
    available: bool,
    consent: ConsentPolicy,
    latency: Duration,
    counters: StoreCounters,
}

impl Default for InMemoryHealthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHealthStore {
    /// Empty, available store that grants every consent request
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: RwLock::new(Vec::new()),
            read_grants: RwLock::new(BTreeSet::new()),
            share_grants: RwLock::new(BTreeSet::new()),
            query_failure: RwLock::new(None),
            save_failure: RwLock::new(None),
            available: true,
            consent: ConsentPolicy::GrantAll,
            latency: Duration::ZERO,
            counters: StoreCounters::default(),
        }
    }

    /// Pre-load samples
    #[must_use]
    pub fn with_samples(mut self, samples: Vec<Sample>) -> Self {
        self.samples = RwLock::new(samples);
        self
    }

    /// Set whether health data is available on the simulated device
    #[must_use]
    pub const fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Set how consent requests are answered
    #[must_use]
    pub fn with_consent(mut self, consent: ConsentPolicy) -> Self {
        self.consent = consent;
        self
    }

    /// Delay every request by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every following query fail with `reason` (or succeed again with `None`)
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the internal `RwLock` is poisoned.
    pub fn set_query_failure(&self, reason: Option<String>) -> StoreResult<()> {
        *self
            .query_failure
            .write()
            .map_err(|_| StoreError::internal("RwLock poisoned: query_failure lock"))? = reason;
        Ok(())
    }

    /// Make every following save fail with `reason` (or succeed again with `None`)
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the internal `RwLock` is poisoned.
    pub fn set_save_failure(&self, reason: Option<String>) -> StoreResult<()> {
        *self
            .save_failure
            .write()
            .map_err(|_| StoreError::internal("RwLock poisoned: save_failure lock"))? = reason;
        Ok(())
    }

    /// Add a sample directly, bypassing consent
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the internal `RwLock` is poisoned.
    pub fn add_sample(&self, sample: Sample) -> StoreResult<()> {
        self.samples
            .write()
            .map_err(|_| StoreError::internal("RwLock poisoned: samples lock"))?
            .push(sample);
        Ok(())
    }

    /// Number of stored samples
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the internal `RwLock` is poisoned.
    pub fn sample_count(&self) -> StoreResult<usize> {
        Ok(self
            .samples
            .read()
            .map_err(|_| StoreError::internal("RwLock poisoned: samples lock"))?
            .len())
    }

    /// Copy of the contact counters
    #[must_use]
    pub fn counters(&self) -> CounterSnapshot {
        CounterSnapshot {
            authorization_requests: self.counters.authorization_requests.load(Ordering::Relaxed),
            sample_queries: self.counters.sample_queries.load(Ordering::Relaxed),
            statistics_queries: self.counters.statistics_queries.load(Ordering::Relaxed),
            saves: self.counters.saves.load(Ordering::Relaxed),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }

    fn ensure_granted(&self, sample_type: SampleType, access: Access) -> StoreResult<()> {
        let grants = match access {
            Access::Read => &self.read_grants,
            Access::Share => &self.share_grants,
        };
        let granted = grants
            .read()
            .map_err(|_| StoreError::internal("RwLock poisoned: grants lock"))?
            .contains(&sample_type);
        if granted {
            Ok(())
        } else {
            Err(StoreError::NotAuthorized {
                sample_type,
                access,
            })
        }
    }

    fn injected(slot: &RwLock<Option<String>>) -> StoreResult<()> {
        let failure = slot
            .read()
            .map_err(|_| StoreError::internal("RwLock poisoned: failure lock"))?
            .clone();
        failure.map_or(Ok(()), |reason| Err(StoreError::Internal(reason)))
    }

    fn matching_samples(&self, query: &SampleQuery) -> StoreResult<Vec<Sample>> {
        let samples = self
            .samples
            .read()
            .map_err(|_| StoreError::internal("RwLock poisoned: samples lock"))?;
        let matching = samples
            .iter()
            .filter(|s| s.sample_type() == query.sample_type && query.predicate.matches(s));
        let selected = if query.limit == 0 {
            matching.cloned().collect()
        } else {
            matching.take(query.limit).cloned().collect()
        };
        Ok(selected)
    }
}

#[async_trait]
impl HealthStore for InMemoryHealthStore {
    fn name(&self) -> &'static str {
        STORE_NAME
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_authorization(
        &self,
        to_share: &BTreeSet<SampleType>,
        to_read: &BTreeSet<SampleType>,
    ) -> StoreResult<bool> {
        self.counters
            .authorization_requests
            .fetch_add(1, Ordering::Relaxed);
        self.ensure_available()?;
        self.simulate_latency().await;

        match &self.consent {
            ConsentPolicy::GrantAll => {
                self.share_grants
                    .write()
                    .map_err(|_| StoreError::internal("RwLock poisoned: grants lock"))?
                    .extend(to_share.iter().copied());
                self.read_grants
                    .write()
                    .map_err(|_| StoreError::internal("RwLock poisoned: grants lock"))?
                    .extend(to_read.iter().copied());
                debug!(store = STORE_NAME, ?to_share, ?to_read, "consent granted");
                Ok(true)
            }
            ConsentPolicy::DenyAll => {
                debug!(store = STORE_NAME, "consent declined");
                Ok(false)
            }
            ConsentPolicy::Fail(reason) => Err(StoreError::AuthorizationFailed(reason.clone())),
        }
    }

    async fn execute_sample_query(&self, query: &SampleQuery) -> StoreResult<Vec<Sample>> {
        self.counters.sample_queries.fetch_add(1, Ordering::Relaxed);
        self.ensure_available()?;
        self.simulate_latency().await;
        self.ensure_granted(query.sample_type, Access::Read)?;
        Self::injected(&self.query_failure)?;

        let samples = self.matching_samples(query)?;
        debug!(
            store = STORE_NAME,
            sample_type = %query.sample_type,
            count = samples.len(),
            "sample query executed"
        );
        Ok(samples)
    }

    async fn execute_statistics_query(
        &self,
        query: &StatisticsQuery,
    ) -> StoreResult<StatisticsCollection> {
        self.counters
            .statistics_queries
            .fetch_add(1, Ordering::Relaxed);
        self.ensure_available()?;
        self.simulate_latency().await;
        self.ensure_granted(query.sample_type, Access::Read)?;
        Self::injected(&self.query_failure)?;

        let samples = self
            .samples
            .read()
            .map_err(|_| StoreError::internal("RwLock poisoned: samples lock"))?;
        StatisticsCollection::compute(query, &samples)
    }

    async fn save(&self, sample: Sample) -> StoreResult<()> {
        self.counters.saves.fetch_add(1, Ordering::Relaxed);
        self.ensure_available()?;
        self.simulate_latency().await;
        self.ensure_granted(sample.sample_type(), Access::Share)?;
        Self::injected(&self.save_failure)?;

        debug!(
            store = STORE_NAME,
            sample_type = %sample.sample_type(),
            uuid = %sample.uuid(),
            "sample saved"
        );
        self.add_sample(sample)
    }
}
