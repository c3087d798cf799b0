// ABOUTME: Core health store trait consumed by authorization, query, and write components
// ABOUTME: Defines the asynchronous request/response contract every store implementation follows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Store Contract
//!
//! The `HealthStore` trait is the single seam between the query/aggregation
//! components and whatever actually holds health data (a platform service,
//! a remote API, or the in-memory store used for demos and tests).
//!
//! ## Request Side
//!
//! - **Consent**: sets of `SampleType` to share (write) and to read
//! - **Sample queries**: `SampleQuery` with a `SamplePredicate` and a limit
//! - **Statistics queries**: `StatisticsQuery` with anchor date and interval
//! - **Writes**: one immutable `Sample`
//!
//! ## Completion Model
//!
//! Every request is an independent future. The store decides where the work
//! runs; callers are never blocked while it resolves. Requests issued
//! concurrently against one handle are not serialized by this contract and the
//! visible order of their effects is up to the store. There is no cancellation
//! or timeout: a request runs to completion or failure.
//!
//! ## Example: Implementing a Store
//!
//! ```rust,no_run
//! use std::collections::BTreeSet;
//! use async_trait::async_trait;
//! use health_core::{Sample, SampleType};
//! use health_store::{HealthStore, SampleQuery, StatisticsCollection, StatisticsQuery, StoreError, StoreResult};
//!
//! struct NullStore;
//!
//! #[async_trait]
//! impl HealthStore for NullStore {
//!     fn name(&self) -> &'static str { "null" }
//!     fn is_available(&self) -> bool { false }
//!     async fn request_authorization(
//!         &self,
//!         _to_share: &BTreeSet<SampleType>,
//!         _to_read: &BTreeSet<SampleType>,
//!     ) -> StoreResult<bool> {
//!         Err(StoreError::Unavailable)
//!     }
//!     async fn execute_sample_query(&self, _query: &SampleQuery) -> StoreResult<Vec<Sample>> {
//!         Err(StoreError::Unavailable)
//!     }
//!     async fn execute_statistics_query(
//!         &self,
//!         _query: &StatisticsQuery,
//!     ) -> StoreResult<StatisticsCollection> {
//!         Err(StoreError::Unavailable)
//!     }
//!     async fn save(&self, _sample: Sample) -> StoreResult<()> {
//!         Err(StoreError::Unavailable)
//!     }
//! }
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use health_core::{Sample, SampleType};

use crate::errors::StoreResult;
use crate::query::{SampleQuery, StatisticsCollection, StatisticsQuery};

/// Asynchronous health data store
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Store name for logging
    fn name(&self) -> &'static str;

    /// Whether health data exists on this device at all
    ///
    /// This is a static platform capability check; it does not count as
    /// contacting the store.
    fn is_available(&self) -> bool;

    /// Ask for consent to write `to_share` and read `to_read`
    ///
    /// Resolves to `Ok(true)` when the request was accepted, `Ok(false)` when it
    /// was declined.
    ///
    /// # Errors
    ///
    /// Returns an error if the store could not resolve the request
    async fn request_authorization(
        &self,
        to_share: &BTreeSet<SampleType>,
        to_read: &BTreeSet<SampleType>,
    ) -> StoreResult<bool>;

    /// Fetch raw samples matching a query, in no particular order
    ///
    /// # Errors
    ///
    /// Returns an error if access is refused or the store fails
    async fn execute_sample_query(&self, query: &SampleQuery) -> StoreResult<Vec<Sample>>;

    /// Compute interval statistics for a query
    ///
    /// # Errors
    ///
    /// Returns an error if access is refused, the statistic is unsupported for
    /// the type, or the store fails
    async fn execute_statistics_query(
        &self,
        query: &StatisticsQuery,
    ) -> StoreResult<StatisticsCollection>;

    /// Persist one sample
    ///
    /// No deduplication is performed: saving equal values twice stores two samples.
    ///
    /// # Errors
    ///
    /// Returns an error if write access is refused or persistence fails
    async fn save(&self, sample: Sample) -> StoreResult<()>;
}

/// Shared store handle, created once per process and passed to every component
pub type SharedHealthStore = Arc<dyn HealthStore>;
