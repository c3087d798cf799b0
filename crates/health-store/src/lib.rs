// ABOUTME: Health data store seam and implementations for sample queries, statistics, and writes
// ABOUTME: Store trait, query/predicate types, statistics collections, and an in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health data store abstractions.
//!
//! The store is the external collaborator that owns consent state and sample
//! persistence. Components never talk to a platform API directly: they receive
//! an `Arc<dyn HealthStore>` handle and issue requests through it.

/// Core store trait
pub mod core;
/// Store-level error types
pub mod errors;
/// In-memory store with configurable availability, consent, and latency
pub mod in_memory;
/// Sample and statistics query types
pub mod query;
/// Deterministic synthetic sample generation
pub mod synthetic;

pub use crate::core::{HealthStore, SharedHealthStore};
pub use errors::{StoreError, StoreResult};
pub use in_memory::{ConsentPolicy, CounterSnapshot, InMemoryHealthStore};
pub use query::{
    PredicateOptions, SamplePredicate, SampleQuery, Statistics, StatisticsCollection,
    StatisticsOptions, StatisticsQuery,
};
pub use synthetic::SyntheticSamples;
