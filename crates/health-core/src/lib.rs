// ABOUTME: Core types and constants for health data sampling and aggregation
// ABOUTME: Foundation crate with error handling, sample data model, and calendar arithmetic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Health Core
//!
//! Foundation crate providing shared types for the health sample workspace.
//! Store implementations and the query/aggregation components both depend on
//! it, so it is kept free of async and I/O concerns.
//!
//! ## Modules
//!
//! - **errors**: `HealthError` taxonomy with stable error codes
//! - **models**: sample types, units, quantities, samples, date ranges, daily buckets
//! - **calendar**: locale-independent calendar arithmetic on UTC timestamps
//! - **constants**: defaults shared by the store and the components

/// Unified error handling with stable error codes
pub mod errors;

/// Sample data model (types, units, quantities, samples, ranges, buckets)
pub mod models;

/// Locale-independent calendar arithmetic
pub mod calendar;

/// Workspace-wide constants
pub mod constants;

pub use calendar::CalendarOffset;
pub use errors::{ErrorCode, HealthError, HealthResult};
pub use models::{
    AggregationStyle, AuthorizationOutcome, DailyBucket, DateRange, Dimension, Quantity, Sample,
    SampleType, Unit,
};
