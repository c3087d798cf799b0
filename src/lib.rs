// ABOUTME: Library entry point for the health sample application
// ABOUTME: Consent gate, step queries, daily aggregation, and sample writes over a shared store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Health Sample
//!
//! Requests consent to a health data store, reads step-count samples, reduces
//! them to a total and to daily sums, and writes samples back.
//!
//! ## Architecture
//!
//! - **`health_core`**: data model, error taxonomy, calendar arithmetic
//! - **`health_store`**: the asynchronous store seam and an in-memory store
//! - **Services**: `AuthorizationGate`, `SampleReader`, `AggregateReader`, `SampleWriter`
//! - **Session**: one shared store handle wired into every component
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use health_sample::config::HealthConfig;
//! use health_sample::session::{demo_store, HealthSession};
//! use health_sample::{HealthResult, SampleType, Unit};
//!
//! #[tokio::main]
//! async fn main() -> HealthResult<()> {
//!     let config = HealthConfig::from_env()?;
//!     let now = Utc::now();
//!     let session = HealthSession::new(demo_store(&config, now)?, config);
//!
//!     if session.authorize().await.is_granted() {
//!         let range = session.default_range(now)?;
//!         let summary = session.samples(SampleType::StepCount, Unit::Count, &range).await?;
//!         println!("{} steps", summary.total);
//!     }
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Tracing subscriber setup and structured store logging
pub mod logging;

/// Consent gate, readers, and writer
pub mod services;

/// Session facade over one shared store handle
pub mod session;

pub use health_core::{
    AuthorizationOutcome, CalendarOffset, DailyBucket, DateRange, ErrorCode, HealthError,
    HealthResult, Quantity, Sample, SampleType, Unit,
};
pub use health_store::{
    ConsentPolicy, HealthStore, InMemoryHealthStore, SharedHealthStore, StoreError,
};
