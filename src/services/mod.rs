// ABOUTME: Components that talk to the health store on behalf of the application
// ABOUTME: Consent gate, raw and aggregated readers, and the sample writer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health data components
//!
//! Each component holds a clone of the shared store handle. The gate must grant
//! consent before the readers or the writer are used; the store rejects
//! unauthorized access on its own as well.

/// Consent request and outcome caching
pub mod authorization;

/// Raw sample queries with a truncated total
pub mod sample_reader;

/// Daily cumulative statistics
pub mod aggregate_reader;

/// Single-sample persistence
pub mod sample_writer;

pub use aggregate_reader::AggregateReader;
pub use authorization::{AuthorizationGate, AuthorizationScope};
pub use sample_reader::{SampleReader, SampleSummary};
pub use sample_writer::SampleWriter;
