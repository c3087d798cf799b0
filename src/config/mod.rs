// ABOUTME: Configuration module for query windows, reader failure policy, and store simulation
// ABOUTME: Re-exports the environment-driven HealthConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration is read from environment variables only; CLI flags may
//! override individual fields after loading.

/// Environment variable parsing
pub mod environment;

pub use environment::{HealthConfig, QueryFailurePolicy};
