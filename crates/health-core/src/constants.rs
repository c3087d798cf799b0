// ABOUTME: Constants shared by health stores, query components, and the CLI
// ABOUTME: Pure data constants organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain

/// Query defaults
pub mod defaults {
    /// Days covered by the default query window (now minus one day)
    pub const LOOKBACK_DAYS: i64 = 1;
    /// Width of a statistics bucket in days
    pub const STATISTICS_INTERVAL_DAYS: i64 = 1;
    /// Sample query limit meaning "no limit"
    pub const NO_LIMIT: usize = 0;
    /// Days of synthetic step data loaded into the demo store
    pub const SEED_DAYS: u32 = 3;
    /// Largest accepted synthetic data window in days
    pub const MAX_SEED_DAYS: u32 = 366;
}

/// Environment variable names
pub mod env_config {
    /// Days covered by the default query window
    pub const LOOKBACK_DAYS: &str = "HEALTH_SAMPLE_LOOKBACK_DAYS";
    /// `empty` or `propagate`
    pub const QUERY_FAILURE_POLICY: &str = "HEALTH_SAMPLE_QUERY_FAILURE_POLICY";
    /// Device name attached to written samples
    pub const DEVICE_NAME: &str = "HEALTH_SAMPLE_DEVICE_NAME";
    /// Whether the simulated platform reports health data as available
    pub const DATA_AVAILABLE: &str = "HEALTH_SAMPLE_DATA_AVAILABLE";
    /// Simulated store latency in milliseconds
    pub const STORE_LATENCY_MS: &str = "HEALTH_SAMPLE_STORE_LATENCY_MS";
    /// Seed for the synthetic sample generator
    pub const SEED: &str = "HEALTH_SAMPLE_SEED";
    /// Days of synthetic data loaded into the demo store
    pub const SEED_DAYS: &str = "HEALTH_SAMPLE_SEED_DAYS";
}

/// Service identification for structured logs
pub mod service_names {
    /// Name reported in startup logs
    pub const HEALTH_SAMPLE: &str = "health-sample";
}

/// Device names used by synthetic data
pub mod devices {
    /// Device name on generated step samples
    pub const SYNTHETIC_PEDOMETER: &str = "Synthetic Pedometer";
}
