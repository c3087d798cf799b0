// ABOUTME: Environment configuration for query windows, failure policy, and the simulated store
// ABOUTME: Parses HEALTH_SAMPLE_* variables into a strongly typed HealthConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use health_core::constants::{defaults, env_config};
use health_core::{CalendarOffset, HealthError, HealthResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// What readers do when the store fails a query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryFailurePolicy {
    /// Log the failure and return an empty result
    #[default]
    Empty,
    /// Return the failure to the caller
    Propagate,
}

impl FromStr for QueryFailurePolicy {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "propagate" => Ok(Self::Propagate),
            other => Err(HealthError::config(format!(
                "{} must be 'empty' or 'propagate', got '{other}'",
                env_config::QUERY_FAILURE_POLICY
            ))),
        }
    }
}

impl fmt::Display for QueryFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Propagate => write!(f, "propagate"),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthConfig {
    /// Days covered by the default query window ending now
    pub lookback_days: i64,
    /// Reader behavior on store failures
    pub query_failure_policy: QueryFailurePolicy,
    /// Device name attached to written samples
    pub device_name: Option<String>,
    /// Whether the simulated platform has health data
    pub data_available: bool,
    /// Delay applied by the simulated store to every request
    pub store_latency: Duration,
    /// Seed for synthetic data, random per run when absent
    pub seed: Option<u64>,
    /// Days of synthetic step data loaded into the demo store
    pub seed_days: u32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            lookback_days: defaults::LOOKBACK_DAYS,
            query_failure_policy: QueryFailurePolicy::default(),
            device_name: None,
            data_available: true,
            store_latency: Duration::ZERO,
            seed: None,
            seed_days: defaults::SEED_DAYS,
        }
    }
}

impl HealthConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are errors.
    ///
    /// # Errors
    ///
    /// Returns `HealthError::Config` naming the offending variable
    pub fn from_env() -> HealthResult<Self> {
        let defaults = Self::default();

        let lookback_days = parse_var(env_config::LOOKBACK_DAYS)?.unwrap_or(defaults.lookback_days);
        if lookback_days < 0 {
            return Err(HealthError::config(format!(
                "{} must not be negative",
                env_config::LOOKBACK_DAYS
            )));
        }

        let config = Self {
            lookback_days,
            query_failure_policy: parse_var(env_config::QUERY_FAILURE_POLICY)?
                .unwrap_or(defaults.query_failure_policy),
            device_name: env::var(env_config::DEVICE_NAME)
                .ok()
                .filter(|name| !name.trim().is_empty()),
            data_available: parse_var(env_config::DATA_AVAILABLE)?
                .unwrap_or(defaults.data_available),
            store_latency: parse_var(env_config::STORE_LATENCY_MS)?
                .map_or(defaults.store_latency, Duration::from_millis),
            seed: parse_var(env_config::SEED)?,
            seed_days: defaults.seed_days,
        }
        .with_seed_days(parse_var(env_config::SEED_DAYS)?.unwrap_or(defaults.seed_days))?;

        info!(
            lookback_days = config.lookback_days,
            policy = %config.query_failure_policy,
            data_available = config.data_available,
            "health configuration loaded"
        );
        Ok(config)
    }

    /// Replace the synthetic data window
    ///
    /// # Errors
    ///
    /// Returns `HealthError::Config` if `seed_days` exceeds `defaults::MAX_SEED_DAYS`
    pub fn with_seed_days(mut self, seed_days: u32) -> HealthResult<Self> {
        if seed_days > defaults::MAX_SEED_DAYS {
            return Err(HealthError::config(format!(
                "{} must be at most {}, got {seed_days}",
                env_config::SEED_DAYS,
                defaults::MAX_SEED_DAYS
            )));
        }
        self.seed_days = seed_days;
        Ok(self)
    }

    /// Calendar offset of the default query window
    #[must_use]
    pub const fn lookback(&self) -> CalendarOffset {
        CalendarOffset::days(self.lookback_days)
    }
}

fn parse_var<T>(key: &str) -> HealthResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HealthError::config(format!("{key}='{raw}': {e}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "Propagate".parse::<QueryFailurePolicy>().unwrap(),
            QueryFailurePolicy::Propagate
        );
        assert_eq!(
            "empty".parse::<QueryFailurePolicy>().unwrap(),
            QueryFailurePolicy::Empty
        );
        assert!("retry".parse::<QueryFailurePolicy>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = HealthConfig::default();
        assert_eq!(config.lookback_days, 1);
        assert_eq!(config.query_failure_policy, QueryFailurePolicy::Empty);
        assert!(config.data_available);
        assert_eq!(config.lookback(), CalendarOffset::days(1));
    }

    #[test]
    fn test_seed_days_bound() {
        let config = HealthConfig::default()
            .with_seed_days(defaults::MAX_SEED_DAYS)
            .unwrap();
        assert_eq!(config.seed_days, defaults::MAX_SEED_DAYS);

        let err = HealthConfig::default()
            .with_seed_days(defaults::MAX_SEED_DAYS + 1)
            .unwrap_err();
        assert!(matches!(err, HealthError::Config(_)));
    }
}
