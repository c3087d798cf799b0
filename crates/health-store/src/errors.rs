// ABOUTME: Structured error types for health store operations
// ABOUTME: Converts store failures into the workspace-wide HealthError taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use health_core::models::{Access, SampleType, Unit};
use health_core::HealthError;
use thiserror::Error;

/// Errors reported by a health store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The platform has no health data capability
    #[error("Health data is not available on this device")]
    Unavailable,

    /// The store resolved an authorization request with an error
    #[error("Authorization request failed: {0}")]
    AuthorizationFailed(String),

    /// Consent has not been granted for this type
    #[error("Not authorized to {access} {sample_type} samples")]
    NotAuthorized {
        /// Refused sample type
        sample_type: SampleType,
        /// Attempted access
        access: Access,
    },

    /// Unit does not measure the type's dimension
    #[error("Unit '{unit}' is not compatible with {sample_type}")]
    IncompatibleUnit {
        /// Sample type
        sample_type: SampleType,
        /// Mismatched unit
        unit: Unit,
    },

    /// The requested statistic cannot be computed for this type
    #[error("Cumulative statistics are not supported for {sample_type}")]
    UnsupportedStatistics {
        /// Sample type that was queried
        sample_type: SampleType,
    },

    /// The statistics interval does not advance time
    #[error("Statistics interval must be positive")]
    InvalidInterval,

    /// Internal store failure (lock poisoning, injected faults)
    #[error("Store failure: {0}")]
    Internal(String),
}

impl StoreError {
    /// Create an internal error
    #[must_use]
    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal(details.into())
    }
}

impl From<StoreError> for HealthError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable => Self::DataUnavailable,
            StoreError::NotAuthorized {
                sample_type,
                access,
            } => Self::NotAuthorized {
                sample_type,
                access,
            },
            StoreError::IncompatibleUnit { sample_type, unit } => {
                Self::IncompatibleUnit { sample_type, unit }
            }
            other => Self::QueryFailed(other.to_string()),
        }
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
