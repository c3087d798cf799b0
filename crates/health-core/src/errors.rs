// ABOUTME: Error taxonomy for health data authorization, queries, and writes
// ABOUTME: Maps every failure to a stable ErrorCode so callers can branch without string matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Error Types
//!
//! Every failure surfaced by the components is a [`HealthError`]. None of them
//! is fatal to the process: they are returned to the caller and never abort.
//!
//! - `DataUnavailable` - the platform has no health data capability
//! - `NotAuthorized` - the store refused access for a type
//! - `AuthorizationDenied` - consent was declined or errored before any query
//! - `IncompatibleUnit` - a unit was paired with a type of another dimension
//! - `InvalidRange` / `InvalidDate` - rejected before the store is contacted
//! - `QueryFailed` / `SaveFailed` - store-level failures with a description

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Access, AuthorizationOutcome, SampleType, Unit};

/// Stable error codes for health operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Platform (1000-1999)
    #[serde(rename = "DATA_UNAVAILABLE")]
    DataUnavailable = 1000,

    // Authorization (2000-2999)
    #[serde(rename = "NOT_AUTHORIZED")]
    NotAuthorized = 2000,
    #[serde(rename = "AUTHORIZATION_DENIED")]
    AuthorizationDenied = 2001,

    // Validation (3000-3999)
    #[serde(rename = "INCOMPATIBLE_UNIT")]
    IncompatibleUnit = 3000,
    #[serde(rename = "INVALID_RANGE")]
    InvalidRange = 3001,
    #[serde(rename = "INVALID_DATE")]
    InvalidDate = 3002,

    // Store (5000-5999)
    #[serde(rename = "QUERY_FAILED")]
    QueryFailed = 5000,
    #[serde(rename = "SAVE_FAILED")]
    SaveFailed = 5001,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6000,
}

impl ErrorCode {
    /// Short machine-readable name, matching the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataUnavailable => "DATA_UNAVAILABLE",
            Self::NotAuthorized => "NOT_AUTHORIZED",
            Self::AuthorizationDenied => "AUTHORIZATION_DENIED",
            Self::IncompatibleUnit => "INCOMPATIBLE_UNIT",
            Self::InvalidRange => "INVALID_RANGE",
            Self::InvalidDate => "INVALID_DATE",
            Self::QueryFailed => "QUERY_FAILED",
            Self::SaveFailed => "SAVE_FAILED",
            Self::ConfigInvalid => "CONFIG_INVALID",
        }
    }
}

/// Errors surfaced by health data operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HealthError {
    /// Health data is not available on this device or platform
    #[error("Health data is not available on this device")]
    DataUnavailable,

    /// The store refused access for a sample type
    #[error("Not authorized to {access} {sample_type} samples")]
    NotAuthorized {
        /// Sample type that was refused
        sample_type: SampleType,
        /// Kind of access that was attempted
        access: Access,
    },

    /// Consent was not granted, so no other operation may run
    #[error("Authorization was not granted ({0})")]
    AuthorizationDenied(AuthorizationOutcome),

    /// A unit was paired with a sample type of another dimension
    #[error("Unit '{unit}' is not compatible with {sample_type}")]
    IncompatibleUnit {
        /// Sample type being measured
        sample_type: SampleType,
        /// Unit that does not fit the type
        unit: Unit,
    },

    /// A date range whose start is after its end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested start
        start: DateTime<Utc>,
        /// Requested end
        end: DateTime<Utc>,
    },

    /// Calendar arithmetic produced a date outside the representable range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The store failed while executing a query
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The store failed to persist a sample
    #[error("Save failed: {description}")]
    SaveFailed {
        /// Human-readable description from the store
        description: String,
    },

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HealthError {
    /// Create a "query failed" error
    #[must_use]
    pub fn query_failed(details: impl Into<String>) -> Self {
        Self::QueryFailed(details.into())
    }

    /// Create a "save failed" error
    #[must_use]
    pub fn save_failed(description: impl Into<String>) -> Self {
        Self::SaveFailed {
            description: description.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config(details.into())
    }

    /// Get the stable error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DataUnavailable => ErrorCode::DataUnavailable,
            Self::NotAuthorized { .. } => ErrorCode::NotAuthorized,
            Self::AuthorizationDenied(_) => ErrorCode::AuthorizationDenied,
            Self::IncompatibleUnit { .. } => ErrorCode::IncompatibleUnit,
            Self::InvalidRange { .. } => ErrorCode::InvalidRange,
            Self::InvalidDate(_) => ErrorCode::InvalidDate,
            Self::QueryFailed(_) => ErrorCode::QueryFailed,
            Self::SaveFailed { .. } => ErrorCode::SaveFailed,
            Self::Config(_) => ErrorCode::ConfigInvalid,
        }
    }
}

/// Result alias used across the workspace
pub type HealthResult<T> = Result<T, HealthError>;
