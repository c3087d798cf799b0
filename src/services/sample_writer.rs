// ABOUTME: Builds one quantity sample and submits it to the store
// ABOUTME: Single-shot persistence with no retry and no deduplication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use health_core::{DateRange, HealthError, HealthResult, Quantity, Sample, SampleType, Unit};
use health_store::SharedHealthStore;
use tracing::{info, warn};

use super::authorization::elapsed_ms;
use crate::logging::StoreLogger;

/// Persists samples into the store
pub struct SampleWriter {
    store: SharedHealthStore,
    device_name: Option<String>,
}

impl SampleWriter {
    /// Create a writer; `device_name` is attached to every sample it builds
    #[must_use]
    pub const fn new(store: SharedHealthStore, device_name: Option<String>) -> Self {
        Self { store, device_name }
    }

    /// Save `value` measured in `unit` over `range`
    ///
    /// Calling this twice with the same arguments stores two samples.
    ///
    /// # Errors
    ///
    /// Returns `HealthError::IncompatibleUnit` when the sample cannot be built,
    /// or `HealthError::SaveFailed` with the store's description when
    /// persistence fails
    pub async fn save_sample(
        &self,
        sample_type: SampleType,
        unit: Unit,
        value: f64,
        range: &DateRange,
    ) -> HealthResult<Sample> {
        let mut sample = Sample::new(
            sample_type,
            Quantity::new(value, unit),
            range.start(),
            range.end(),
        )?;
        if let Some(name) = &self.device_name {
            sample = sample.with_device_name(name.clone());
        }

        let started = Instant::now();
        let result = self.store.save(sample.clone()).await;
        StoreLogger::log_operation(
            self.store.name(),
            "save",
            result.is_ok(),
            elapsed_ms(started),
        );

        match result {
            Ok(()) => {
                info!(
                    sample_type = %sample_type,
                    uuid = %sample.uuid(),
                    value,
                    unit = %unit,
                    "sample saved"
                );
                Ok(sample)
            }
            Err(e) => {
                warn!(sample_type = %sample_type, error = %e, "sample save failed");
                Err(HealthError::save_failed(e.to_string()))
            }
        }
    }
}
