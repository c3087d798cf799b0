// ABOUTME: Consent gate that must succeed before any health data is read or written
// ABOUTME: Skips the store when data is unavailable and caches the outcome per store handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authorization Gate
//!
//! Requests read and write consent for a fixed set of sample types. The store's
//! answer is kept as an [`AuthorizationOutcome`] so callers can tell a declined
//! request from an errored one, while [`AuthorizationOutcome::is_granted`] keeps
//! the plain boolean view.

use std::collections::BTreeSet;
use std::time::Instant;

use health_core::{AuthorizationOutcome, HealthError, HealthResult, SampleType};
use health_store::SharedHealthStore;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::logging::StoreLogger;

/// Sample types a gate asks consent for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationScope {
    /// Types the application writes
    pub to_share: BTreeSet<SampleType>,
    /// Types the application reads
    pub to_read: BTreeSet<SampleType>,
}

impl AuthorizationScope {
    /// Build a scope from write and read lists
    #[must_use]
    pub fn new(
        to_share: impl IntoIterator<Item = SampleType>,
        to_read: impl IntoIterator<Item = SampleType>,
    ) -> Self {
        Self {
            to_share: to_share.into_iter().collect(),
            to_read: to_read.into_iter().collect(),
        }
    }

    /// Scope of the demo application: body mass and step writes, step reads
    #[must_use]
    pub fn demo() -> Self {
        Self::new(
            [SampleType::BodyMass, SampleType::StepCount],
            [SampleType::StepCount],
        )
    }
}

impl Default for AuthorizationScope {
    fn default() -> Self {
        Self::demo()
    }
}

/// Requests consent and remembers the answer
pub struct AuthorizationGate {
    store: SharedHealthStore,
    scope: AuthorizationScope,
    last_outcome: RwLock<Option<AuthorizationOutcome>>,
}

impl AuthorizationGate {
    /// Create a gate for `scope` over a shared store handle
    #[must_use]
    pub fn new(store: SharedHealthStore, scope: AuthorizationScope) -> Self {
        Self {
            store,
            scope,
            last_outcome: RwLock::new(None),
        }
    }

    /// Types this gate asks consent for
    #[must_use]
    pub const fn scope(&self) -> &AuthorizationScope {
        &self.scope
    }

    /// Ask the store for consent
    ///
    /// When health data is unavailable on the device this resolves to
    /// [`AuthorizationOutcome::Unavailable`] without contacting the store.
    /// Every other answer, including store errors, becomes an outcome rather
    /// than an `Err`.
    pub async fn request_authorization(&self) -> AuthorizationOutcome {
        let outcome = if self.store.is_available() {
            let started = Instant::now();
            let result = self
                .store
                .request_authorization(&self.scope.to_share, &self.scope.to_read)
                .await;
            StoreLogger::log_operation(
                self.store.name(),
                "request_authorization",
                result.is_ok(),
                elapsed_ms(started),
            );
            match result {
                Ok(true) => AuthorizationOutcome::Granted,
                Ok(false) => AuthorizationOutcome::Denied,
                Err(e) => {
                    warn!(store = self.store.name(), error = %e, "authorization request failed");
                    AuthorizationOutcome::Errored(e.to_string())
                }
            }
        } else {
            debug!(
                store = self.store.name(),
                "health data unavailable, store not contacted"
            );
            AuthorizationOutcome::Unavailable
        };

        info!(outcome = %outcome, "authorization resolved");
        *self.last_outcome.write().await = Some(outcome.clone());
        outcome
    }

    /// Succeed if consent is granted, requesting it only when no grant is cached
    ///
    /// # Errors
    ///
    /// Returns `HealthError::AuthorizationDenied` carrying the outcome when consent
    /// is not granted
    pub async fn ensure_authorized(&self) -> HealthResult<()> {
        if self.is_granted().await {
            return Ok(());
        }
        match self.request_authorization().await {
            AuthorizationOutcome::Granted => Ok(()),
            other => Err(HealthError::AuthorizationDenied(other)),
        }
    }

    /// Outcome of the most recent request, if any
    pub async fn cached_outcome(&self) -> Option<AuthorizationOutcome> {
        self.last_outcome.read().await.clone()
    }

    /// Whether the most recent request was granted
    pub async fn is_granted(&self) -> bool {
        self.last_outcome
            .read()
            .await
            .as_ref()
            .is_some_and(AuthorizationOutcome::is_granted)
    }
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
