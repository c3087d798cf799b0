// ABOUTME: Integration tests for the consent gate
// ABOUTME: Covers unavailable data, declined and errored requests, and outcome caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use health_sample::services::{AuthorizationGate, AuthorizationScope};
use health_core::models::Access;
use health_sample::{
    AuthorizationOutcome, ConsentPolicy, DateRange, HealthError, HealthStore, InMemoryHealthStore,
    SampleType, StoreError,
};
use health_store::{SamplePredicate, SampleQuery};

fn gate_over(store: &Arc<InMemoryHealthStore>) -> AuthorizationGate {
    common::init_test_logging();
    AuthorizationGate::new(store.clone(), AuthorizationScope::demo())
}

#[tokio::test]
async fn test_unavailable_data_skips_the_store() {
    let store = Arc::new(InMemoryHealthStore::new().with_availability(false));
    let gate = gate_over(&store);

    let outcome = gate.request_authorization().await;

    assert_eq!(outcome, AuthorizationOutcome::Unavailable);
    assert!(!outcome.is_granted());
    assert_eq!(store.counters().total(), 0);
}

#[tokio::test]
async fn test_granted_request() {
    let store = Arc::new(InMemoryHealthStore::new());
    let gate = gate_over(&store);

    assert!(gate.cached_outcome().await.is_none());
    let outcome = gate.request_authorization().await;

    assert_eq!(outcome, AuthorizationOutcome::Granted);
    assert_eq!(store.counters().authorization_requests, 1);
    assert_eq!(gate.cached_outcome().await, Some(AuthorizationOutcome::Granted));
}

#[tokio::test]
async fn test_declined_request_is_denied() {
    let store = Arc::new(InMemoryHealthStore::new().with_consent(ConsentPolicy::DenyAll));
    let gate = gate_over(&store);

    let outcome = gate.request_authorization().await;

    assert_eq!(outcome, AuthorizationOutcome::Denied);
    assert!(!gate.is_granted().await);
}

#[tokio::test]
async fn test_store_error_is_distinguishable_from_denial() {
    let store = Arc::new(
        InMemoryHealthStore::new().with_consent(ConsentPolicy::Fail("dialog dismissed".into())),
    );
    let gate = gate_over(&store);

    let outcome = gate.request_authorization().await;

    match &outcome {
        AuthorizationOutcome::Errored(reason) => assert!(reason.contains("dialog dismissed")),
        other => panic!("expected an errored outcome, got {other:?}"),
    }
    assert_ne!(outcome, AuthorizationOutcome::Denied);
    assert!(!outcome.is_granted());
}

#[tokio::test]
async fn test_ensure_authorized_reuses_cached_grant() {
    let store = Arc::new(InMemoryHealthStore::new());
    let gate = gate_over(&store);

    gate.ensure_authorized().await.unwrap();
    gate.ensure_authorized().await.unwrap();
    gate.ensure_authorized().await.unwrap();

    assert_eq!(store.counters().authorization_requests, 1);
}

#[tokio::test]
async fn test_ensure_authorized_retries_after_denial() {
    let store = Arc::new(InMemoryHealthStore::new().with_consent(ConsentPolicy::DenyAll));
    let gate = gate_over(&store);

    let first = gate.ensure_authorized().await;
    let second = gate.ensure_authorized().await;

    assert_eq!(
        first,
        Err(HealthError::AuthorizationDenied(AuthorizationOutcome::Denied))
    );
    assert!(second.is_err());
    assert_eq!(store.counters().authorization_requests, 2);
}

#[tokio::test]
async fn test_scope_limits_what_the_store_grants() {
    let store = Arc::new(InMemoryHealthStore::new());
    let scope = AuthorizationScope::new([SampleType::BodyMass], [SampleType::StepCount]);
    let gate = AuthorizationGate::new(store.clone(), scope.clone());

    assert_eq!(gate.scope(), &scope);
    assert!(gate.request_authorization().await.is_granted());

    let range = DateRange::new(common::at(1, 0), common::at(2, 0)).unwrap();
    let steps = SampleQuery::new(SampleType::StepCount, SamplePredicate::strict(&range));
    let mass = SampleQuery::new(SampleType::BodyMass, SamplePredicate::strict(&range));

    assert!(store.execute_sample_query(&steps).await.is_ok());
    assert_eq!(
        store.execute_sample_query(&mass).await,
        Err(StoreError::NotAuthorized {
            sample_type: SampleType::BodyMass,
            access: Access::Read,
        })
    );
}
