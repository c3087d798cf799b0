// ABOUTME: Integration tests for raw sample queries
// ABOUTME: Verifies strict range boundaries, per-sample truncation, unit handling, and failure policies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use chrono::Duration;
use health_core::models::Access;
use health_sample::config::QueryFailurePolicy;
use health_sample::services::SampleReader;
use health_sample::{
    DateRange, ErrorCode, HealthError, InMemoryHealthStore, SampleType, Unit,
};

use common::{at, authorized_store, body_mass, steps};

fn reader(store: &Arc<InMemoryHealthStore>, policy: QueryFailurePolicy) -> SampleReader {
    SampleReader::new(store.clone(), policy)
}

#[tokio::test]
async fn test_only_fully_contained_samples_count() {
    let store = authorized_store(vec![
        steps(100.0, at(1, 10), 30),
        steps(20.0, at(1, 9) + Duration::minutes(45), 30),
        steps(30.0, at(1, 11) + Duration::minutes(45), 30),
        steps(40.0, at(1, 14), 10),
    ])
    .await;
    let range = DateRange::new(at(1, 10), at(1, 12)).unwrap();

    let summary = reader(&store, QueryFailurePolicy::Empty)
        .query_samples(SampleType::StepCount, Unit::Count, &range)
        .await
        .unwrap();

    assert_eq!(summary.samples.len(), 1);
    assert_eq!(summary.total, 100);
}

#[tokio::test]
async fn test_samples_touching_both_bounds_are_included() {
    let store = authorized_store(vec![steps(7.0, at(1, 10), 120)]).await;
    let range = DateRange::new(at(1, 10), at(1, 12)).unwrap();

    let summary = reader(&store, QueryFailurePolicy::Empty)
        .query_samples(SampleType::StepCount, Unit::Count, &range)
        .await
        .unwrap();

    assert_eq!(summary.total, 7);
}

#[tokio::test]
async fn test_total_truncates_each_sample_before_summing() {
    let store = authorized_store(vec![steps(1.6, at(1, 10), 5), steps(1.6, at(1, 11), 5)]).await;
    let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();

    let summary = reader(&store, QueryFailurePolicy::Empty)
        .query_samples(SampleType::StepCount, Unit::Count, &range)
        .await
        .unwrap();

    assert_eq!(summary.samples.len(), 2);
    assert_eq!(summary.total, 2);
}

#[tokio::test]
async fn test_empty_store_yields_zero_total() {
    let store = authorized_store(Vec::new()).await;
    let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();

    let summary = reader(&store, QueryFailurePolicy::Propagate)
        .query_samples(SampleType::StepCount, Unit::Count, &range)
        .await
        .unwrap();

    assert!(summary.is_empty());
    assert_eq!(summary.total, 0);
}

#[tokio::test]
async fn test_other_types_are_not_returned() {
    let store = authorized_store(vec![steps(10.0, at(1, 10), 5), body_mass(60.0, at(1, 11))]).await;
    let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();

    let summary = reader(&store, QueryFailurePolicy::Empty)
        .query_samples(SampleType::StepCount, Unit::Count, &range)
        .await
        .unwrap();

    assert_eq!(summary.samples.len(), 1);
    assert_eq!(summary.samples[0].sample_type(), SampleType::StepCount);
}

#[tokio::test]
async fn test_values_are_converted_to_the_requested_unit() {
    let store = authorized_store(vec![body_mass(60.5, at(1, 8)), body_mass(61.25, at(1, 20))]).await;
    let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();

    let summary = reader(&store, QueryFailurePolicy::Empty)
        .query_samples(SampleType::BodyMass, Unit::Gram, &range)
        .await
        .unwrap();

    assert_eq!(summary.total, 121_750);
}

#[tokio::test]
async fn test_incompatible_unit_rejected_before_store_contact() {
    let store = authorized_store(vec![steps(10.0, at(1, 10), 5)]).await;
    let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();

    let result = reader(&store, QueryFailurePolicy::Empty)
        .query_samples(SampleType::StepCount, Unit::Kilogram, &range)
        .await;

    assert_eq!(
        result.unwrap_err().code(),
        ErrorCode::IncompatibleUnit
    );
    assert_eq!(store.counters().sample_queries, 0);
}

#[test]
fn test_inverted_range_is_rejected() {
    let result = DateRange::new(at(2, 0), at(1, 0));

    assert_eq!(
        result,
        Err(HealthError::InvalidRange {
            start: at(2, 0),
            end: at(1, 0),
        })
    );
}

#[tokio::test]
async fn test_store_failure_returns_empty_by_default() {
    let store = authorized_store(vec![steps(10.0, at(1, 10), 5)]).await;
    store.set_query_failure(Some("database locked".into())).unwrap();
    let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();

    let summary = reader(&store, QueryFailurePolicy::default())
        .query_samples(SampleType::StepCount, Unit::Count, &range)
        .await
        .unwrap();

    assert!(summary.is_empty());
    assert_eq!(summary.total, 0);
}

#[tokio::test]
async fn test_store_failure_propagates_when_configured() {
    let store = authorized_store(vec![steps(10.0, at(1, 10), 5)]).await;
    store.set_query_failure(Some("database locked".into())).unwrap();
    let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();

    let err = reader(&store, QueryFailurePolicy::Propagate)
        .query_samples(SampleType::StepCount, Unit::Count, &range)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::QueryFailed);
    assert!(err.to_string().contains("database locked"));
}

#[tokio::test]
async fn test_missing_read_consent_propagates_as_not_authorized() {
    common::init_test_logging();
    let store = Arc::new(InMemoryHealthStore::new().with_samples(vec![steps(10.0, at(1, 10), 5)]));
    let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();

    let err = reader(&store, QueryFailurePolicy::Propagate)
        .query_samples(SampleType::StepCount, Unit::Count, &range)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        HealthError::NotAuthorized {
            sample_type: SampleType::StepCount,
            access: Access::Read,
        }
    );
}
