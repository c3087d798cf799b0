// ABOUTME: Sample and statistics query types with date predicates and interval bucketing
// ABOUTME: Statistics collections partition time from an anchor and enumerate intervals forward
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Query Types
//!
//! Requests understood by every [`HealthStore`](crate::HealthStore):
//!
//! - [`SamplePredicate`] selects samples by their interval, with optional
//!   strict start/end boundaries
//! - [`SampleQuery`] fetches raw samples
//! - [`StatisticsQuery`] asks for per-interval aggregates anchored at a date
//!
//! [`StatisticsCollection::compute`] is the reference bucketing used by the
//! in-memory store; other stores may compute collections natively.

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use health_core::models::AggregationStyle;
use health_core::{CalendarOffset, DateRange, Quantity, Sample, SampleType};
use serde::{Deserialize, Serialize};

use crate::errors::{StoreError, StoreResult};

bitflags! {
    /// Boundary handling for a [`SamplePredicate`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PredicateOptions: u8 {
        /// Sample must start at or after the predicate start
        const STRICT_START_DATE = 0b0000_0001;
        /// Sample must end at or before the predicate end
        const STRICT_END_DATE = 0b0000_0010;
    }
}

/// Selects samples by interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePredicate {
    /// Window start
    pub start: DateTime<Utc>,
    /// Window end
    pub end: DateTime<Utc>,
    /// Boundary handling
    pub options: PredicateOptions,
}

impl SamplePredicate {
    /// Predicate counting only samples that lie entirely inside `range`
    #[must_use]
    pub const fn strict(range: &DateRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
            options: PredicateOptions::STRICT_START_DATE.union(PredicateOptions::STRICT_END_DATE),
        }
    }

    /// Predicate counting any sample overlapping `range`
    #[must_use]
    pub const fn overlapping(range: &DateRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
            options: PredicateOptions::empty(),
        }
    }

    /// Whether a sample satisfies the predicate
    #[must_use]
    pub fn matches(&self, sample: &Sample) -> bool {
        let after_start = if self.options.contains(PredicateOptions::STRICT_START_DATE) {
            sample.start() >= self.start
        } else {
            sample.end() > self.start
        };
        let before_end = if self.options.contains(PredicateOptions::STRICT_END_DATE) {
            sample.end() <= self.end
        } else {
            sample.start() < self.end
        };
        after_start && before_end
    }
}

/// Raw sample fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleQuery {
    /// Type to fetch
    pub sample_type: SampleType,
    /// Interval filter
    pub predicate: SamplePredicate,
    /// Maximum number of samples, `0` for no limit
    pub limit: usize,
}

impl SampleQuery {
    /// Unlimited query for one type
    #[must_use]
    pub const fn new(sample_type: SampleType, predicate: SamplePredicate) -> Self {
        Self {
            sample_type,
            predicate,
            limit: 0,
        }
    }

    /// Cap the number of returned samples
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Aggregate computed per interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsOptions {
    /// Sum of all matching sample values in the interval
    CumulativeSum,
}

/// Per-interval statistics request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsQuery {
    /// Quantity type to aggregate
    pub sample_type: SampleType,
    /// Interval filter applied to samples before bucketing
    pub predicate: SamplePredicate,
    /// Aggregate to compute
    pub options: StatisticsOptions,
    /// Reference timestamp intervals are measured from
    pub anchor: DateTime<Utc>,
    /// Interval length
    pub interval: CalendarOffset,
}

impl StatisticsQuery {
    /// Cumulative sum per `interval`, anchored at `anchor`
    #[must_use]
    pub const fn cumulative_sum(
        sample_type: SampleType,
        predicate: SamplePredicate,
        anchor: DateTime<Utc>,
        interval: CalendarOffset,
    ) -> Self {
        Self {
            sample_type,
            predicate,
            options: StatisticsOptions::CumulativeSum,
            anchor,
            interval,
        }
    }
}

/// Aggregate for one interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Interval start (inclusive)
    pub start: DateTime<Utc>,
    /// Interval end (exclusive)
    pub end: DateTime<Utc>,
    /// Sum of the interval's samples, `None` when no sample fell in it
    pub sum: Option<Quantity>,
}

/// Ordered, gap-free sequence of interval statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsCollection {
    sample_type: SampleType,
    intervals: Vec<Statistics>,
}

impl StatisticsCollection {
    /// Build a collection from already computed intervals
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` unless intervals are contiguous and ascending
    pub fn from_intervals(
        sample_type: SampleType,
        intervals: Vec<Statistics>,
    ) -> StoreResult<Self> {
        let ordered = intervals
            .windows(2)
            .all(|pair| pair[0].start < pair[0].end && pair[0].end == pair[1].start);
        if !ordered {
            return Err(StoreError::internal(
                "statistics intervals must be contiguous and ascending",
            ));
        }
        Ok(Self {
            sample_type,
            intervals,
        })
    }

    /// Bucket `samples` for `query`
    ///
    /// Intervals cover the predicate window starting from the anchor; each
    /// matching sample contributes to the interval containing its start.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnsupportedStatistics` for discrete types,
    /// `StoreError::InvalidInterval` if the interval does not advance time, and
    /// `StoreError::Internal` if interval arithmetic overflows
    pub fn compute(query: &StatisticsQuery, samples: &[Sample]) -> StoreResult<Self> {
        if query.sample_type.aggregation_style() != AggregationStyle::Cumulative {
            return Err(StoreError::UnsupportedStatistics {
                sample_type: query.sample_type,
            });
        }

        if query.interval.is_zero() {
            return Err(StoreError::InvalidInterval);
        }

        let window = query.predicate;
        if window.start > window.end {
            return Self::from_intervals(query.sample_type, Vec::new());
        }

        let step = |at: DateTime<Utc>, offset: CalendarOffset| {
            offset
                .add_to(at)
                .map_err(|e| StoreError::internal(e.to_string()))
        };

        if step(query.anchor, query.interval)? <= query.anchor {
            return Err(StoreError::InvalidInterval);
        }

        // Walk back to the first interval boundary at or before the window start
        let backward = query
            .interval
            .negated()
            .map_err(|_| StoreError::InvalidInterval)?;
        let mut boundary = query.anchor;
        while boundary > window.start {
            boundary = step(boundary, backward)?;
        }

        let mut intervals = Vec::new();
        while boundary <= window.end {
            let next = step(boundary, query.interval)?;
            if next > window.start {
                intervals.push(Statistics {
                    start: boundary,
                    end: next,
                    sum: None,
                });
            }
            boundary = next;
        }

        let unit = query.sample_type.default_unit();
        for sample in samples.iter().filter(|s| {
            s.sample_type() == query.sample_type && window.matches(s)
        }) {
            let index = intervals.partition_point(|i| i.start <= sample.start());
            let Some(interval) = index.checked_sub(1).and_then(|i| intervals.get_mut(i)) else {
                continue;
            };
            if sample.start() >= interval.end {
                continue;
            }
            let value = sample.value_in(unit).map_err(|_| StoreError::IncompatibleUnit {
                sample_type: query.sample_type,
                unit: sample.quantity().unit,
            })?;
            let total = interval.sum.map_or(0.0, |q| q.value) + value;
            interval.sum = Some(Quantity::new(total, unit));
        }

        Self::from_intervals(query.sample_type, intervals)
    }

    /// Aggregated type
    #[must_use]
    pub const fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// All intervals, ascending
    #[must_use]
    pub fn statistics(&self) -> &[Statistics] {
        &self.intervals
    }

    /// Walk forward over the intervals intersecting `[from, to]`
    pub fn enumerate(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Iterator<Item = &Statistics> + '_ {
        self.intervals
            .iter()
            .skip_while(move |i| i.end <= from)
            .take_while(move |i| i.start <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use health_core::Unit;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn steps(value: f64, start: DateTime<Utc>, minutes: i64) -> Sample {
        Sample::new(
            SampleType::StepCount,
            Quantity::new(value, Unit::Count),
            start,
            start + Duration::minutes(minutes),
        )
        .unwrap()
    }

    #[test]
    fn test_strict_predicate_excludes_partial_overlap() {
        let range = DateRange::new(at(1, 10), at(1, 12)).unwrap();
        let strict = SamplePredicate::strict(&range);
        let loose = SamplePredicate::overlapping(&range);

        let inside = steps(10.0, at(1, 10), 30);
        let straddles_start = steps(10.0, at(1, 9) + Duration::minutes(45), 30);
        let straddles_end = steps(10.0, at(1, 11) + Duration::minutes(45), 30);
        let outside = steps(10.0, at(1, 13), 30);

        assert!(strict.matches(&inside));
        assert!(!strict.matches(&straddles_start));
        assert!(!strict.matches(&straddles_end));
        assert!(loose.matches(&straddles_start));
        assert!(loose.matches(&straddles_end));
        assert!(!loose.matches(&outside));
    }

    #[test]
    fn test_compute_buckets_by_sample_start() {
        let range = DateRange::new(at(1, 6), at(3, 6)).unwrap();
        let query = StatisticsQuery::cumulative_sum(
            SampleType::StepCount,
            SamplePredicate::strict(&range),
            range.start(),
            CalendarOffset::days(1),
        );
        let samples = vec![
            steps(100.0, at(1, 8), 10),
            steps(50.0, at(1, 20), 10),
            steps(70.0, at(2, 7), 10),
        ];

        let collection = StatisticsCollection::compute(&query, &samples).unwrap();
        let intervals = collection.statistics();

        assert_eq!(intervals.len(), 3);
        assert_eq!(intervals[0].start, at(1, 6));
        assert_eq!(intervals[0].sum.map(|q| q.value), Some(150.0));
        assert_eq!(intervals[1].sum.map(|q| q.value), Some(70.0));
        assert_eq!(intervals[2].sum, None);
    }

    #[test]
    fn test_enumerate_walks_forward_within_bounds() {
        let range = DateRange::new(at(1, 0), at(5, 0)).unwrap();
        let query = StatisticsQuery::cumulative_sum(
            SampleType::StepCount,
            SamplePredicate::strict(&range),
            range.start(),
            CalendarOffset::days(1),
        );
        let collection = StatisticsCollection::compute(&query, &[]).unwrap();

        let starts: Vec<_> = collection
            .enumerate(at(2, 12), at(3, 12))
            .map(|s| s.start)
            .collect();
        assert_eq!(starts, vec![at(2, 0), at(3, 0)]);
    }

    #[test]
    fn test_discrete_type_rejected() {
        let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();
        let query = StatisticsQuery::cumulative_sum(
            SampleType::BodyMass,
            SamplePredicate::strict(&range),
            range.start(),
            CalendarOffset::days(1),
        );
        assert_eq!(
            StatisticsCollection::compute(&query, &[]),
            Err(StoreError::UnsupportedStatistics {
                sample_type: SampleType::BodyMass
            })
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let range = DateRange::new(at(1, 0), at(2, 0)).unwrap();
        let query = StatisticsQuery::cumulative_sum(
            SampleType::StepCount,
            SamplePredicate::strict(&range),
            range.start(),
            CalendarOffset::default(),
        );
        assert_eq!(
            StatisticsCollection::compute(&query, &[]),
            Err(StoreError::InvalidInterval)
        );
    }

    #[test]
    fn test_zero_interval_rejected_for_empty_window() {
        let predicate = SamplePredicate {
            start: at(2, 0),
            end: at(1, 0),
            options: PredicateOptions::empty(),
        };
        let query = StatisticsQuery::cumulative_sum(
            SampleType::StepCount,
            predicate,
            at(1, 0),
            CalendarOffset::default(),
        );
        assert_eq!(
            StatisticsCollection::compute(&query, &[]),
            Err(StoreError::InvalidInterval)
        );

        let query = StatisticsQuery::cumulative_sum(
            SampleType::StepCount,
            predicate,
            at(1, 0),
            CalendarOffset::days(1),
        );
        let collection = StatisticsCollection::compute(&query, &[]).unwrap();
        assert!(collection.statistics().is_empty());
    }

    #[test]
    fn test_from_intervals_rejects_gaps() {
        let gap = vec![
            Statistics {
                start: at(1, 0),
                end: at(2, 0),
                sum: None,
            },
            Statistics {
                start: at(3, 0),
                end: at(4, 0),
                sum: None,
            },
        ];
        assert!(StatisticsCollection::from_intervals(SampleType::StepCount, gap).is_err());
    }
}
