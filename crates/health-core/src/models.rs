// ABOUTME: Sample data model shared by health stores and query components
// ABOUTME: Sample types, units with dimension checks, quantities, samples, date ranges, daily buckets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Data Model
//!
//! Value objects created per call and discarded after use. Nothing here is
//! mutated after construction: `Sample` and `DateRange` validate their
//! invariants in their constructors and expose read-only accessors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::CalendarOffset;
use crate::errors::{HealthError, HealthResult};

/// Physical dimension a unit or sample type measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Dimensionless count (steps)
    Count,
    /// Mass (body mass)
    Mass,
}

/// How samples of a type combine over an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStyle {
    /// Values add up over time (steps walked)
    Cumulative,
    /// Values are point measurements (weight on a scale)
    Discrete,
}

/// Kind of access requested from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Reading samples and statistics
    Read,
    /// Writing (sharing) samples into the store
    Share,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Share => write!(f, "write"),
        }
    }
}

/// Identifier for a measured quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    /// Number of steps taken
    StepCount,
    /// Body mass (weight)
    BodyMass,
}

impl SampleType {
    /// Dimension of the values this type measures
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::StepCount => Dimension::Count,
            Self::BodyMass => Dimension::Mass,
        }
    }

    /// How values of this type combine over an interval
    #[must_use]
    pub const fn aggregation_style(self) -> AggregationStyle {
        match self {
            Self::StepCount => AggregationStyle::Cumulative,
            Self::BodyMass => AggregationStyle::Discrete,
        }
    }

    /// Unit used when none is given explicitly
    #[must_use]
    pub const fn default_unit(self) -> Unit {
        match self {
            Self::StepCount => Unit::Count,
            Self::BodyMass => Unit::Kilogram,
        }
    }

    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StepCount => "step_count",
            Self::BodyMass => "body_mass",
        }
    }

    /// Check that `unit` measures the same dimension as this type
    ///
    /// # Errors
    ///
    /// Returns `HealthError::IncompatibleUnit` when the dimensions differ
    pub fn ensure_compatible(self, unit: Unit) -> HealthResult<()> {
        if unit.dimension() == self.dimension() {
            Ok(())
        } else {
            Err(HealthError::IncompatibleUnit {
                sample_type: self,
                unit,
            })
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleType {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "step_count" | "steps" => Ok(Self::StepCount),
            "body_mass" | "weight" => Ok(Self::BodyMass),
            other => Err(HealthError::config(format!("unknown sample type '{other}'"))),
        }
    }
}

/// Unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Plain count
    Count,
    /// Kilogram
    Kilogram,
    /// Gram
    Gram,
    /// Avoirdupois pound
    Pound,
}

impl Unit {
    /// Dimension this unit measures
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Count => Dimension::Count,
            Self::Kilogram | Self::Gram | Self::Pound => Dimension::Mass,
        }
    }

    /// Factor converting one of this unit into the dimension's base unit (count or gram)
    const fn base_factor(self) -> f64 {
        match self {
            Self::Count | Self::Gram => 1.0,
            Self::Kilogram => 1000.0,
            Self::Pound => 453.592_37,
        }
    }

    /// Stable symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Pound => "lb",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "kg" | "kilogram" => Ok(Self::Kilogram),
            "g" | "gram" => Ok(Self::Gram),
            "lb" | "pound" => Ok(Self::Pound),
            other => Err(HealthError::config(format!("unknown unit '{other}'"))),
        }
    }
}

/// A value tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Magnitude
    pub value: f64,
    /// Unit the magnitude is expressed in
    pub unit: Unit,
}

impl Quantity {
    /// Create a quantity
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Express this quantity in another unit of the same dimension
    ///
    /// # Errors
    ///
    /// Returns `HealthError::IncompatibleUnit` when `unit` measures another dimension
    pub fn value_in(&self, sample_type: SampleType, unit: Unit) -> HealthResult<f64> {
        if self.unit.dimension() != unit.dimension() {
            return Err(HealthError::IncompatibleUnit { sample_type, unit });
        }
        if self.unit == unit {
            return Ok(self.value);
        }
        Ok(self.value * self.unit.base_factor() / unit.base_factor())
    }
}

/// A single timestamped quantity measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    uuid: Uuid,
    sample_type: SampleType,
    quantity: Quantity,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    source_device_name: Option<String>,
}

impl Sample {
    /// Create a sample with a fresh identity
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidRange` if `start > end` and
    /// `HealthError::IncompatibleUnit` if the quantity's unit does not fit the type
    pub fn new(
        sample_type: SampleType,
        quantity: Quantity,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HealthResult<Self> {
        if start > end {
            return Err(HealthError::InvalidRange { start, end });
        }
        sample_type.ensure_compatible(quantity.unit)?;
        Ok(Self {
            uuid: Uuid::new_v4(),
            sample_type,
            quantity,
            start,
            end,
            source_device_name: None,
        })
    }

    /// Attach the name of the device that produced the sample
    #[must_use]
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.source_device_name = Some(name.into());
        self
    }

    /// Store identity
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Measured type
    #[must_use]
    pub const fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Measured quantity in the unit it was recorded with
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Start of the measurement interval
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the measurement interval
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Name of the producing device, if known
    #[must_use]
    pub fn source_device_name(&self) -> Option<&str> {
        self.source_device_name.as_deref()
    }

    /// Value expressed in `unit`
    ///
    /// # Errors
    ///
    /// Returns `HealthError::IncompatibleUnit` when `unit` measures another dimension
    pub fn value_in(&self, unit: Unit) -> HealthResult<f64> {
        self.quantity.value_in(self.sample_type, unit)
    }
}

/// Interval between two timestamps with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidRange` if `start > end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> HealthResult<Self> {
        if start > end {
            return Err(HealthError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering `offset` before `end`, e.g. the last day before now
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if the start falls outside the calendar,
    /// or `HealthError::InvalidRange` if `offset` points forward in time
    pub fn preceding(end: DateTime<Utc>, offset: CalendarOffset) -> HealthResult<Self> {
        let start = offset.negated()?.add_to(end)?;
        Self::new(start, end)
    }

    /// Range start
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Range end
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether an interval lies entirely inside this range (boundaries included)
    #[must_use]
    pub fn contains_interval(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start >= self.start && end <= self.end
    }
}

/// Cumulative sum for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// UTC calendar date of the bucket start
    pub day: NaiveDate,
    /// Bucket interval start
    pub start: DateTime<Utc>,
    /// Bucket interval end (exclusive)
    pub end: DateTime<Utc>,
    /// Sum of the bucket's samples in the requested unit
    pub sum: f64,
}

/// Result of an authorization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum AuthorizationOutcome {
    /// The store accepted the request
    Granted,
    /// The user or the store declined
    Denied,
    /// Health data is not available on this device; the store was never contacted
    Unavailable,
    /// The store reported an error while resolving the request
    Errored(String),
}

impl AuthorizationOutcome {
    /// Collapse the outcome into the boolean grant status
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for AuthorizationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Errored(reason) => write!(f, "errored: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 3, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_pound_to_kilogram_conversion() {
        let q = Quantity::new(10.0, Unit::Pound);
        let kg = q.value_in(SampleType::BodyMass, Unit::Kilogram).unwrap();
        assert!((kg - 4.535_923_7).abs() < 1e-9);
    }

    #[test]
    fn test_same_unit_is_exact() {
        let q = Quantity::new(1.6, Unit::Count);
        assert_eq!(q.value_in(SampleType::StepCount, Unit::Count).unwrap(), 1.6);
    }

    #[test]
    fn test_cross_dimension_conversion_rejected() {
        let q = Quantity::new(70.0, Unit::Kilogram);
        let err = q.value_in(SampleType::BodyMass, Unit::Count).unwrap_err();
        assert!(matches!(err, HealthError::IncompatibleUnit { .. }));
    }

    #[test]
    fn test_sample_rejects_mismatched_unit() {
        let result = Sample::new(
            SampleType::StepCount,
            Quantity::new(100.0, Unit::Kilogram),
            at(1),
            at(2),
        );
        assert!(matches!(result, Err(HealthError::IncompatibleUnit { .. })));
    }

    #[test]
    fn test_sample_rejects_inverted_interval() {
        let result = Sample::new(
            SampleType::StepCount,
            Quantity::new(100.0, Unit::Count),
            at(2),
            at(1),
        );
        assert!(matches!(result, Err(HealthError::InvalidRange { .. })));
    }

    #[test]
    fn test_identical_samples_have_distinct_identity() {
        let q = Quantity::new(100.0, Unit::Count);
        let a = Sample::new(SampleType::StepCount, q, at(1), at(2)).unwrap();
        let b = Sample::new(SampleType::StepCount, q, at(1), at(2)).unwrap();
        assert_ne!(a.uuid(), b.uuid());
    }

    #[test]
    fn test_date_range_validation() {
        assert!(DateRange::new(at(1), at(1)).is_ok());
        assert!(matches!(
            DateRange::new(at(5), at(1)),
            Err(HealthError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_preceding_day_range() {
        let range = DateRange::preceding(at(12), CalendarOffset::days(1)).unwrap();
        assert_eq!(range.end() - range.start(), Duration::days(1));
    }

    #[test]
    fn test_preceding_unnegatable_offset_is_invalid_date() {
        let result = DateRange::preceding(at(12), CalendarOffset::days(i64::MIN));
        assert!(matches!(result, Err(HealthError::InvalidDate(_))));
        let result = DateRange::preceding(at(12), CalendarOffset::days(i64::MAX));
        assert!(matches!(result, Err(HealthError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_sample_type_and_unit() {
        assert_eq!("steps".parse::<SampleType>().unwrap(), SampleType::StepCount);
        assert_eq!("body-mass".parse::<SampleType>().unwrap(), SampleType::BodyMass);
        assert_eq!("KG".parse::<Unit>().unwrap(), Unit::Kilogram);
        assert!("furlong".parse::<Unit>().is_err());
    }

    #[test]
    fn test_outcome_collapses_to_bool() {
        assert!(AuthorizationOutcome::Granted.is_granted());
        assert!(!AuthorizationOutcome::Denied.is_granted());
        assert!(!AuthorizationOutcome::Errored("boom".into()).is_granted());
        assert!(!AuthorizationOutcome::Unavailable.is_granted());
    }
}
