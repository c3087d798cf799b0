// ABOUTME: Locale-independent calendar arithmetic for UTC timestamps
// ABOUTME: Adds year/month/day/hour/minute/second offsets with month-end clamping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calendar offsets on the proleptic Gregorian calendar in UTC.
//!
//! Components are applied from largest to smallest: years and months first
//! (clamping to the last valid day of the target month), then the fixed-length
//! components.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{HealthError, HealthResult};

/// A signed calendar offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarOffset {
    /// Whole years
    pub years: i32,
    /// Whole months
    pub months: i32,
    /// Whole days
    pub days: i64,
    /// Whole hours
    pub hours: i64,
    /// Whole minutes
    pub minutes: i64,
    /// Whole seconds
    pub seconds: i64,
}

impl CalendarOffset {
    /// Offset of whole days
    #[must_use]
    pub const fn days(days: i64) -> Self {
        Self {
            years: 0,
            months: 0,
            days,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Offset of whole months
    #[must_use]
    pub const fn months(months: i32) -> Self {
        Self {
            years: 0,
            months,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Offset of whole years
    #[must_use]
    pub const fn years(years: i32) -> Self {
        Self {
            years,
            months: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Set the hour component
    #[must_use]
    pub const fn with_hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }

    /// Set the minute component
    #[must_use]
    pub const fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    /// Set the second component
    #[must_use]
    pub const fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    /// Same offset pointing the other way in time
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if a component is the minimum of its type
    pub fn negated(self) -> HealthResult<Self> {
        let negate = || {
            Some(Self {
                years: self.years.checked_neg()?,
                months: self.months.checked_neg()?,
                days: self.days.checked_neg()?,
                hours: self.hours.checked_neg()?,
                minutes: self.minutes.checked_neg()?,
                seconds: self.seconds.checked_neg()?,
            })
        };
        negate().ok_or_else(|| HealthError::InvalidDate(format!("{self:?} cannot be negated")))
    }

    /// Whether every component is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }

    /// Apply the offset to a timestamp
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if the result is not representable
    pub fn add_to(&self, timestamp: DateTime<Utc>) -> HealthResult<DateTime<Utc>> {
        let overflow = || HealthError::InvalidDate(format!("{timestamp} + {self:?} overflows"));

        let total_months = i64::from(self.years)
            .checked_mul(12)
            .and_then(|m| m.checked_add(i64::from(self.months)))
            .ok_or_else(overflow)?;
        let magnitude = u32::try_from(total_months.unsigned_abs()).map_err(|_| overflow())?;

        let shifted = if total_months >= 0 {
            timestamp.checked_add_months(Months::new(magnitude))
        } else {
            timestamp.checked_sub_months(Months::new(magnitude))
        }
        .ok_or_else(overflow)?;

        let fixed = Duration::try_days(self.days)
            .zip(Duration::try_hours(self.hours))
            .zip(Duration::try_minutes(self.minutes))
            .zip(Duration::try_seconds(self.seconds))
            .and_then(|(((d, h), m), s)| d.checked_add(&h)?.checked_add(&m)?.checked_add(&s))
            .ok_or_else(overflow)?;

        shifted.checked_add_signed(fixed).ok_or_else(overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_subtract_one_day() {
        let now = Utc.with_ymd_and_hms(2018, 3, 3, 9, 30, 0).unwrap();
        let earlier = CalendarOffset::days(-1).add_to(now).unwrap();
        assert_eq!(earlier, Utc.with_ymd_and_hms(2018, 3, 2, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_month_end_clamps() {
        let jan31 = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let feb = CalendarOffset::months(1).add_to(jan31).unwrap();
        assert_eq!(feb, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_mixed_components() {
        let start = Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap();
        let offset = CalendarOffset::years(1)
            .with_hours(2)
            .with_minutes(-30)
            .with_seconds(15);
        let shifted = offset.add_to(start).unwrap();
        assert_eq!(shifted, Utc.with_ymd_and_hms(2025, 1, 1, 0, 30, 15).unwrap());
    }

    #[test]
    fn test_negated_round_trip_for_fixed_components() {
        let start = Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap();
        let offset = CalendarOffset::days(10).with_hours(5);
        let there = offset.add_to(start).unwrap();
        assert_eq!(offset.negated().unwrap().add_to(there).unwrap(), start);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let result = CalendarOffset::years(i32::MAX).add_to(start);
        assert!(matches!(result, Err(HealthError::InvalidDate(_))));
    }

    #[test]
    fn test_negating_minimum_component_is_an_error() {
        let result = CalendarOffset::days(i64::MIN).negated();
        assert!(matches!(result, Err(HealthError::InvalidDate(_))));
        let result = CalendarOffset::months(i32::MIN).negated();
        assert!(matches!(result, Err(HealthError::InvalidDate(_))));
        assert_eq!(
            CalendarOffset::days(i64::MAX).negated().unwrap(),
            CalendarOffset::days(-i64::MAX)
        );
    }

    #[test]
    fn test_zero_offset() {
        assert!(CalendarOffset::default().is_zero());
        assert!(!CalendarOffset::days(1).is_zero());
    }
}
