use std::{iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Date, DateError, RANGE_SEPARATOR, prelude::*};

/// A closed range of calendar days, both ends included.
/// The start date is always less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: Date,
    end:   Date,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: Date, end: Date },

    /// Error parsing date component.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: Date, end: Date) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub const fn single(date: Date) -> Self {
        Self {
            start: date,
            end:   date,
        }
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (Date, Date) {
        (self.start, self.end)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when the ranges share at least one day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days in the range, counting both ends.
    pub fn len_days(&self) -> u64 {
        self.end.to_unix_days().abs_diff(self.start.to_unix_days()) + 1
    }

    /// The smallest range covering both `self` and `other`.
    pub fn cover(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end:   self.end.max(other.end),
        }
    }

    /// Iterates every day in the range in chronological order.
    pub const fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end:  self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = Date;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.days()
    }
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<Date>,
    end:  Date,
}

impl Iterator for Days {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let current = self.next?;
        self.next = if current < self.end { current.succ() } else { None };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next.map_or(0, |next| {
            let span = self.end.to_unix_days() - next.to_unix_days() + 1;
            usize::try_from(span).unwrap_or(0)
        });
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 extended format: use RANGE_SEPARATOR to separate start/end
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<Date>()?;
                let end = end_str.trim().parse::<Date>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
