//! Selection state machine for picking a single date or an inclusive date range
//! from a scrolling calendar grid.
//!
//! The grid itself lives outside this crate. It forwards taps as activation and
//! deactivation events, and asks [`classify`] how each visible date should be
//! highlighted afterwards.

mod consts;
mod eligibility;
mod event;
mod highlight;
mod prelude;
mod range;
mod selection;
mod selector;
mod types;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use eligibility::{Eligibility, TodayOrLater};
pub use event::SelectionEvent;
pub use highlight::{CellAppearance, Highlight, HighlightLayers};
pub use range::{DateRange, Days, RangeError};
pub use selection::{
    AffectedDates, Classification, SelectionError, SelectionState, Transition, classify,
};
pub use selector::DateSelector;
pub use types::{Day, Month, Year};

use crate::consts::{DAYS_PER_ERA, GREGORIAN_CYCLE, SECONDS_PER_DAY, UNIX_EPOCH_DAY_OFFSET};
use crate::prelude::*;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single proleptic Gregorian calendar day.
///
/// Fields are ordered year, month, day so the derived ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct Date {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Day {_0} relative to the unix epoch is outside the supported calendar")]
    OutOfRange(i64),
}

impl std::error::Error for DateError {}

impl Date {
    /// Creates a date from raw components, validating each against the calendar.
    ///
    /// # Errors
    /// Returns the `DateError` variant naming the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// The following calendar day, or `None` after 9999-12-31.
    pub fn succ(self) -> Option<Self> {
        let Self { year, month, day } = self;
        if day.get() < month.days_in(year) {
            let day = Day::new(day.get() + 1, year, month).ok()?;
            return Some(Self { year, month, day });
        }
        if month.is_december() {
            let year = year.succ()?;
            let month = Month::new(JANUARY).ok()?;
            return Some(Self {
                year,
                month,
                day: Day::first(),
            });
        }
        let month = Month::new(month.get() + 1).ok()?;
        Some(Self {
            year,
            month,
            day: Day::first(),
        })
    }

    /// The preceding calendar day, or `None` before 0001-01-01.
    pub fn pred(self) -> Option<Self> {
        let Self { year, month, day } = self;
        if day.get() > MIN_DAY {
            let day = Day::new(day.get() - 1, year, month).ok()?;
            return Some(Self { year, month, day });
        }
        if month.is_january() {
            let year = year.pred()?;
            let month = Month::new(DECEMBER).ok()?;
            return Some(Self {
                year,
                month,
                day: Day::last(year, month),
            });
        }
        let month = Month::new(month.get() - 1).ok()?;
        Some(Self {
            year,
            month,
            day: Day::last(year, month),
        })
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub fn to_unix_days(self) -> i64 {
        let month = i64::from(self.month.get());
        let day = i64::from(self.day.get());
        let year = i64::from(self.year.get()) - i64::from(month <= i64::from(FEBRUARY));

        let era = year.div_euclid(i64::from(GREGORIAN_CYCLE));
        let year_of_era = year.rem_euclid(i64::from(GREGORIAN_CYCLE));
        let shifted_month = (month + 9) % 12;
        let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        era * DAYS_PER_ERA + day_of_era - UNIX_EPOCH_DAY_OFFSET
    }

    /// Converts days since 1970-01-01 back into a calendar date.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the day falls outside years 1..=9999.
    pub fn from_unix_days(days: i64) -> Result<Self, DateError> {
        let out_of_range = || DateError::OutOfRange(days);

        let shifted = days.checked_add(UNIX_EPOCH_DAY_OFFSET).ok_or_else(out_of_range)?;
        let era = shifted.div_euclid(DAYS_PER_ERA);
        let day_of_era = shifted.rem_euclid(DAYS_PER_ERA);
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
        let month = if shifted_month < 10 {
            shifted_month + 3
        } else {
            shifted_month - 9
        };
        let year = era * i64::from(GREGORIAN_CYCLE) + year_of_era + i64::from(month <= 2);

        let year = u16::try_from(year).map_err(|_| out_of_range())?;
        let month = u8::try_from(month).map_err(|_| out_of_range())?;
        let day = u8::try_from(day).map_err(|_| out_of_range())?;
        Self::new(year, month, day).map_err(|_| out_of_range())
    }

    /// The UTC calendar day containing `time`.
    ///
    /// Hosts use this to derive "today" once and inject it; nothing in the crate
    /// reads the wall clock on its own.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if `time` is outside years 1..=9999.
    pub fn from_system_time(time: SystemTime) -> Result<Self, DateError> {
        let days = match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs() / SECONDS_PER_DAY).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_secs().div_ceil(SECONDS_PER_DAY))
                .map_or(i64::MIN, |d| -d),
        };
        Self::from_unix_days(days)
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        let (year, month, day) = match (has_hyphen, has_slash) {
            (true, true) => {
                return Err(DateError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
                )));
            },
            // ISO format: YYYY-MM-DD
            (true, false) => {
                let [year, month, day] = Self::split_parts(trimmed, DATE_SEPARATOR)?;
                (year, month, day)
            },
            // Month-first format: MM/DD/YYYY
            (false, true) => {
                let [month, day, year] = Self::split_parts(trimmed, MONTH_FIRST_SEPARATOR)?;
                (year, month, day)
            },
            (false, false) => return Err(DateError::InvalidFormat(trimmed.to_owned())),
        };

        Self::new(Self::parse_u16(year)?, Self::parse_u8(month)?, Self::parse_u8(day)?)
    }
}

impl Date {
    /// Splits a date into exactly three trimmed components.
    fn split_parts(s: &str, separator: char) -> Result<[&str; 3], DateError> {
        let parts: Vec<&str> = s.split(separator).map(str::trim).collect();
        <[&str; 3]>::try_from(parts.as_slice()).map_err(|_| {
            DateError::InvalidFormat(format!(
                "Expected 2 {separator} separators, found {}",
                parts.len() - 1
            ))
        })
    }

    fn parse_u16(s: &str) -> Result<u16, DateError> {
        s.parse::<u16>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, DateError> {
        s.parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
