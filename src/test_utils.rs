//! Builders shared by the unit tests.

use crate::{Date, DateRange, SelectionState};

pub fn date(year: u16, month: u8, day: u8) -> Date {
    Date::new(year, month, day).expect("test date must be valid")
}

/// A June 2024 date, the month most scenarios run in.
pub fn june(day: u8) -> Date {
    date(2024, 6, day)
}

pub fn range(start: Date, end: Date) -> DateRange {
    DateRange::new(start, end).expect("test range must be ordered")
}

pub fn solo(day: Date) -> SelectionState {
    SelectionState::Solo(day)
}

pub fn confirmed(start: Date, end: Date) -> SelectionState {
    SelectionState::Range(range(start, end))
}
