use serde::{Deserialize, Serialize};

use crate::Date;

/// Decides whether a date may be selected at all.
///
/// The state machine never evaluates this itself; callers compute the flag and
/// hand it to [`SelectionState::activate`](crate::SelectionState::activate).
pub trait Eligibility {
    fn is_selectable(&self, date: Date) -> bool;
}

impl<F> Eligibility for F
where
    F: Fn(Date) -> bool,
{
    fn is_selectable(&self, date: Date) -> bool {
        self(date)
    }
}

/// Only today and later dates are selectable.
///
/// "Today" is injected rather than read from the wall clock; use
/// [`Date::from_system_time`] to derive it from `SystemTime::now()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodayOrLater {
    today: Date,
}

impl TodayOrLater {
    pub const fn new(today: Date) -> Self {
        Self { today }
    }

    pub const fn today(&self) -> Date {
        self.today
    }
}

impl Eligibility for TodayOrLater {
    fn is_selectable(&self, date: Date) -> bool {
        date >= self.today
    }
}
