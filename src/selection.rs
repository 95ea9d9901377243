//! The date-range selection state machine.
//!
//! [`SelectionState`] is an immutable snapshot. Every accepted input produces a
//! [`Transition`] holding the replacement snapshot and the dates whose
//! [`Classification`] may have changed, so a host never observes a partially
//! applied update.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{Date, DateRange, prelude::*};

/// The current selection: nothing, a single anchor date, or a confirmed range.
///
/// A confirmed range always has `anchor <= end`, which [`DateRange`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(tag = "kind", content = "selection", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    #[display(fmt = "empty")]
    Empty,
    /// A single anchor date waiting for a second tap.
    #[display(fmt = "{_0}")]
    Solo(Date),
    /// A locked-in range; the next tap starts over.
    #[display(fmt = "{_0}")]
    Range(DateRange),
}

/// The role a date plays in a selection. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    #[display(fmt = "none")]
    None,
    #[display(fmt = "solo")]
    Solo,
    #[display(fmt = "range_start")]
    RangeStart,
    #[display(fmt = "range_end")]
    RangeEnd,
    #[display(fmt = "range_interior")]
    RangeInterior,
}

impl Classification {
    pub const fn is_selected(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Rejected external selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Invalid selection: start ({start}) is after end ({end})")]
    InvalidRange { start: Date, end: Date },
}

/// Dates whose classification may differ between two snapshots.
///
/// Held as the spans of the previous and the next selection rather than as
/// expanded days, so a long range costs the same as a single date. Hosts test
/// visible cells with [`contains`](Self::contains).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AffectedDates {
    previous: Option<DateRange>,
    next:     Option<DateRange>,
}

impl AffectedDates {
    /// Every date covered by either snapshot, so range fills repaint on both sides.
    pub(crate) const fn between(previous: &SelectionState, next: &SelectionState) -> Self {
        Self {
            previous: previous.span(),
            next:     next.span(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.spans().any(|span| span.contains(date))
    }

    /// Disjoint spans in chronological order; overlapping spans are merged.
    pub fn spans(&self) -> impl Iterator<Item = DateRange> + use<> {
        let merged = match (self.previous, self.next) {
            (Some(a), Some(b)) => {
                let (early, late) = if a.start() <= b.start() { (a, b) } else { (b, a) };
                if early.overlaps(&late) {
                    [Some(early.cover(&late)), None]
                } else {
                    [Some(early), Some(late)]
                }
            },
            (a, b) => [a.or(b), None],
        };
        merged.into_iter().flatten()
    }

    /// Every affected day, chronological and without repeats.
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        self.spans().flatten()
    }

    /// Number of affected days.
    pub fn len(&self) -> u64 {
        self.spans().map(|span| span.len_days()).sum()
    }
}

/// Result of applying one input to a [`SelectionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Transition {
    pub state:    SelectionState,
    pub affected: AffectedDates,
}

impl Transition {
    fn unchanged(state: SelectionState) -> Self {
        Self {
            state,
            affected: AffectedDates::default(),
        }
    }

    fn replace(previous: &SelectionState, state: SelectionState) -> Self {
        Self {
            affected: AffectedDates::between(previous, &state),
            state,
        }
    }
}

impl SelectionState {
    /// First date of the selection, or the single selected date.
    pub const fn anchor(&self) -> Option<Date> {
        match self {
            Self::Empty => None,
            Self::Solo(date) => Some(*date),
            Self::Range(range) => Some(range.start()),
        }
    }

    /// Second date of a confirmed range.
    pub const fn end(&self) -> Option<Date> {
        match self {
            Self::Range(range) => Some(range.end()),
            Self::Empty | Self::Solo(_) => None,
        }
    }

    pub const fn is_range_confirmed(&self) -> bool {
        matches!(self, Self::Range(_))
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Every selected day as a range; a solo date is a one-day range.
    pub const fn span(&self) -> Option<DateRange> {
        match self {
            Self::Empty => None,
            Self::Solo(date) => Some(DateRange::single(*date)),
            Self::Range(range) => Some(*range),
        }
    }

    /// First and last selected day. A solo date yields `(date, date)`.
    pub fn bounds(&self) -> Option<(Date, Date)> {
        self.span().map(|span| span.dates())
    }

    /// Every selected day in chronological order.
    pub fn selected_dates(&self) -> impl Iterator<Item = Date> + use<> {
        self.span().into_iter().flatten()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.span().is_some_and(|span| span.contains(date))
    }

    pub fn classify(&self, date: Date) -> Classification {
        classify(date, self)
    }

    /// Applies a tap on `date`.
    ///
    /// Ineligible dates are ignored outright. A confirmed range, or a date earlier
    /// than a pending anchor, restarts the selection at `date`. Otherwise `date`
    /// becomes the anchor or closes the range.
    pub fn activate(&self, date: Date, eligible: bool) -> Transition {
        if !eligible {
            trace!(%date, "ignoring ineligible date");
            return Transition::unchanged(*self);
        }

        let next = match *self {
            Self::Range(_) => {
                debug!(%date, previous = %self, "restarting selection after confirmed range");
                Self::Solo(date)
            },
            Self::Empty => {
                debug!(%date, "anchoring selection");
                Self::Solo(date)
            },
            Self::Solo(anchor) => match DateRange::new(anchor, date) {
                Ok(range) => {
                    debug!(%range, "confirming range");
                    Self::Range(range)
                },
                Err(_) => {
                    debug!(%date, %anchor, "date precedes anchor, restarting selection");
                    Self::Solo(date)
                },
            },
        };

        Transition::replace(self, next)
    }

    /// Applies an untap on `date`.
    ///
    /// The prior selection is cleared and `date` is immediately selected again as
    /// a solo date, so toggling a selected date off never leaves the grid empty.
    pub fn deactivate(&self, date: Date) -> Transition {
        debug!(%date, previous = %self, "deselect resets selection to the tapped date");
        Transition::replace(self, Self::Solo(date))
    }

    /// Replaces the selection programmatically, e.g. to restore an earlier choice.
    ///
    /// A lone `end` is treated as the single date. Neither date clears the
    /// selection. Equal dates produce a solo selection.
    ///
    /// # Errors
    /// Returns `SelectionError::InvalidRange` if `start > end`; the caller keeps
    /// its current state.
    pub fn with_external_selection(
        &self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Transition, SelectionError> {
        let next = match (start, end) {
            (None, None) => Self::Empty,
            (Some(date), None) | (None, Some(date)) => Self::Solo(date),
            (Some(start), Some(end)) if start == end => Self::Solo(start),
            (Some(start), Some(end)) => {
                let range = DateRange::new(start, end).map_err(|_| {
                    warn!(%start, %end, "rejecting inverted external selection");
                    SelectionError::InvalidRange { start, end }
                })?;
                Self::Range(range)
            },
        };

        debug!(state = %next, "external selection applied");
        Ok(Transition::replace(self, next))
    }
}

/// The role `date` plays in `state`.
pub fn classify(date: Date, state: &SelectionState) -> Classification {
    match *state {
        SelectionState::Empty => Classification::None,
        SelectionState::Solo(anchor) if anchor == date => Classification::Solo,
        SelectionState::Solo(_) => Classification::None,
        SelectionState::Range(range) => {
            let (start, end) = range.dates();
            if !range.contains(date) {
                Classification::None
            } else if start == end {
                Classification::Solo
            } else if date == start {
                Classification::RangeStart
            } else if date == end {
                Classification::RangeEnd
            } else {
                Classification::RangeInterior
            }
        },
    }
}
