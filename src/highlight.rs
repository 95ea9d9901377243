//! Mapping from a date's [`Classification`] to what the grid draws in its cell.

use serde::{Deserialize, Serialize};

use crate::{Classification, Date, Eligibility, SelectionState, classify, prelude::*};

/// The five highlight shapes a calendar cell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    #[display(fmt = "none")]
    None,
    /// Rounded pill around a lone date.
    #[display(fmt = "full_pill")]
    FullPill,
    /// Pill plus a connector running toward later dates.
    #[display(fmt = "left_half")]
    LeftHalf,
    /// Flat bar spanning the whole cell.
    #[display(fmt = "middle_bar")]
    MiddleBar,
    /// Pill plus a connector running toward earlier dates.
    #[display(fmt = "right_half")]
    RightHalf,
}

/// Overlay layers a cell toggles to draw a [`Highlight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HighlightLayers {
    pub pill:                 bool,
    pub connector_to_earlier: bool,
    pub connector_to_later:   bool,
}

impl From<Classification> for Highlight {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::None => Self::None,
            Classification::Solo => Self::FullPill,
            Classification::RangeStart => Self::LeftHalf,
            Classification::RangeInterior => Self::MiddleBar,
            Classification::RangeEnd => Self::RightHalf,
        }
    }
}

impl Highlight {
    pub const fn layers(self) -> HighlightLayers {
        let (pill, connector_to_earlier, connector_to_later) = match self {
            Self::None => (false, false, false),
            Self::FullPill => (true, false, false),
            Self::LeftHalf => (true, false, true),
            Self::MiddleBar => (false, true, true),
            Self::RightHalf => (true, true, false),
        };
        HighlightLayers {
            pill,
            connector_to_earlier,
            connector_to_later,
        }
    }

    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Everything a grid needs to draw one date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAppearance {
    pub highlight: Highlight,
    /// Disabled cells are dimmed and ignore taps.
    pub enabled:   bool,
}

impl CellAppearance {
    /// Ineligible dates render disabled with no highlight, whatever the selection.
    pub fn for_date<E>(date: Date, state: &SelectionState, eligibility: &E) -> Self
    where
        E: Eligibility + ?Sized,
    {
        if !eligibility.is_selectable(date) {
            return Self {
                highlight: Highlight::None,
                enabled:   false,
            };
        }
        Self {
            highlight: classify(date, state).into(),
            enabled:   true,
        }
    }
}
