use serde::{Deserialize, Serialize};

use crate::{Date, SelectionError, SelectionState, Transition};

/// The closed set of inputs the selection state machine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// The grid reports a tap on an unselected date.
    Activate { date: Date, eligible: bool },
    /// The grid reports a tap on an already selected date.
    Deactivate { date: Date },
    /// The host imposes a selection directly.
    SetExternal {
        start: Option<Date>,
        end:   Option<Date>,
    },
}

impl SelectionEvent {
    /// Applies this event to `state`.
    ///
    /// # Errors
    /// Only `SetExternal` can fail, when its dates are out of order.
    pub fn apply(self, state: &SelectionState) -> Result<Transition, SelectionError> {
        match self {
            Self::Activate { date, eligible } => Ok(state.activate(date, eligible)),
            Self::Deactivate { date } => Ok(state.deactivate(date)),
            Self::SetExternal { start, end } => state.with_external_selection(start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Classification;
    use crate::test_utils::{confirmed, june, solo};
    use proptest::prelude::*;

    fn run(events: &[SelectionEvent]) -> SelectionState {
        events.iter().fold(SelectionState::Empty, |state, event| {
            event.apply(&state).map_or(state, |t| t.state)
        })
    }

    #[test]
    fn test_tap_scenarios() {
        let a = SelectionEvent::Activate {
            date:     june(10),
            eligible: true,
        };
        let b = SelectionEvent::Activate {
            date:     june(15),
            eligible: true,
        };
        let c = SelectionEvent::Activate {
            date:     june(5),
            eligible: true,
        };
        let d = SelectionEvent::Activate {
            date:     june(1),
            eligible: true,
        };

        assert_eq!(run(&[a]), solo(june(10)));
        assert_eq!(run(&[a, b]), confirmed(june(10), june(15)));
        assert_eq!(run(&[a, b, c]), solo(june(5)));
        assert_eq!(run(&[a, d]), solo(june(1)));
    }

    #[test]
    fn test_external_events() {
        let set = SelectionEvent::SetExternal {
            start: Some(june(10)),
            end:   Some(june(10)),
        };
        let state = run(&[set]);
        assert_eq!(state, solo(june(10)));
        assert_eq!(state.classify(june(10)), Classification::Solo);

        let inverted = SelectionEvent::SetExternal {
            start: Some(june(15)),
            end:   Some(june(10)),
        };
        assert!(inverted.apply(&state).is_err());
        assert_eq!(run(&[set, inverted]), solo(june(10)));
    }

    #[test]
    fn test_deactivate_event() {
        let state = confirmed(june(10), june(15));
        let t = SelectionEvent::Deactivate { date: june(10) }
            .apply(&state)
            .unwrap();
        assert_eq!(t.state, solo(june(10)));
    }

    #[test]
    fn test_event_serde() {
        let event = SelectionEvent::Activate {
            date:     june(10),
            eligible: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"activate","date":"2024-06-10","eligible":true}"#);
        assert_eq!(serde_json::from_str::<SelectionEvent>(&json).unwrap(), event);
    }

    fn any_date() -> impl Strategy<Value = Date> {
        (0i64..90).prop_map(|offset| {
            Date::from_unix_days(june(1).to_unix_days() + offset).expect("offset stays in calendar")
        })
    }

    fn any_event() -> impl Strategy<Value = SelectionEvent> {
        prop_oneof![
            4 => (any_date(), any::<bool>())
                .prop_map(|(date, eligible)| SelectionEvent::Activate { date, eligible }),
            1 => any_date().prop_map(|date| SelectionEvent::Deactivate { date }),
            1 => (proptest::option::of(any_date()), proptest::option::of(any_date()))
                .prop_map(|(start, end)| SelectionEvent::SetExternal { start, end }),
        ]
    }

    fn any_state() -> impl Strategy<Value = SelectionState> {
        proptest::collection::vec(any_event(), 0..24).prop_map(|events| run(&events))
    }

    proptest! {
        #[test]
        fn reachable_ranges_are_ordered(events in proptest::collection::vec(any_event(), 0..48)) {
            let mut state = SelectionState::Empty;
            for event in events {
                if let Ok(t) = event.apply(&state) {
                    state = t.state;
                }
                if state.is_range_confirmed() {
                    let (anchor, end) = (state.anchor(), state.end());
                    prop_assert!(anchor.is_some() && end.is_some());
                    prop_assert!(anchor <= end);
                } else {
                    prop_assert_eq!(state.end(), None);
                }
            }
        }

        #[test]
        fn ineligible_taps_never_change_state(state in any_state(), date in any_date()) {
            let t = state.activate(date, false);
            prop_assert_eq!(t.state, state);
            prop_assert!(t.affected.is_empty());
        }

        #[test]
        fn classification_depends_only_on_state(state in any_state(), date in any_date()) {
            let first = state.classify(date);
            prop_assert_eq!(first, state.classify(date));
            prop_assert_eq!(first.is_selected(), state.contains(date));
        }

        #[test]
        fn affected_dates_cover_every_changed_cell(
            state in any_state(),
            event in any_event(),
            date in any_date(),
        ) {
            if let Ok(t) = event.apply(&state) {
                if state.classify(date) != t.state.classify(date) {
                    prop_assert!(t.affected.contains(date));
                }
            }
        }
    }
}
