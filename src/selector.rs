use tracing::debug;

use crate::{
    AffectedDates, CellAppearance, Classification, Date, Eligibility, SelectionError,
    SelectionEvent, SelectionState, Transition,
};

/// Owns a [`SelectionState`] together with the eligibility rule, which is all a
/// calendar screen needs to wire taps to highlights.
///
/// The selector is the only thing that replaces its state; the grid reads
/// snapshots through [`state`](Self::state) and never mutates them.
#[derive(Debug, Clone)]
pub struct DateSelector<E> {
    state:       SelectionState,
    eligibility: E,
}

impl<E: Eligibility> DateSelector<E> {
    /// Starts with an empty selection.
    pub fn new(eligibility: E) -> Self {
        Self {
            state: SelectionState::Empty,
            eligibility,
        }
    }

    /// Starts from a previously captured selection.
    pub const fn with_state(eligibility: E, state: SelectionState) -> Self {
        Self { state, eligibility }
    }

    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    pub const fn eligibility(&self) -> &E {
        &self.eligibility
    }

    pub fn is_selectable(&self, date: Date) -> bool {
        self.eligibility.is_selectable(date)
    }

    /// Handles a tap on an unselected date, checking eligibility first.
    pub fn select(&mut self, date: Date) -> AffectedDates {
        let eligible = self.eligibility.is_selectable(date);
        self.commit(self.state.activate(date, eligible))
    }

    /// Handles a tap on an already selected date.
    pub fn deselect(&mut self, date: Date) -> AffectedDates {
        self.commit(self.state.deactivate(date))
    }

    /// Imposes a selection without going through taps.
    ///
    /// # Errors
    /// Returns `SelectionError::InvalidRange` if `start > end`; the current
    /// selection is kept.
    pub fn set_selection(
        &mut self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<AffectedDates, SelectionError> {
        let transition = self.state.with_external_selection(start, end)?;
        Ok(self.commit(transition))
    }

    /// Applies a raw event. `Activate` events keep the eligibility they carry.
    ///
    /// # Errors
    /// Propagates `SelectionError` from `SetExternal` events.
    pub fn apply(&mut self, event: SelectionEvent) -> Result<AffectedDates, SelectionError> {
        let transition = event.apply(&self.state)?;
        Ok(self.commit(transition))
    }

    pub fn classify(&self, date: Date) -> Classification {
        self.state.classify(date)
    }

    pub fn appearance(&self, date: Date) -> CellAppearance {
        CellAppearance::for_date(date, &self.state, &self.eligibility)
    }

    /// First and last selected dates, as handed back when the user confirms.
    pub fn confirmed_dates(&self) -> Option<(Date, Date)> {
        self.state.bounds()
    }

    /// Drops the selection entirely.
    pub fn clear(&mut self) -> AffectedDates {
        let previous = std::mem::take(&mut self.state);
        debug!(%previous, "selection cleared");
        AffectedDates::between(&previous, &self.state)
    }

    fn commit(&mut self, transition: Transition) -> AffectedDates {
        let Transition { state, affected } = transition;
        self.state = state;
        affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{confirmed, date, june, solo};
    use crate::{Highlight, TodayOrLater};

    fn selector() -> DateSelector<TodayOrLater> {
        DateSelector::new(TodayOrLater::new(june(3)))
    }

    #[test]
    fn test_tap_sequence() {
        let mut picker = selector();

        let affected = picker.select(june(10));
        assert_eq!(picker.state(), &solo(june(10)));
        assert!(affected.contains(june(10)));

        picker.select(june(15));
        assert_eq!(picker.state(), &confirmed(june(10), june(15)));
        assert_eq!(picker.confirmed_dates(), Some((june(10), june(15))));
        assert_eq!(picker.classify(june(12)), Classification::RangeInterior);
        assert_eq!(picker.appearance(june(15)).highlight, Highlight::RightHalf);

        picker.select(june(5));
        assert_eq!(picker.state(), &solo(june(5)));
        assert_eq!(picker.confirmed_dates(), Some((june(5), june(5))));
    }

    #[test]
    fn test_past_dates_are_ignored() {
        let mut picker = selector();
        picker.select(june(10));

        let affected = picker.select(june(2));
        assert!(affected.is_empty());
        assert_eq!(picker.state(), &solo(june(10)));
        assert!(!picker.is_selectable(june(2)));
        assert!(picker.is_selectable(june(3)));
        assert!(!picker.appearance(june(2)).enabled);
    }

    #[test]
    fn test_deselect_reselects() {
        let mut picker = selector();
        picker.select(june(10));
        picker.select(june(15));

        picker.deselect(june(10));
        assert_eq!(picker.state(), &solo(june(10)));
    }

    #[test]
    fn test_set_selection() {
        let mut picker = selector();
        let affected = picker
            .set_selection(Some(june(10)), Some(date(2024, 7, 2)))
            .unwrap();
        assert_eq!(affected.len(), 23);
        assert!(picker.state().is_range_confirmed());

        let err = picker.set_selection(Some(june(20)), Some(june(11)));
        assert!(err.is_err());
        assert_eq!(picker.state(), &confirmed(june(10), date(2024, 7, 2)));
    }

    #[test]
    fn test_apply_event_keeps_carried_eligibility() {
        let mut picker = selector();
        picker
            .apply(SelectionEvent::Activate {
                date:     june(1),
                eligible: true,
            })
            .unwrap();
        assert_eq!(picker.state(), &solo(june(1)));
    }

    #[test]
    fn test_apply_deactivate_event() {
        let mut picker = DateSelector::with_state(TodayOrLater::new(june(3)), confirmed(june(10), june(15)));
        let affected = picker
            .apply(SelectionEvent::Deactivate { date: june(12) })
            .unwrap();
        assert_eq!(picker.state(), &solo(june(12)));
        assert_eq!(affected.len(), 6);
        assert!(affected.contains(june(15)));
    }

    #[test]
    fn test_apply_external_events() {
        let mut picker = selector();
        picker.select(june(4));

        let affected = picker
            .apply(SelectionEvent::SetExternal {
                start: Some(june(10)),
                end:   Some(june(15)),
            })
            .unwrap();
        assert_eq!(picker.state(), &confirmed(june(10), june(15)));
        assert!(affected.contains(june(4)));
        assert!(affected.contains(june(12)));
        assert!(!affected.contains(june(7)));

        let err = picker.apply(SelectionEvent::SetExternal {
            start: Some(june(20)),
            end:   Some(june(11)),
        });
        assert_eq!(
            err,
            Err(SelectionError::InvalidRange {
                start: june(20),
                end:   june(11),
            })
        );
        assert_eq!(picker.state(), &confirmed(june(10), june(15)));

        picker
            .apply(SelectionEvent::SetExternal { start: None, end: None })
            .unwrap();
        assert!(picker.state().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut picker = DateSelector::with_state(TodayOrLater::new(june(3)), confirmed(june(10), june(12)));
        let affected = picker.clear();
        assert_eq!(affected.len(), 3);
        assert!(picker.state().is_empty());
        assert_eq!(picker.confirmed_dates(), None);
    }

    #[test]
    fn test_closure_eligibility() {
        let mut picker = DateSelector::new(|d: Date| d.day().get() != 13);
        picker.select(june(13));
        assert!(picker.state().is_empty());
        picker.select(june(14));
        assert_eq!(picker.state(), &solo(june(14)));
        assert!(picker.eligibility().is_selectable(june(1)));
    }
}
