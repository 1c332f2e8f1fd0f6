//! Property tests for paging a calendar through its year range

use datekeys::{CalendarOptions, CalendarState, MAX_YEAR, MIN_YEAR, YearRange};
use proptest::prelude::*;
use time::macros::date;
use time::Month;

fn state(year: i32, month: u8, min: i32, max: i32) -> CalendarState {
    CalendarState::new(
        CalendarOptions::new()
            .initial_year(year)
            .initial_month(month)
            .year_range(YearRange::new(min, max)),
        date!(2025 - 01 - 22),
    )
    .unwrap()
}

/// A year range plus a year inside it
fn range_and_year() -> impl Strategy<Value = (i32, i32, i32)> {
    (MIN_YEAR..=MAX_YEAR, 0i32..50)
        .prop_flat_map(|(min, span)| {
            let max = min.saturating_add(span).min(MAX_YEAR);
            (Just(min), Just(max), min..=max)
        })
}

proptest! {
    #[test]
    fn forward_then_backward_is_identity((min, max, year) in range_and_year(), month in 1u8..=12) {
        let mut st = state(year, month, min, max);
        prop_assume!(st.can_page_forward());
        let before = st;
        prop_assert!(st.page_forward());
        prop_assert!(st.page_backward());
        prop_assert_eq!(st, before);
    }

    #[test]
    fn backward_then_forward_is_identity((min, max, year) in range_and_year(), month in 1u8..=12) {
        let mut st = state(year, month, min, max);
        prop_assume!(st.can_page_backward());
        let before = st;
        prop_assert!(st.page_backward());
        prop_assert!(st.page_forward());
        prop_assert_eq!(st, before);
    }

    #[test]
    fn paging_never_leaves_range((min, max, year) in range_and_year(), month in 1u8..=12, steps in proptest::collection::vec(any::<bool>(), 0..60)) {
        let mut st = state(year, month, min, max);
        for forward in steps {
            let allowed = if forward { st.can_page_forward() } else { st.can_page_backward() };
            let moved = if forward { st.page_forward() } else { st.page_backward() };
            prop_assert_eq!(moved, allowed);
            prop_assert!((min..=max).contains(&st.year()));
        }
    }

    #[test]
    fn first_month_is_a_fixed_point((min, max, _year) in range_and_year(), repeats in 1usize..5) {
        let mut st = state(min, 1, min, max);
        prop_assert!(!st.can_page_backward());
        for _ in 0..repeats {
            prop_assert!(!st.page_backward());
        }
        prop_assert_eq!((st.year(), st.month()), (min, Month::January));
    }

    #[test]
    fn last_month_is_a_fixed_point((min, max, _year) in range_and_year(), repeats in 1usize..5) {
        let mut st = state(max, 12, min, max);
        prop_assert!(!st.can_page_forward());
        for _ in 0..repeats {
            prop_assert!(!st.page_forward());
        }
        prop_assert_eq!((st.year(), st.month()), (max, Month::December));
    }

    #[test]
    fn jump_to_month_keeps_year((min, max, year) in range_and_year(), month in 1u8..=12, target in 0u8..=20) {
        let mut st = state(year, month, min, max);
        let r = st.jump_to_month(target);
        prop_assert_eq!(r.is_ok(), (1..=12).contains(&target));
        prop_assert_eq!(st.year(), year);
        let expected = if r.is_ok() { target } else { month };
        prop_assert_eq!(u8::from(st.month()), expected);
    }
}

#[test]
fn select_day_bounds() {
    let st = state(2024, 2, 2000, 2030);
    assert!(st.select_day(0).is_err());
    assert!(st.select_day(1).is_ok());
    assert!(st.select_day(29).is_ok());
    assert!(st.select_day(30).is_err());
}
