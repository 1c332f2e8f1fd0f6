use crate::dates::{MAX_YEAR, MIN_YEAR};
use thiserror::Error;
use time::Month;

/// A single problem with a set of [`CalendarOptions`](crate::CalendarOptions)
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("year range {min}..={max} ends before it starts")]
    InvertedYearRange { min: i32, max: i32 },
    #[error("year range start {0} is outside {earliest}..={latest}", earliest = MIN_YEAR, latest = MAX_YEAR)]
    YearRangeStartOutOfBounds(i32),
    #[error("year range end {0} is outside {earliest}..={latest}", earliest = MIN_YEAR, latest = MAX_YEAR)]
    YearRangeEndOutOfBounds(i32),
    #[error("initial year {year} is outside the year range {min}..={max}")]
    InitialYearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("initial month {0} is not in 1..=12")]
    InitialMonthOutOfRange(u8),
}

/// Error returned when constructing a calendar from invalid options.  Every
/// violated field is reported, not just the first.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid calendar options: {}", join_violations(.violations))]
pub struct ConfigError {
    violations: Vec<ConfigViolation>,
}

impl ConfigError {
    // Invariant: `violations` is nonempty
    pub(crate) fn new(violations: Vec<ConfigViolation>) -> ConfigError {
        debug_assert!(!violations.is_empty(), "ConfigError without violations");
        ConfigError { violations }
    }

    pub fn violations(&self) -> &[ConfigViolation] {
        &self.violations
    }
}

fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error returned when a transition or query receives an out-of-range month
/// or day.  The calendar state is left untouched.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum InputError {
    #[error("month {0} is not in 1..=12")]
    Month(u8),
    #[error("day {day} does not exist in {month} {year}")]
    Day { year: i32, month: Month, day: u8 },
}
