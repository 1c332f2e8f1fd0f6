use crate::dates::{MAX_YEAR, MIN_YEAR, days_in_month};
use crate::error::{ConfigError, ConfigViolation, InputError};
use crate::locale::Locale;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, Weekday};
use tracing::debug;

/// An inclusive range of navigable years
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Every year the date backend can represent, `MIN_YEAR..=MAX_YEAR`
    pub const FULL: YearRange = YearRange {
        min: MIN_YEAR,
        max: MAX_YEAR,
    };

    /// Creates a range without checking it.  Bounds are validated when the
    /// range is used to construct a [`CalendarState`].
    pub const fn new(min: i32, max: i32) -> YearRange {
        YearRange { min, max }
    }

    pub const fn min(self) -> i32 {
        self.min
    }

    pub const fn max(self) -> i32 {
        self.max
    }

    pub fn contains(self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    fn violations(self) -> impl Iterator<Item = ConfigViolation> {
        [
            (self.min > self.max).then_some(ConfigViolation::InvertedYearRange {
                min: self.min,
                max: self.max,
            }),
            (!(MIN_YEAR..=MAX_YEAR).contains(&self.min))
                .then_some(ConfigViolation::YearRangeStartOutOfBounds(self.min)),
            (!(MIN_YEAR..=MAX_YEAR).contains(&self.max))
                .then_some(ConfigViolation::YearRangeEndOutOfBounds(self.max)),
        ]
        .into_iter()
        .flatten()
    }
}

impl Default for YearRange {
    fn default() -> YearRange {
        YearRange::FULL
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.min, self.max)
    }
}

/// Parses `MIN:MAX`
impl FromStr for YearRange {
    type Err = ParseYearRangeError;

    fn from_str(s: &str) -> Result<YearRange, ParseYearRangeError> {
        let (min, max) = s.split_once(':').ok_or(ParseYearRangeError::NoColon)?;
        let min = min
            .trim()
            .parse::<i32>()
            .map_err(|_| ParseYearRangeError::BadYear(min.to_owned()))?;
        let max = max
            .trim()
            .parse::<i32>()
            .map_err(|_| ParseYearRangeError::BadYear(max.to_owned()))?;
        Ok(YearRange::new(min, max))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseYearRangeError {
    #[error("year range must be of the form MIN:MAX")]
    NoColon,
    #[error("invalid year {0:?} in year range")]
    BadYear(String),
}

/// Construction-time settings for a [`CalendarState`].  Every setting is
/// optional: the initial year and month default to today's, the year range
/// defaults to [`YearRange::FULL`], and the locale defaults to English.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CalendarOptions {
    initial_year: Option<i32>,
    initial_month: Option<u8>,
    year_range: Option<YearRange>,
    locale: Locale,
}

impl CalendarOptions {
    pub fn new() -> CalendarOptions {
        CalendarOptions::default()
    }

    pub fn initial_year(mut self, year: i32) -> CalendarOptions {
        self.initial_year = Some(year);
        self
    }

    pub fn initial_month(mut self, month: u8) -> CalendarOptions {
        self.initial_month = Some(month);
        self
    }

    pub fn year_range(mut self, range: YearRange) -> CalendarOptions {
        self.year_range = Some(range);
        self
    }

    pub fn locale(mut self, locale: Locale) -> CalendarOptions {
        self.locale = locale;
        self
    }
}

/// The month currently on display in one calendar session, together with the
/// bounds it may be paged within.
///
/// Invariant: `(year, month)` lies between January of `year_range.min()` and
/// December of `year_range.max()`, and both bounds lie within
/// `MIN_YEAR..=MAX_YEAR`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CalendarState {
    year: i32,
    month: Month,
    year_range: YearRange,
    locale: Locale,
}

impl CalendarState {
    /// Constructs a calendar from `options`, using `today` for any unset
    /// initial year or month.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] listing every invalid setting.
    pub fn new(options: CalendarOptions, today: Date) -> Result<CalendarState, ConfigError> {
        let year_range = options.year_range.unwrap_or_default();
        let year = options.initial_year.unwrap_or_else(|| today.year());
        let month_number = options
            .initial_month
            .unwrap_or_else(|| u8::from(today.month()));
        let mut violations = year_range.violations().collect::<Vec<_>>();
        if !year_range.contains(year) {
            violations.push(ConfigViolation::InitialYearOutOfRange {
                year,
                min: year_range.min(),
                max: year_range.max(),
            });
        }
        let month = Month::try_from(month_number);
        if month.is_err() {
            violations.push(ConfigViolation::InitialMonthOutOfRange(month_number));
        }
        match month {
            Ok(month) if violations.is_empty() => {
                debug!(year, %month, range = %year_range, locale = %options.locale, "Calendar created");
                Ok(CalendarState {
                    year,
                    month,
                    year_range,
                    locale: options.locale,
                })
            }
            _ => Err(ConfigError::new(violations)),
        }
    }

    /// Like [`CalendarState::new`], taking "today" from the UTC clock
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] listing every invalid setting.
    pub fn from_options(options: CalendarOptions) -> Result<CalendarState, ConfigError> {
        CalendarState::new(options, OffsetDateTime::now_utc().date())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Returns the weekday of the first day of the current month
    pub fn first_weekday(&self) -> Weekday {
        self.first_day().weekday()
    }

    pub(crate) fn first_day(&self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("CalendarState year should be within the date backend's range")
    }

    pub fn can_page_backward(&self) -> bool {
        !(self.year <= self.year_range.min() && self.month == Month::January)
    }

    pub fn can_page_forward(&self) -> bool {
        !(self.year >= self.year_range.max() && self.month == Month::December)
    }

    /// Moves to the previous month.  At January of the first year in range,
    /// this does nothing.  Returns whether the state changed.
    pub fn page_backward(&mut self) -> bool {
        if self.month != Month::January {
            self.month = self.month.previous();
        } else if self.year > self.year_range.min() {
            self.year -= 1;
            self.month = Month::December;
        } else {
            debug!(year = self.year, "Already at first month in range");
            return false;
        }
        debug!(year = self.year, month = %self.month, "Paged backward");
        true
    }

    /// Moves to the next month.  At December of the last year in range, this
    /// does nothing.  Returns whether the state changed.
    pub fn page_forward(&mut self) -> bool {
        if self.month != Month::December {
            self.month = self.month.next();
        } else if self.year < self.year_range.max() {
            self.year += 1;
            self.month = Month::January;
        } else {
            debug!(year = self.year, "Already at last month in range");
            return false;
        }
        debug!(year = self.year, month = %self.month, "Paged forward");
        true
    }

    /// Switches to month number `month` of the current year
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Month`] if `month` is not in `1..=12`.
    pub fn jump_to_month(&mut self, month: u8) -> Result<(), InputError> {
        self.month = Month::try_from(month).map_err(|_| InputError::Month(month))?;
        debug!(year = self.year, month = %self.month, "Jumped to month");
        Ok(())
    }

    /// Returns the date of day `day` of the current month
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Day`] if the current month has no such day.
    pub fn select_day(&self, day: u8) -> Result<Date, InputError> {
        let err = InputError::Day {
            year: self.year,
            month: self.month,
            day,
        };
        if day < 1 || day > self.days_in_month() {
            return Err(err);
        }
        Date::from_calendar_date(self.year, self.month, day).map_err(|_| err)
    }
}
