use crate::locale::WeekStart;
use time::{Date, Month, Weekday};

/// Number of columns in a row of the day grid
pub const DAYS_IN_WEEK: usize = 7;

/// Earliest year a calendar may be configured to show.  This is the year of
/// the Unix epoch.
pub const MIN_YEAR: i32 = 1970;

/// Latest year a calendar may be configured to show.  This is the last year
/// representable by [`time::Date`] (9999 unless `time` is built with
/// `large-dates`).
pub const MAX_YEAR: i32 = Date::MAX.year();

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    // 0 = Sunday, 6 = Saturday
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

/// Returns the number of days in the given month of the proleptic Gregorian
/// calendar, i.e., the day-of-month of the day before the first of the
/// following month.
pub fn days_in_month(year: i32, month: Month) -> u8 {
    month.length(year)
}

/// Returns the number of blank cells to place before day 1 of a month whose
/// first day falls on `first`, for a week starting on `week_start`.
///
/// Day 1 goes in column `w` (counting from 1), and the blanks fill the
/// columns before it.  In a Sunday-first week, weekday `n` (0 = Sunday) is in
/// column `n + 1`; in a Monday-first week, Monday is in column 1 and Sunday
/// in column 7.
pub fn leading_blanks(first: Weekday, week_start: WeekStart) -> usize {
    let mut w = first.index0();
    match week_start {
        WeekStart::Monday => {
            if w == 0 {
                w = DAYS_IN_WEEK;
            }
        }
        WeekStart::Sunday => w += 1,
    }
    w - 1
}

/// Renders a date as `DD.MM.YYYY`
pub fn format_date(date: Date) -> String {
    format!(
        "{:02}.{:02}.{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}
