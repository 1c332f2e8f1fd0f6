//! Navigable month/year calendar keyboards for chat-style date pickers.
//!
//! A [`CalendarState`] tracks the month on display and the range of years it
//! may be paged within.  [`build()`] turns a state into a [`Grid`] of cells:
//! a `<Month> <Year>` header, a row of weekday labels, the days of the month
//! padded out to whole weeks, and a pair of previous/next buttons.
//! [`build_month_picker()`] lists the twelve months instead.  Every grid is
//! rebuilt from scratch after each interaction.
//!
//! A [`Session`] ties these together for a transport that only knows how to
//! render cells and report clicks:
//!
//! ```
//! use datekeys::{CalendarOptions, CalendarState, Event, Outcome, Session, YearRange};
//! use time::macros::date;
//!
//! let state = CalendarState::new(
//!     CalendarOptions::new()
//!         .initial_year(2024)
//!         .initial_month(2)
//!         .year_range(YearRange::new(2000, 2030)),
//!     date!(2024 - 02 - 10),
//! )?;
//! let mut session = Session::new(state);
//! assert_eq!(session.grid().rows()[0][0].label(), "February 2024");
//! assert_eq!(session.handle(Event::NextMonthClicked)?, Outcome::Redraw);
//! assert_eq!(
//!     session.handle(Event::DayClicked(15))?,
//!     Outcome::Picked(date!(2024 - 03 - 15)),
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod dates;
mod error;
mod event;
mod grid;
mod locale;
mod state;
pub use crate::dates::{
    DAYS_IN_WEEK, MAX_YEAR, MIN_YEAR, days_in_month, format_date, leading_blanks,
};
pub use crate::error::{ConfigError, ConfigViolation, InputError};
pub use crate::event::{Event, Outcome, Session, View};
pub use crate::grid::{
    BLANK_LABEL, Cell, CellRole, Direction, Grid, MONTH_PICKER_WIDTH, NEXT_GLYPH, PREV_GLYPH,
    Payload, build, build_month_picker,
};
pub use crate::locale::{Locale, LocaleTable, UnknownLocaleError, WeekStart};
pub use crate::state::{CalendarOptions, CalendarState, ParseYearRangeError, YearRange};
