use crate::dates::{DAYS_IN_WEEK, leading_blanks};
use crate::event::Event;
use crate::state::CalendarState;
use std::iter::repeat_with;
use std::mem::replace;
use std::slice;
use time::Month;
use tracing::trace;

/// Label of the "previous month" button
pub const PREV_GLYPH: &str = "＜";

/// Label of the "next month" button
pub const NEXT_GLYPH: &str = "＞";

/// Label of padding cells
pub const BLANK_LABEL: &str = " ";

/// Number of months per row of the month picker
pub const MONTH_PICKER_WIDTH: usize = 2;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellRole {
    /// `<Month> <Year>` title; clicking it opens the month picker
    Header,
    WeekdayLabel,
    Day,
    Blank,
    NavPrev,
    NavNext,
    MonthOption,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Backward,
    Forward,
}

/// The value a cell reports when clicked
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Payload {
    Day(u8),
    Month(Month),
    Page(Direction),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Cell {
    role: CellRole,
    label: String,
    payload: Option<Payload>,
}

impl Cell {
    fn new<S: Into<String>>(role: CellRole, label: S, payload: Option<Payload>) -> Cell {
        Cell {
            role,
            label: label.into(),
            payload,
        }
    }

    fn blank() -> Cell {
        Cell::new(CellRole::Blank, BLANK_LABEL, None)
    }

    fn day(day: u8) -> Cell {
        Cell::new(CellRole::Day, day.to_string(), Some(Payload::Day(day)))
    }

    // A navigation button in a direction that cannot be paged has no label
    // and no payload.
    fn nav(direction: Direction, enabled: bool) -> Cell {
        let (role, glyph) = match direction {
            Direction::Backward => (CellRole::NavPrev, PREV_GLYPH),
            Direction::Forward => (CellRole::NavNext, NEXT_GLYPH),
        };
        if enabled {
            Cell::new(role, glyph, Some(Payload::Page(direction)))
        } else {
            Cell::new(role, "", None)
        }
    }

    pub fn role(&self) -> CellRole {
        self.role
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn payload(&self) -> Option<Payload> {
        self.payload
    }

    /// Returns the event produced by clicking this cell, or `None` if the
    /// cell is inert
    pub fn event(&self) -> Option<Event> {
        match (self.role, self.payload) {
            (CellRole::Header, _) => Some(Event::MonthHeaderClicked),
            (_, Some(Payload::Day(d))) => Some(Event::DayClicked(d)),
            (_, Some(Payload::Month(m))) => Some(Event::MonthOptionClicked(u8::from(m))),
            (_, Some(Payload::Page(Direction::Backward))) => Some(Event::PrevMonthClicked),
            (_, Some(Payload::Page(Direction::Forward))) => Some(Event::NextMonthClicked),
            (_, None) => None,
        }
    }
}

/// A keyboard of cells, as a sequence of rows
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Grid(Vec<Vec<Cell>>);

impl Grid {
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.0
    }

    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Vec<Cell>> {
        self.0.iter()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.0.get(row)?.get(col)
    }

    /// Iterates over every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.0.iter().flatten()
    }

    /// Returns the position of the first cell with the given role
    pub fn position(&self, role: CellRole) -> Option<(usize, usize)> {
        self.0.iter().enumerate().find_map(|(i, row)| {
            row.iter()
                .position(|cell| cell.role == role)
                .map(|j| (i, j))
        })
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Vec<Cell>;
    type IntoIter = slice::Iter<'a, Vec<Cell>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds the keyboard for the month on display: a header row, a row of
/// weekday labels, the day rows, and a row of navigation buttons
pub fn build(state: &CalendarState) -> Grid {
    let mut rows = Vec::new();
    rows.push(vec![header(state)]);
    rows.push(
        state
            .locale()
            .weekday_labels()
            .into_iter()
            .map(|wd| Cell::new(CellRole::WeekdayLabel, wd, None))
            .collect(),
    );
    rows.extend(day_rows(state));
    rows.push(vec![
        Cell::nav(Direction::Backward, state.can_page_backward()),
        Cell::nav(Direction::Forward, state.can_page_forward()),
    ]);
    trace!(year = state.year(), month = %state.month(), rows = rows.len(), "Built day grid");
    Grid(rows)
}

/// Builds the keyboard listing all twelve months, two per row
pub fn build_month_picker(state: &CalendarState) -> Grid {
    let locale = state.locale();
    let mut rows = Vec::with_capacity(12 / MONTH_PICKER_WIDTH);
    let mut row = Vec::with_capacity(MONTH_PICKER_WIDTH);
    let mut month = Month::January;
    loop {
        row.push(Cell::new(
            CellRole::MonthOption,
            locale.month_name(month),
            Some(Payload::Month(month)),
        ));
        if row.len() == MONTH_PICKER_WIDTH {
            rows.push(replace(&mut row, Vec::with_capacity(MONTH_PICKER_WIDTH)));
        }
        if month == Month::December {
            break;
        }
        month = month.next();
    }
    trace!(year = state.year(), "Built month picker");
    Grid(rows)
}

fn header(state: &CalendarState) -> Cell {
    Cell::new(
        CellRole::Header,
        format!(
            "{} {}",
            state.locale().month_name(state.month()),
            state.year()
        ),
        None,
    )
}

fn day_rows(state: &CalendarState) -> Vec<Vec<Cell>> {
    let leading = leading_blanks(state.first_weekday(), state.locale().week_start());
    let cells = repeat_with(Cell::blank)
        .take(leading)
        .chain((1..=state.days_in_month()).map(Cell::day));
    let mut rows = Vec::new();
    let mut row = Vec::with_capacity(DAYS_IN_WEEK);
    for cell in cells {
        row.push(cell);
        if row.len() == DAYS_IN_WEEK {
            rows.push(replace(&mut row, Vec::with_capacity(DAYS_IN_WEEK)));
        }
    }
    if !row.is_empty() {
        row.resize_with(DAYS_IN_WEEK, Cell::blank);
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::state::{CalendarOptions, YearRange};
    use time::macros::date;

    fn state(year: i32, month: u8, locale: Locale) -> CalendarState {
        CalendarState::new(
            CalendarOptions::new()
                .initial_year(year)
                .initial_month(month)
                .year_range(YearRange::new(2000, 2030))
                .locale(locale),
            date!(2025 - 01 - 22),
        )
        .unwrap()
    }

    fn labels(row: &[Cell]) -> Vec<&str> {
        row.iter().map(Cell::label).collect()
    }

    #[test]
    fn test_february_2024_english() {
        let grid = build(&state(2024, 2, Locale::English));
        let rows = grid.rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(labels(&rows[0]), ["February 2024"]);
        assert_eq!(rows[0][0].role(), CellRole::Header);
        assert_eq!(labels(&rows[1]), ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
        assert_eq!(labels(&rows[2]), [" ", " ", " ", " ", "1", "2", "3"]);
        assert_eq!(labels(&rows[3]), ["4", "5", "6", "7", "8", "9", "10"]);
        assert_eq!(labels(&rows[6]), ["25", "26", "27", "28", "29", " ", " "]);
        assert_eq!(labels(&rows[7]), [PREV_GLYPH, NEXT_GLYPH]);
        assert_eq!(
            grid.cells().filter(|c| c.role() == CellRole::Day).count(),
            29
        );
        assert_eq!(grid.position(CellRole::Day), Some((2, 4)));
        assert_eq!(rows[2][4].payload(), Some(Payload::Day(1)));
    }

    #[test]
    fn test_february_2024_russian() {
        let grid = build(&state(2024, 2, Locale::Russian));
        let rows = grid.rows();
        assert_eq!(labels(&rows[0]), ["Февраль 2024"]);
        assert_eq!(labels(&rows[1]), ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"]);
        assert_eq!(labels(&rows[2]), [" ", " ", " ", "1", "2", "3", "4"]);
        assert_eq!(grid.position(CellRole::Day), Some((2, 3)));
    }

    #[test]
    fn test_sunday_start_russian() {
        // September 2024 begins on a Sunday
        let grid = build(&state(2024, 9, Locale::Russian));
        assert_eq!(
            labels(&grid.rows()[2]),
            [" ", " ", " ", " ", " ", " ", "1"]
        );
        let grid = build(&state(2024, 9, Locale::English));
        assert_eq!(
            labels(&grid.rows()[2]),
            ["1", "2", "3", "4", "5", "6", "7"]
        );
    }

    #[test]
    fn test_no_trailing_row_when_full() {
        // February 2015 begins on a Sunday and has exactly four weeks
        let grid = build(&state(2015, 2, Locale::English));
        assert_eq!(grid.len(), 2 + 4 + 1);
        assert_eq!(labels(&grid.rows()[5]), ["22", "23", "24", "25", "26", "27", "28"]);
    }

    #[test]
    fn test_disabled_navigation() {
        let grid = build(&state(2000, 1, Locale::English));
        let nav = grid.rows().last().unwrap();
        assert_eq!(nav[0].role(), CellRole::NavPrev);
        assert_eq!(nav[0].label(), "");
        assert_eq!(nav[0].payload(), None);
        assert_eq!(nav[0].event(), None);
        assert_eq!(nav[1].label(), NEXT_GLYPH);
        assert_eq!(nav[1].event(), Some(Event::NextMonthClicked));

        let grid = build(&state(2030, 12, Locale::English));
        let nav = grid.rows().last().unwrap();
        assert_eq!(nav[0].event(), Some(Event::PrevMonthClicked));
        assert_eq!(nav[1].role(), CellRole::NavNext);
        assert_eq!(nav[1].label(), "");
        assert_eq!(nav[1].event(), None);
    }

    #[test]
    fn test_month_picker() {
        let grid = build_month_picker(&state(2024, 2, Locale::English));
        assert_eq!(grid.len(), 6);
        assert!(grid.iter().all(|row| row.len() == MONTH_PICKER_WIDTH));
        assert_eq!(labels(&grid.rows()[0]), ["January", "February"]);
        assert_eq!(labels(&grid.rows()[5]), ["November", "December"]);
        assert_eq!(
            grid.rows()[2][1].payload(),
            Some(Payload::Month(Month::June))
        );
        assert_eq!(grid.rows()[2][1].event(), Some(Event::MonthOptionClicked(6)));
        assert!(grid.cells().all(|c| c.role() == CellRole::MonthOption));
    }

    #[test]
    fn test_month_picker_russian() {
        let grid = build_month_picker(&state(2024, 2, Locale::Russian));
        assert_eq!(labels(&grid.rows()[0]), ["Январь", "Февраль"]);
    }

    #[test]
    fn test_cell_events() {
        let grid = build(&state(2024, 2, Locale::English));
        assert_eq!(grid.rows()[0][0].event(), Some(Event::MonthHeaderClicked));
        assert_eq!(grid.rows()[1][0].event(), None);
        assert_eq!(grid.rows()[2][0].event(), None);
        assert_eq!(grid.rows()[3][0].event(), Some(Event::DayClicked(4)));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let st = state(2024, 2, Locale::English);
        assert_eq!(build(&st), build(&st));
    }
}
