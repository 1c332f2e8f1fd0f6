use crate::help::Help;
use crate::keyboard::Keyboard;
use crate::theme::BASE_STYLE;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, read};
use datekeys::{Cell, CellRole, Event, Grid, Outcome, Payload, Session, View};
use ratatui::{DefaultTerminal, buffer::Buffer, layout::Rect, widgets::Widget};
use std::io::{self, Write};
use time::Date;
use tracing::warn;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    session: Session,
    grid: Grid,
    cursor: (usize, usize),
    state: AppState,
}

impl App {
    pub(crate) fn new(session: Session) -> App {
        let grid = session.grid();
        let cursor = home_position(&session, &grid);
        App {
            session,
            grid,
            cursor,
            state: AppState::Keyboard,
        }
    }

    /// Runs until the user picks a date or quits, returning the picked date
    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<Option<Date>> {
        while !self.finished() {
            terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
            self.handle_input()?;
        }
        Ok(self.picked())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key did nothing
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Keyboard => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_left(),
                KeyCode::Char('l') | KeyCode::Right => self.move_right(),
                KeyCode::Char('k') | KeyCode::Up => self.move_vertically(false),
                KeyCode::Char('j') | KeyCode::Down => self.move_vertically(true),
                KeyCode::Enter | KeyCode::Char(' ') => self.press(),
                KeyCode::Char('p') | KeyCode::PageUp => self.dispatch(Event::PrevMonthClicked),
                KeyCode::Char('n') | KeyCode::PageDown => self.dispatch(Event::NextMonthClicked),
                KeyCode::Char('m') => self.dispatch(Event::MonthHeaderClicked),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Keyboard;
                true
            }
            AppState::Picked(_) | AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn finished(&self) -> bool {
        matches!(self.state, AppState::Picked(_) | AppState::Quitting)
    }

    fn picked(&self) -> Option<Date> {
        match self.state {
            AppState::Picked(date) => Some(date),
            _ => None,
        }
    }

    fn row_len(&self, row: usize) -> usize {
        self.grid.rows().get(row).map_or(0, Vec::len)
    }

    fn move_left(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col > 0 {
            self.cursor = (row, col - 1);
            true
        } else {
            false
        }
    }

    fn move_right(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col + 1 < self.row_len(row) {
            self.cursor = (row, col + 1);
            true
        } else {
            false
        }
    }

    // Rows have different widths, so the column is carried over
    // proportionally: from the right half of a week onto the "next" button,
    // and so on.
    fn move_vertically(&mut self, down: bool) -> bool {
        let (row, col) = self.cursor;
        let target = if down {
            row + 1
        } else if let Some(r) = row.checked_sub(1) {
            r
        } else {
            return false;
        };
        let (old_len, new_len) = (self.row_len(row), self.row_len(target));
        if new_len == 0 || old_len == 0 {
            return false;
        }
        self.cursor = (target, col * new_len / old_len);
        true
    }

    fn press(&mut self) -> bool {
        let (row, col) = self.cursor;
        match self.grid.get(row, col).and_then(Cell::event) {
            Some(event) => self.dispatch(event),
            None => false,
        }
    }

    fn dispatch(&mut self, event: Event) -> bool {
        match self.session.handle(event) {
            Ok(Outcome::Redraw) => {
                self.grid = self.session.grid();
                self.cursor = home_position(&self.session, &self.grid);
                true
            }
            Ok(Outcome::Picked(date)) => {
                self.state = AppState::Picked(date);
                true
            }
            Ok(Outcome::Ignored) => false,
            Err(e) => {
                warn!(%e, ?event, "Rejected event");
                false
            }
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Keyboard::new(&self.grid)
            .cursor(self.cursor)
            .render(area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Keyboard,
    Helping,
    Picked(Date),
    Quitting,
}

// Where the cursor lands after the keyboard is rebuilt: the current month in
// the month picker, day 1 in the day grid
fn home_position(session: &Session, grid: &Grid) -> (usize, usize) {
    let found = match session.view() {
        View::MonthPicker => grid.rows().iter().enumerate().find_map(|(i, row)| {
            row.iter()
                .position(|c| c.payload() == Some(Payload::Month(session.state().month())))
                .map(|j| (i, j))
        }),
        View::Days => grid.position(CellRole::Day),
    };
    found.unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{CURSOR_STYLE, HEADER_STYLE, WEEKDAY_STYLE};
    use datekeys::{CalendarOptions, CalendarState, Locale, YearRange};
    use time::macros::date;
    use time::Month;

    fn app(year: i32, month: u8, locale: Locale) -> App {
        let state = CalendarState::new(
            CalendarOptions::new()
                .initial_year(year)
                .initial_month(month)
                .year_range(YearRange::new(2000, 2030))
                .locale(locale),
            date!(2025 - 01 - 22),
        )
        .unwrap();
        App::new(Session::new(state))
    }

    #[test]
    fn test_render_february_2024() {
        let mut app = app(2024, 2, Locale::English);
        let area = Rect::new(0, 0, 37, 10);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌───────────────────────────────────┐",
            "│           February 2024           │",
            "│ Su   Mo   Tu   We   Th   Fr   Sa  │",
            "│                      1    2    3  │",
            "│  4    5    6    7    8    9   10  │",
            "│ 11   12   13   14   15   16   17  │",
            "│ 18   19   20   21   22   23   24  │",
            "│ 25   26   27   28   29            │",
            "│       ＜                ＞        │",
            "└───────────────────────────────────┘",
        ]);
        expected.set_style(*expected.area(), BASE_STYLE);
        expected.set_style(Rect::new(1, 1, 35, 1), HEADER_STYLE);
        expected.set_style(Rect::new(1, 2, 35, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(21, 3, 5, 1), CURSOR_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_cursor_starts_on_first_day() {
        let app = app(2024, 2, Locale::Russian);
        assert_eq!(app.cursor, (2, 3));
    }

    #[test]
    fn test_pick_day() {
        let mut app = app(2024, 2, Locale::English);
        assert!(app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.cursor, (3, 5));
        assert!(app.handle_key(KeyCode::Enter));
        assert!(app.finished());
        assert_eq!(app.picked(), Some(date!(2024 - 02 - 09)));
    }

    #[test]
    fn test_blank_and_label_cells_are_inert() {
        let mut app = app(2024, 2, Locale::English);
        assert!(app.handle_key(KeyCode::Left));
        assert_eq!(app.cursor, (2, 3));
        assert!(!app.handle_key(KeyCode::Enter));
        assert!(app.handle_key(KeyCode::Up));
        assert!(!app.handle_key(KeyCode::Char(' ')));
        assert!(!app.finished());
    }

    #[test]
    fn test_page_keys() {
        let mut app = app(2024, 12, Locale::English);
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.grid.rows()[0][0].label(), "January 2025");
        assert!(app.handle_key(KeyCode::PageUp));
        assert_eq!(app.grid.rows()[0][0].label(), "December 2024");
    }

    #[test]
    fn test_page_at_range_start_beeps() {
        let mut app = app(2000, 1, Locale::English);
        assert!(!app.handle_key(KeyCode::Char('p')));
        assert_eq!(app.session.state().month(), Month::January);
    }

    #[test]
    fn test_nav_button() {
        let mut app = app(2024, 2, Locale::English);
        // From the right half of the last week onto "next"
        for _ in 0..5 {
            assert!(app.handle_key(KeyCode::Down));
        }
        assert_eq!(app.cursor, (7, 1));
        assert!(!app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.session.state().month(), Month::March);
    }

    #[test]
    fn test_month_picker() {
        let mut app = app(2024, 2, Locale::English);
        assert!(app.handle_key(KeyCode::Char('m')));
        assert_eq!(app.session.view(), View::MonthPicker);
        assert_eq!(app.cursor, (0, 1));
        assert!(app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.session.view(), View::Days);
        assert_eq!(app.session.state().month(), Month::April);
        assert_eq!(app.grid.rows()[0][0].label(), "April 2024");
    }

    #[test]
    fn test_header_opens_month_picker() {
        let mut app = app(2024, 2, Locale::Russian);
        app.cursor = (0, 0);
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.grid.rows()[0][0].label(), "Январь");
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app(2024, 2, Locale::English);
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Keyboard);
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.finished());
        assert_eq!(app.picked(), None);
    }
}
