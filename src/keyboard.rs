use crate::theme::{BASE_STYLE, CURSOR_STYLE, HEADER_STYLE, WEEKDAY_STYLE};
use datekeys::{CellRole, Grid};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Margin, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Clear, Widget},
};

/// Number of columns per day button
const DAY_WIDTH: u16 = 5;

/// Width of the keyboard's interior.  Rows with fewer buttons than a week
/// split this width between them.
pub(crate) const KEYBOARD_WIDTH: u16 = DAY_WIDTH * 7;

/// Renders a [`Grid`] as a bordered block of buttons, one line per row,
/// highlighting the button under the cursor
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Keyboard<'a> {
    grid: &'a Grid,
    cursor: Option<(usize, usize)>,
}

impl<'a> Keyboard<'a> {
    pub(crate) fn new(grid: &'a Grid) -> Keyboard<'a> {
        Keyboard { grid, cursor: None }
    }

    pub(crate) fn cursor(mut self, cursor: (usize, usize)) -> Keyboard<'a> {
        self.cursor = Some(cursor);
        self
    }
}

impl Widget for Keyboard<'_> {
    /*
     * ┌───────────────────────────────────┐
     * │           February 2024           │
     * │ Su   Mo   Tu   We   Th   Fr   Sa  │
     * │                      1    2    3  │
     * │  …                                │
     * │       ＜                ＞        │
     * └───────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.grid.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let [outer_area] = Layout::horizontal([KEYBOARD_WIDTH + 2])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::bordered().style(BASE_STYLE).render(outer_area, buf);
        let inner = outer_area.inner(Margin::new(1, 1));
        for (i, (y, row)) in (inner.top()..inner.bottom())
            .zip(self.grid.iter())
            .enumerate()
        {
            for (j, cell) in row.iter().enumerate() {
                let rect = button_area(inner, y, j, row.len());
                let label_width =
                    u16::try_from(Line::raw(cell.label()).width()).unwrap_or(u16::MAX);
                let offset = rect.width.saturating_sub(label_width) / 2;
                buf.set_stringn(
                    rect.x + offset,
                    rect.y,
                    cell.label(),
                    usize::from(rect.width - offset),
                    Style::new(),
                );
                // Styles go on after the label, as writing a wide character
                // resets the cell it covers.
                buf.set_style(rect, role_style(cell.role()));
                if self.cursor == Some((i, j)) {
                    buf.set_style(rect, CURSOR_STYLE);
                }
            }
        }
    }
}

// Splits the row at `y` evenly between `count` buttons and returns the area
// of button `index`; any odd columns go to the later buttons.
fn button_area(inner: Rect, y: u16, index: usize, count: usize) -> Rect {
    let width = usize::from(inner.width);
    let start = width * index / count;
    let end = width * (index + 1) / count;
    let start = u16::try_from(start).unwrap_or(inner.width);
    let end = u16::try_from(end).unwrap_or(inner.width);
    Rect::new(inner.x + start, y, end - start, 1)
}

fn role_style(role: CellRole) -> Style {
    match role {
        CellRole::Header => HEADER_STYLE,
        CellRole::WeekdayLabel => WEEKDAY_STYLE,
        _ => BASE_STYLE,
    }
}
