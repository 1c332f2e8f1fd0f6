use crate::error::InputError;
use crate::grid::{Grid, build, build_month_picker};
use crate::state::CalendarState;
use time::Date;
use tracing::debug;

/// A user interaction reported by the transport
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Event {
    PrevMonthClicked,
    NextMonthClicked,
    MonthHeaderClicked,
    MonthOptionClicked(u8),
    DayClicked(u8),
}

/// Which keyboard a session is currently showing
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum View {
    #[default]
    Days,
    MonthPicker,
}

/// What the transport should do after an event has been handled
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The keyboard changed; discard the old one and render
    /// [`Session::grid()`]
    Redraw,
    /// The user picked a date
    Picked(Date),
    /// Nothing changed; acknowledge the click and keep the keyboard
    Ignored,
}

/// A calendar state plus the keyboard currently shown for it.  One session
/// is owned by each conversation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Session {
    state: CalendarState,
    view: View,
}

impl Session {
    pub fn new(state: CalendarState) -> Session {
        Session {
            state,
            view: View::Days,
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Builds a fresh keyboard for the current view
    pub fn grid(&self) -> Grid {
        match self.view {
            View::Days => build(&self.state),
            View::MonthPicker => build_month_picker(&self.state),
        }
    }

    /// Applies the transition for `event`
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the event carries a month or day that does
    /// not exist.  The session is unchanged in that case.
    pub fn handle(&mut self, event: Event) -> Result<Outcome, InputError> {
        debug!(?event, view = ?self.view, "Handling event");
        let outcome = match event {
            Event::PrevMonthClicked => self.page(CalendarState::page_backward),
            Event::NextMonthClicked => self.page(CalendarState::page_forward),
            Event::MonthHeaderClicked => {
                if self.view == View::MonthPicker {
                    Outcome::Ignored
                } else {
                    self.view = View::MonthPicker;
                    Outcome::Redraw
                }
            }
            Event::MonthOptionClicked(month) => {
                self.state.jump_to_month(month)?;
                self.view = View::Days;
                Outcome::Redraw
            }
            Event::DayClicked(day) => {
                let date = self.state.select_day(day)?;
                debug!(%date, "Date picked");
                Outcome::Picked(date)
            }
        };
        Ok(outcome)
    }

    fn page(&mut self, transition: fn(&mut CalendarState) -> bool) -> Outcome {
        let moved = transition(&mut self.state);
        if moved || self.view != View::Days {
            self.view = View::Days;
            Outcome::Redraw
        } else {
            Outcome::Ignored
        }
    }
}
