use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use derive_more::Constructor;
use std::fmt;

use crate::error::Result;
use crate::grid::{build_grid, Grid};
use crate::labels::Locale;
use crate::month::MonthIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub month: MonthIndex,
    pub selected_day: Option<u32>,
}

impl CalendarState {
    pub fn new(month: MonthIndex, selected_day: Option<u32>) -> Self {
        CalendarState {
            month,
            selected_day,
        }
    }

    pub fn from_date(date: &NaiveDate) -> Result<Self> {
        Ok(CalendarState {
            month: MonthIndex::from_date(date)?,
            selected_day: Some(date.day()),
        })
    }

    pub fn year(&self) -> i32 {
        self.month.year()
    }

    pub fn month0(&self) -> u32 {
        self.month.month0()
    }

    pub fn grid(&self, week_start: Weekday) -> Grid {
        build_grid(&self.month, self.selected_day, week_start)
    }
}

/// Steps the reference month. The selected day does not carry over.
pub fn advance_month(state: &CalendarState, direction: Direction) -> Result<CalendarState> {
    let month = match direction {
        Direction::Prev => state.month.prev()?,
        Direction::Next => state.month.next()?,
    };

    log::debug!("{:?}: {} -> {}", direction, state.month, month);

    Ok(CalendarState {
        month,
        selected_day: None,
    })
}

/// Selects `day` of the reference month. `day` is not validated against the
/// month, a day outside of it just won't match any cell.
pub fn select_day(state: &CalendarState, day: u32) -> (CalendarState, Selection) {
    let new_state = CalendarState {
        month: state.month,
        selected_day: Some(day),
    };

    (new_state, Selection::new(state.month, day))
}

/// Date reported to observers when a day gets selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Selection {
    month: MonthIndex,
    day: u32,
}

impl Selection {
    pub fn year(&self) -> i32 {
        self.month.year()
    }

    pub fn month0(&self) -> u32 {
        self.month.month0()
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The exact date, if `day` exists in the month.
    pub fn date(&self) -> Option<NaiveDate> {
        self.month.first_day().with_day(self.day)
    }

    /// The date with overflowing days rolled into the neighbouring months,
    /// e.g. day 0 is the last day of the previous month.
    pub fn normalized(&self) -> Option<NaiveDate> {
        self.month
            .first_day()
            .checked_add_signed(Duration::days(self.day as i64 - 1))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date() {
            Some(date) => write!(f, "{}", date),
            None => write!(f, "{}-{:02} (invalid)", self.month, self.day),
        }
    }
}

pub trait SelectionObserver {
    fn notify(&mut self, selection: Selection);
}

impl<F: FnMut(Selection)> SelectionObserver for F {
    fn notify(&mut self, selection: Selection) {
        self(selection)
    }
}

/// A month view widget: current state, labels and the registered observers.
pub struct Calendar<'a> {
    state: CalendarState,
    week_start: Weekday,
    locale: Locale,
    observers: Vec<Box<dyn SelectionObserver + 'a>>,
}

impl<'a> Calendar<'a> {
    /// Shows the month of `default_value`, or of today if there is none.
    pub fn new(default_value: Option<NaiveDate>) -> Result<Self> {
        let date = default_value.unwrap_or_else(|| Local::now().date_naive());

        Ok(Calendar {
            state: CalendarState::from_date(&date)?,
            week_start: Weekday::Sun,
            locale: Locale::default(),
            observers: Vec::new(),
        })
    }

    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn on_change<O: SelectionObserver + 'a>(mut self, observer: O) -> Self {
        self.subscribe(observer);
        self
    }

    pub fn subscribe<O: SelectionObserver + 'a>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn get_week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn get_locale(&self) -> &Locale {
        &self.locale
    }

    pub fn grid(&self) -> Grid {
        self.state.grid(self.week_start)
    }

    pub fn label(&self) -> String {
        self.locale
            .labels()
            .month_label(self.state.year(), self.state.month0())
    }

    pub fn prev_month(&mut self) -> Result<()> {
        self.state = advance_month(&self.state, Direction::Prev)?;
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<()> {
        self.state = advance_month(&self.state, Direction::Next)?;
        Ok(())
    }

    /// Moves `months` months at once. On error the calendar is unchanged.
    pub fn advance_by(&mut self, months: i32) -> Result<()> {
        let month = self.state.month.checked_add(months)?;
        log::debug!("{:+} months: {} -> {}", months, self.state.month, month);
        self.state = CalendarState::new(month, None);
        Ok(())
    }

    pub fn show_month(&mut self, month: MonthIndex) {
        self.state = CalendarState::new(month, None);
    }

    /// Shows the month of `date` with its day selected, without notifying.
    pub fn show_date(&mut self, date: &NaiveDate) -> Result<()> {
        self.state = CalendarState::from_date(date)?;
        Ok(())
    }

    pub fn select_day(&mut self, day: u32) -> Selection {
        let (state, selection) = select_day(&self.state, day);
        self.state = state;

        log::info!("selected {}", selection);
        for observer in self.observers.iter_mut() {
            observer.notify(selection);
        }

        selection
    }

    /// Clicks the grid cell at `index`. Cells of adjacent months are inert.
    pub fn click(&mut self, index: usize) -> Option<Selection> {
        let cell = *self.grid().get(index)?;

        if cell.clickable {
            Some(self.select_day(cell.day_number))
        } else {
            log::debug!("ignoring click on inert cell {}", index);
            None
        }
    }
}
