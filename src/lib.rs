pub mod app;
pub mod calendar;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod interval;
pub mod labels;
pub mod month;
pub mod render;

pub use calendar::{advance_month, select_day, Calendar, CalendarState, Direction, Selection};
pub use error::{Error, ErrorKind, Result};
pub use grid::{build_grid, days_in_month, first_weekday, DayCell, Grid, Zone};
pub use month::MonthIndex;
