use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use termion::style;

use crate::calendar::Calendar;
use crate::error::Result;
use crate::grid::{DayCell, Grid, Zone};
use crate::labels::Labels;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub today_char: char,
    pub focus_char: char,
    pub styled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            today_char: '*',
            focus_char: '>',
            styled: true,
        }
    }
}

struct CellView<'a> {
    cell: &'a DayCell,
    is_today: bool,
    theme: &'a Theme,
}

impl CellView<'_> {
    const CELL_WIDTH: usize = 4;
}

impl Display for CellView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg_today = if self.is_today {
            self.theme.today_char
        } else {
            ' '
        };

        let arg_focus = if self.cell.is_selected {
            self.theme.focus_char
        } else {
            ' '
        };

        if self.theme.styled && !self.cell.is_current() {
            write!(
                f,
                "{}{}{}{:>2}{}",
                style::Faint,
                arg_today,
                arg_focus,
                self.cell.day_number,
                style::Reset
            )
        } else if self.theme.styled && self.cell.is_selected {
            write!(
                f,
                "{}{}{}{:>2}{}",
                arg_today,
                arg_focus,
                style::Invert,
                self.cell.day_number,
                style::Reset
            )
        } else {
            write!(f, "{}{}{:>2}", arg_today, arg_focus, self.cell.day_number)
        }
    }
}

/// Text rendering of one month: label, weekday header and the day grid.
pub struct MonthView<'a> {
    label: String,
    labels: &'static Labels,
    week_start: Weekday,
    grid: Grid,
    today: Option<NaiveDate>,
    theme: &'a Theme,
}

impl<'a> MonthView<'a> {
    pub fn new(calendar: &Calendar, theme: &'a Theme) -> Self {
        MonthView {
            label: calendar.label(),
            labels: calendar.get_locale().labels(),
            week_start: calendar.get_week_start(),
            grid: calendar.grid(),
            today: None,
            theme,
        }
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn is_today(&self, cell: &DayCell) -> bool {
        let month = self.grid.month();
        match self.today {
            Some(today) => {
                cell.zone == Zone::Current
                    && today.year() == month.year()
                    && today.month0() == month.month0()
                    && today.day() == cell.day_number
            }
            None => false,
        }
    }
}

impl Display for MonthView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;

        for head in self.labels.weekday_header(self.week_start) {
            write!(f, "{:>width$}", head, width = CellView::CELL_WIDTH)?;
        }
        writeln!(f)?;

        for row in self.grid.rows() {
            for cell in row {
                write!(
                    f,
                    "{}",
                    CellView {
                        cell,
                        is_today: self.is_today(cell),
                        theme: self.theme,
                    }
                )?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct GridDump<'a> {
    label: String,
    month: String,
    cells: &'a [DayCell],
}

/// The current grid of `calendar` as a TOML document.
pub fn grid_to_toml(calendar: &Calendar) -> Result<String> {
    let grid = calendar.grid();
    let dump = GridDump {
        label: calendar.label(),
        month: grid.month().to_string(),
        cells: grid.cells(),
    };

    Ok(toml::to_string(&dump)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Theme {
        Theme {
            styled: false,
            ..Theme::default()
        }
    }

    #[test]
    fn renders_february_2024() {
        let mut calendar = Calendar::new(NaiveDate::from_ymd_opt(2024, 2, 1)).unwrap();
        calendar.select_day(15);
        let theme = plain();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let text = MonthView::new(&calendar, &theme).today(today).to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "2024 February");
        assert_eq!(lines[1], " Sun Mon Tue Wed Thu Fri Sat");
        assert_eq!(lines[2], "  28  29  30  31   1   2   3");
        assert_eq!(lines[4], "  11  12  13  14 >15  16  17");
        assert_eq!(lines[6], "  25  26  27  28* 29   1   2");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn adjacent_days_are_faint_when_styled() {
        let calendar = Calendar::new(NaiveDate::from_ymd_opt(2024, 2, 1)).unwrap();
        let theme = Theme::default();

        let text = MonthView::new(&calendar, &theme).to_string();
        let first_row = text.lines().nth(2).unwrap();
        assert!(first_row.starts_with(&format!("{}  28{}", style::Faint, style::Reset)));
    }

    #[test]
    fn grid_as_toml() {
        let calendar = Calendar::new(NaiveDate::from_ymd_opt(2024, 2, 3)).unwrap();
        let dump = grid_to_toml(&calendar).unwrap();

        assert!(dump.starts_with("label = \"2024 February\"\nmonth = \"2024-02\"\n"));
        assert_eq!(dump.matches("[[cells]]").count(), 35);
        assert_eq!(dump.matches("zone = \"previous\"").count(), 4);
        assert_eq!(dump.matches("is_selected = true").count(), 1);
    }
}
