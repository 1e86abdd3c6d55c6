//! Day grid of a single month view.
//!
//! A grid always starts on the first day of a week and is made of complete
//! weeks: the trailing days of the previous month fill the first row, the
//! leading days of the next month fill the last one.

use chrono::{Datelike, Duration, Weekday};
use serde::Serialize;
use std::slice::Chunks;

use crate::error::Result;
use crate::month::MonthIndex;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Previous,
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day_number: u32,
    pub zone: Zone,
    pub is_selected: bool,
    pub clickable: bool,
}

impl DayCell {
    fn adjacent(day_number: u32, zone: Zone) -> Self {
        DayCell {
            day_number,
            zone,
            is_selected: false,
            clickable: false,
        }
    }

    fn current(day_number: u32, is_selected: bool) -> Self {
        DayCell {
            day_number,
            zone: Zone::Current,
            is_selected,
            clickable: true,
        }
    }

    pub fn is_current(&self) -> bool {
        self.zone == Zone::Current
    }
}

pub fn days_in_month(month: &MonthIndex) -> u32 {
    (month.next_first_day() - Duration::days(1)).day()
}

/// Position of day 1 of `month` within a week starting on `week_start`.
pub fn first_weekday(month: &MonthIndex, week_start: Weekday) -> u32 {
    weekday_index(month.first_day().weekday(), week_start)
}

pub fn days_in_month_of(year: i32, month0: i32) -> Result<u32> {
    MonthIndex::new(year, month0).map(|m| days_in_month(&m))
}

pub fn first_weekday_of(year: i32, month0: i32, week_start: Weekday) -> Result<u32> {
    MonthIndex::new(year, month0).map(|m| first_weekday(&m, week_start))
}

fn weekday_index(day: Weekday, week_start: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

pub fn build_grid(month: &MonthIndex, selected_day: Option<u32>, week_start: Weekday) -> Grid {
    let first = month.first_day();
    let leading = first_weekday(month, week_start);
    let num_days = days_in_month(month);

    let next_weekday = weekday_index(month.next_first_day().weekday(), week_start);
    let trailing = if next_weekday != 0 { 7 - next_weekday } else { 0 };

    let mut cells = Vec::with_capacity((leading + num_days + trailing) as usize);

    cells.extend(
        (1..=leading)
            .rev()
            .map(|back| first - Duration::days(back as i64))
            .map(|date| DayCell::adjacent(date.day(), Zone::Previous)),
    );
    cells.extend((1..=num_days).map(|day| DayCell::current(day, selected_day == Some(day))));
    cells.extend((1..=trailing).map(|day| DayCell::adjacent(day, Zone::Next)));

    log::debug!(
        "built grid for {}: {} leading, {} days, {} trailing",
        month,
        leading,
        num_days,
        trailing
    );

    Grid { month: *month, cells }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    #[serde(skip)]
    month: MonthIndex,
    cells: Vec<DayCell>,
}

impl Grid {
    pub fn month(&self) -> &MonthIndex {
        &self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&DayCell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> Chunks<'_, DayCell> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn selected(&self) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.is_selected)
    }

    pub fn into_cells(self) -> Vec<DayCell> {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month0: i32) -> MonthIndex {
        MonthIndex::new(year, month0).unwrap()
    }

    fn zone_days(grid: &Grid, zone: Zone) -> Vec<u32> {
        grid.cells()
            .iter()
            .filter(|c| c.zone == zone)
            .map(|c| c.day_number)
            .collect()
    }

    #[test]
    fn leap_february() {
        let feb = month(2024, 1);
        assert_eq!(days_in_month(&feb), 29);
        assert_eq!(first_weekday(&feb, Weekday::Sun), 4);

        let grid = build_grid(&feb, None, Weekday::Sun);
        assert_eq!(zone_days(&grid, Zone::Previous), vec![28, 29, 30, 31]);
        assert_eq!(zone_days(&grid, Zone::Current), (1..=29).collect::<Vec<_>>());
        assert_eq!(zone_days(&grid, Zone::Next), vec![1, 2]);
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn days_in_month_accounts_for_leap_years() {
        assert_eq!(days_in_month_of(2023, 1).unwrap(), 28);
        assert_eq!(days_in_month_of(1900, 1).unwrap(), 28);
        assert_eq!(days_in_month_of(2000, 1).unwrap(), 29);
        assert_eq!(days_in_month_of(2024, 3).unwrap(), 30);
        assert_eq!(days_in_month_of(2024, 11).unwrap(), 31);
    }

    #[test]
    fn selected_day_is_marked_once() {
        let grid = build_grid(&month(2024, 0), Some(15), Weekday::Sun);

        let selected: Vec<_> = grid.cells().iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].day_number, 15);
        assert_eq!(selected[0].zone, Zone::Current);
    }

    #[test]
    fn selection_outside_month_marks_nothing() {
        let feb = month(2023, 1);
        for day in [0, 29, 31, 400] {
            let grid = build_grid(&feb, Some(day), Weekday::Sun);
            assert!(grid.selected().is_none(), "day {} got selected", day);
        }
    }

    #[test]
    fn only_current_cells_are_clickable() {
        let grid = build_grid(&month(2024, 1), None, Weekday::Sun);
        assert!(grid.cells().iter().all(|c| c.clickable == c.is_current()));
    }

    #[test]
    fn no_trailing_row_when_next_month_starts_a_week() {
        // September 2024 starts on a Sunday, August ends on a Saturday
        let aug = month(2024, 7);
        let grid = build_grid(&aug, None, Weekday::Sun);
        assert!(zone_days(&grid, Zone::Next).is_empty());
        assert_eq!(grid.len() % DAYS_PER_WEEK, 0);
    }

    #[test]
    fn monday_week_start() {
        let feb = month(2024, 1);
        assert_eq!(first_weekday(&feb, Weekday::Mon), 3);

        let grid = build_grid(&feb, None, Weekday::Mon);
        assert_eq!(zone_days(&grid, Zone::Previous), vec![29, 30, 31]);
        assert_eq!(zone_days(&grid, Zone::Next), vec![1, 2, 3]);
    }

    #[test]
    fn grid_invariants_hold_across_years() {
        for week_start in [Weekday::Sun, Weekday::Mon, Weekday::Sat] {
            for year in 1999..=2030 {
                for m in 0..12 {
                    let idx = month(year, m);
                    let grid = build_grid(&idx, None, week_start);

                    assert_eq!(grid.len() % DAYS_PER_WEEK, 0, "{}", idx);
                    assert_eq!(
                        zone_days(&grid, Zone::Previous).len() as u32,
                        first_weekday(&idx, week_start)
                    );
                    assert_eq!(
                        zone_days(&grid, Zone::Current),
                        (1..=days_in_month(&idx)).collect::<Vec<_>>()
                    );

                    let zones: Vec<_> = grid.cells().iter().map(|c| c.zone).collect();
                    let mut sorted = zones.clone();
                    sorted.sort_by_key(|z| *z as u8);
                    assert_eq!(zones, sorted, "zones out of order in {}", idx);
                }
            }
        }
    }

    #[test]
    fn rows_are_full_weeks() {
        let grid = build_grid(&month(2024, 1), None, Weekday::Sun);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.len() == DAYS_PER_WEEK));
        assert_eq!(rows[0][4].day_number, 1);
    }
}
