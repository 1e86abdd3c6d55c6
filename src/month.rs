use chrono::{Datelike, Local, Month, Months, NaiveDate};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Error, ErrorKind, Result};

/// Years a `MonthIndex` may refer to.
///
/// Kept well inside chrono's representable range so that the neighbouring
/// months a grid reaches into always exist.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = -200_000..=200_000;

/// A reference month, i.e. the `(year, month)` pair a calendar grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthIndex {
    first: NaiveDate,
    next_first: NaiveDate,
}

impl MonthIndex {
    /// Creates the index for `month0` (0-based) of `year`.
    ///
    /// Months outside `0..12` roll over into the neighbouring years, so
    /// `(2024, 12)` is January 2025 and `(2024, -1)` is December 2023.
    pub fn new(year: i32, month0: i32) -> Result<Self> {
        Self::from_total(year as i64 * 12 + month0 as i64)
    }

    /// `total` counts months since January of year 0.
    fn from_total(total: i64) -> Result<Self> {
        let year = total.div_euclid(12);
        let month0 = total.rem_euclid(12) as u32;

        if year < *SUPPORTED_YEARS.start() as i64 || year > *SUPPORTED_YEARS.end() as i64 {
            return Err(Error::new(
                ErrorKind::DateOutOfRange,
                &format!("year {} is not supported", year),
            ));
        }

        let first = NaiveDate::from_ymd_opt(year as i32, month0 + 1, 1)
            .ok_or_else(|| Error::from(ErrorKind::DateOutOfRange))?;
        let next_first = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| Error::from(ErrorKind::DateOutOfRange))?;

        Ok(MonthIndex { first, next_first })
    }

    pub fn from_month(month: Month, year: i32) -> Result<Self> {
        Self::new(year, month.number_from_month() as i32 - 1)
    }

    pub fn from_date<T: Datelike>(date: &T) -> Result<Self> {
        Self::new(date.year(), date.month0() as i32)
    }

    pub fn current() -> Result<Self> {
        Self::from_date(&Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    /// Day 1 of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Day 1 of the following month.
    pub fn next_first_day(&self) -> NaiveDate {
        self.next_first
    }

    pub fn checked_add(&self, months: i32) -> Result<Self> {
        Self::from_total(self.year() as i64 * 12 + self.month0() as i64 + months as i64)
    }

    pub fn next(&self) -> Result<Self> {
        self.checked_add(1)
    }

    pub fn prev(&self) -> Result<Self> {
        self.checked_add(-1)
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month0() + 1)
    }
}
