use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::CalendarError;

/// Years accepted before the reference year.
pub const YEARS_BACK: i32 = 2;
/// Years accepted after the reference year.
pub const YEARS_AHEAD: i32 = 5;

/// Target calendar year, validated against a reference ("current") year.
///
/// The reference year is an explicit input so the engine never reads the
/// clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "i32")]
pub struct Year {
    value: i32,
    first: NaiveDate,
    last: NaiveDate,
}

impl Year {
    /// Accepts `reference_year - 2 ..= reference_year + 5`.
    pub fn new(value: i32, reference_year: i32) -> Result<Self, CalendarError> {
        let min = reference_year - YEARS_BACK;
        let max = reference_year + YEARS_AHEAD;
        let out_of_window = CalendarError::InvalidYear { year: value, min, max };
        if value < min || value > max {
            return Err(out_of_window);
        }
        let first = NaiveDate::from_ymd_opt(value, 1, 1).ok_or(out_of_window.clone())?;
        let last = NaiveDate::from_ymd_opt(value, 12, 31).ok_or(out_of_window)?;
        Ok(Self { value, first, last })
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// January 1st.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// December 31st.
    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn is_leap(&self) -> bool {
        NaiveDate::from_ymd_opt(self.value, 2, 29).is_some()
    }

    /// 365 or 366.
    pub fn len_days(&self) -> u32 {
        if self.is_leap() {
            366
        } else {
            365
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.value
    }

    /// Every date of the year, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        self.first.iter_days().take_while(move |d| *d <= last)
    }
}

impl From<Year> for i32 {
    fn from(y: Year) -> i32 {
        y.value
    }
}
