//! Date-keyed facts layered over the base cycle: holidays, vacations,
//! guardias (on-call shifts on rest days) and extra shifts.
//!
//! Placement rules that depend on the cycle (guardia on a work day, dates
//! outside the year) are checked by [`CalendarConfig::new`](crate::CalendarConfig::new).

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{CalendarError, Hours};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: Option<String>) -> Self {
        Self { date, name }
    }
}

/// Inclusive date range of vacation days.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VacationPeriod {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        description: Option<String>,
    ) -> Result<Self, CalendarError> {
        let p = Self {
            start_date,
            end_date,
            description,
        };
        p.check_order()?;
        Ok(p)
    }

    pub(crate) fn check_order(&self) -> Result<(), CalendarError> {
        if self.end_date < self.start_date {
            return Err(CalendarError::InvalidDateRange {
                field: "vacation",
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of calendar days covered, endpoints included.
    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn overlaps(&self, other: &VacationPeriod) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

/// On-call shift worked on a day that is otherwise rest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardia {
    pub date: NaiveDate,
    pub hours: Hours,
    #[serde(default)]
    pub description: String,
}

impl Guardia {
    pub fn new(date: NaiveDate, hours: Hours, description: impl Into<String>) -> Self {
        Self {
            date,
            hours,
            description: description.into(),
        }
    }
}

/// Additional hours on any contracted day; never changes the day's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraShift {
    pub date: NaiveDate,
    pub hours: Hours,
    #[serde(default)]
    pub description: String,
}

impl ExtraShift {
    pub fn new(date: NaiveDate, hours: Hours, description: impl Into<String>) -> Self {
        Self {
            date,
            hours,
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Vacation normalization
// ---------------------------------------------------------------------------

/// Index pairs `(i, j)`, `i < j`, of periods that share at least one day.
pub fn find_overlaps(periods: &[VacationPeriod]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for i in 0..periods.len() {
        for j in (i + 1)..periods.len() {
            if periods[i].overlaps(&periods[j]) {
                out.push((i, j));
            }
        }
    }
    out
}

/// Merge overlapping or day-adjacent periods into a sorted, disjoint list.
///
/// Idempotent: merging an already merged list returns it unchanged. The
/// merged period keeps the description of its earliest member that has one.
pub fn merge_overlapping(periods: &[VacationPeriod]) -> Vec<VacationPeriod> {
    let mut sorted: Vec<VacationPeriod> = periods.to_vec();
    sorted.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then(a.end_date.cmp(&b.end_date))
    });

    let mut merged: Vec<VacationPeriod> = Vec::with_capacity(sorted.len());
    for p in sorted {
        match merged.last_mut() {
            Some(last) if p.start_date <= last.end_date + Duration::days(1) => {
                if p.end_date > last.end_date {
                    last.end_date = p.end_date;
                }
                if last.description.is_none() {
                    last.description = p.description;
                }
            }
            _ => merged.push(p),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn vp(s: (u32, u32), e: (u32, u32)) -> VacationPeriod {
        VacationPeriod::new(d(s.0, s.1), d(e.0, e.1), None).unwrap()
    }

    #[test]
    fn reversed_period_is_rejected() {
        let err = VacationPeriod::new(d(7, 15), d(7, 1), None).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidDateRange { field: "vacation", .. }));
    }

    #[test]
    fn single_day_period_is_valid() {
        let p = vp((8, 1), (8, 1));
        assert_eq!(p.len_days(), 1);
        assert!(p.contains(d(8, 1)));
        assert!(!p.contains(d(8, 2)));
    }

    #[test]
    fn overlaps_are_reported_pairwise() {
        let ps = vec![vp((7, 1), (7, 10)), vp((8, 1), (8, 5)), vp((7, 10), (7, 20))];
        assert_eq!(find_overlaps(&ps), vec![(0, 2)]);
    }

    #[test]
    fn merge_joins_overlapping_and_adjacent() {
        let ps = vec![
            vp((8, 1), (8, 5)),
            vp((7, 1), (7, 10)),
            vp((7, 5), (7, 20)),
            vp((7, 21), (7, 25)),
            vp((12, 24), (12, 31)),
        ];
        let merged = merge_overlapping(&ps);
        assert_eq!(
            merged,
            vec![vp((7, 1), (7, 25)), vp((8, 1), (8, 5)), vp((12, 24), (12, 31))]
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let ps = vec![vp((7, 1), (7, 10)), vp((7, 3), (7, 4)), vp((9, 1), (9, 2))];
        let once = merge_overlapping(&ps);
        let twice = merge_overlapping(&once);
        assert_eq!(once, twice);
        assert!(find_overlaps(&once).is_empty());
    }

    #[test]
    fn merge_keeps_first_description() {
        let a = VacationPeriod::new(d(7, 1), d(7, 10), Some("verano".into())).unwrap();
        let b = VacationPeriod::new(d(7, 5), d(7, 12), Some("extra".into())).unwrap();
        let merged = merge_overlapping(&[b, a]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].description.as_deref(), Some("verano"));
        assert_eq!(merged[0].end_date, d(7, 12));
    }
}
