//! Cycle anchor: where a reference date sits inside the cycle.
//!
//! `position(date) = (anchor_index + days_between(anchor_date, date)) mod len`
//!
//! Weekly cycles need no stored anchor: the position of a date is its
//! Monday-based weekday. Parts cycles are anchored either on January 1st
//! (worked before this year, explicit position) or on the contract start
//! date (started this year, pinned to day 1/WORK of part 1).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{CalendarError, CyclePosition, WorkCycle, Year};

/// How the employment relates to the target year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContractStart {
    /// Contract begins on `date`; earlier days are not contracted.
    StartedThisYear { date: NaiveDate },
    /// Already working on January 1st. Parts cycles must say where
    /// January 1st falls; Weekly cycles must not.
    WorkedBefore {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anchor: Option<CyclePosition>,
    },
}

impl ContractStart {
    /// First contracted day, if the contract starts inside the year.
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            ContractStart::StartedThisYear { date } => Some(*date),
            ContractStart::WorkedBefore { .. } => None,
        }
    }

    /// `true` for dates before the contract start.
    pub fn is_before_start(&self, date: NaiveDate) -> bool {
        self.start_date().is_some_and(|start| date < start)
    }
}

/// Resolved alignment between calendar dates and cycle positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CycleAnchor {
    /// Position is the ISO weekday (Monday = 0).
    Weekday,
    /// `date` sits at zero-based cycle `index`.
    Fixed { date: NaiveDate, index: u32 },
}

impl CycleAnchor {
    /// Derive the anchor for `cycle` in `year` from the contract start.
    pub fn resolve(
        cycle: &WorkCycle,
        contract_start: &ContractStart,
        year: &Year,
    ) -> Result<Self, CalendarError> {
        if let ContractStart::StartedThisYear { date } = contract_start {
            if !year.contains(*date) {
                return Err(CalendarError::InvalidDateRange {
                    field: "contract_start",
                    start: *date,
                    end: *date,
                });
            }
        }

        if cycle.is_weekly() {
            return match contract_start {
                ContractStart::WorkedBefore { anchor: Some(_) } => {
                    Err(CalendarError::InvalidOffset {
                        reason: "weekly cycles derive their position from the weekday".to_string(),
                    })
                }
                _ => Ok(CycleAnchor::Weekday),
            };
        }

        match contract_start {
            ContractStart::StartedThisYear { date } => Ok(CycleAnchor::Fixed {
                date: *date,
                index: cycle.index_of(&CyclePosition::start())?,
            }),
            ContractStart::WorkedBefore { anchor: Some(pos) } => Ok(CycleAnchor::Fixed {
                date: year.first_day(),
                index: cycle.index_of(pos)?,
            }),
            ContractStart::WorkedBefore { anchor: None } => Err(CalendarError::InvalidOffset {
                reason: "parts cycle worked before this year requires an explicit anchor"
                    .to_string(),
            }),
        }
    }

    /// Absolute (unreduced) cycle position of `date`. May be negative for
    /// dates before a fixed anchor; [`WorkCycle`] reduces it.
    pub fn position(&self, date: NaiveDate) -> i64 {
        match self {
            CycleAnchor::Weekday => i64::from(date.weekday().num_days_from_monday()),
            CycleAnchor::Fixed { date: anchor, index } => {
                i64::from(*index) + (date - *anchor).num_days()
            }
        }
    }
}
