//! Error types for the ciclo-calendar crate.
//!
//! Every variant is raised while building a value object or the validated
//! [`CalendarConfig`](crate::CalendarConfig). The resolver, generator and
//! aggregator never fail.

use chrono::NaiveDate;

/// Validation error for calendar inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Malformed work cycle (all-rest weekly mask, empty or zero-length part).
    #[error("invalid cycle: {reason}")]
    InvalidCycle {
        /// What is wrong with the cycle.
        reason: String,
    },

    /// Cycle anchor outside the declared part, or day-type mismatch.
    #[error("invalid cycle offset: {reason}")]
    InvalidOffset {
        /// What is wrong with the anchor.
        reason: String,
    },

    /// Date range reversed, a date outside the target year, or an extra shift
    /// dated before the contract start.
    #[error("invalid date range for {field}: {start}..{end}")]
    InvalidDateRange {
        /// Which input carried the range.
        field: &'static str,
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range (inclusive).
        end: NaiveDate,
    },

    /// Guardia recorded on a date whose base state is a work day.
    #[error("guardia on {date} falls on a work day or before the contract start")]
    InvalidGuardiaPlacement {
        /// Date of the rejected guardia.
        date: NaiveDate,
    },

    /// Two entries for the same date where uniqueness is required.
    #[error("duplicate {field} entry for {date}")]
    DuplicateDate {
        /// Which input collection has the duplicate.
        field: &'static str,
        /// The repeated date.
        date: NaiveDate,
    },

    /// Year outside the accepted window around the reference year.
    #[error("year {year} outside window {min}..={max}")]
    InvalidYear {
        /// Requested year.
        year: i32,
        /// Earliest accepted year.
        min: i32,
        /// Latest accepted year.
        max: i32,
    },

    /// Hour value non-finite or outside its allowed bounds.
    #[error("invalid hours for {field}: {value}")]
    InvalidHours {
        /// Which input carried the value.
        field: &'static str,
        /// The rejected value, in hours.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn error_invalid_cycle() {
        let e = CalendarError::InvalidCycle {
            reason: "weekly mask has no work day".into(),
        };
        assert_eq!(e.to_string(), "invalid cycle: weekly mask has no work day");
    }

    #[test]
    fn error_invalid_date_range() {
        let e = CalendarError::InvalidDateRange {
            field: "vacation",
            start: d(2024, 7, 15),
            end: d(2024, 7, 1),
        };
        assert_eq!(
            e.to_string(),
            "invalid date range for vacation: 2024-07-15..2024-07-01"
        );
    }

    #[test]
    fn error_duplicate_date() {
        let e = CalendarError::DuplicateDate {
            field: "holiday",
            date: d(2024, 12, 25),
        };
        assert_eq!(e.to_string(), "duplicate holiday entry for 2024-12-25");
    }

    #[test]
    fn error_invalid_year() {
        let e = CalendarError::InvalidYear {
            year: 2040,
            min: 2022,
            max: 2029,
        };
        assert_eq!(e.to_string(), "year 2040 outside window 2022..=2029");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
