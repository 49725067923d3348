//! Fixed-point hour type.
//!
//! Worked hours are stored as centi-hours (1/100 h) in an `i64`, so sums
//! over a whole year are exact and repeated generations compare equal.
//! Input values are normalized to 2 decimal places on construction.
//!
//! Serialized as a plain JSON/YAML number of hours (`7.5`, `12`).

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

use crate::CalendarError;

/// 1 hour = 100 centi-hours.
pub const CENTI_SCALE: i64 = 100;

/// An amount of hours at 1/100 h scale.
///
/// There is no `From<i64>`; use [`Hours::from_centi`] when the raw integer
/// is known to be centi-hours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Hours(i64);

impl Hours {
    pub const ZERO: Hours = Hours(0);

    /// Upper bound for any per-day hour value.
    pub const FULL_DAY: Hours = Hours(24 * CENTI_SCALE);

    #[inline]
    pub const fn from_centi(raw: i64) -> Self {
        Hours(raw)
    }

    /// Whole hours, exact.
    #[inline]
    pub const fn from_whole(h: i64) -> Self {
        Hours(h * CENTI_SCALE)
    }

    /// Normalize a decimal hour value to 2 places (half away from zero).
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_decimal(h: f64) -> Option<Self> {
        if !h.is_finite() {
            return None;
        }
        let scaled = (h * CENTI_SCALE as f64).round();
        if scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Hours(scaled as i64))
    }

    #[inline]
    pub const fn centi(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / CENTI_SCALE as f64
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Bound-check an input value: `min <= h <= max`.
    pub(crate) fn checked(
        field: &'static str,
        h: Hours,
        min: Hours,
        max: Option<Hours>,
    ) -> Result<Hours, CalendarError> {
        let in_range = h >= min && max.map_or(true, |m| h <= m);
        if in_range {
            Ok(h)
        } else {
            Err(CalendarError::InvalidHours {
                field,
                value: h.as_f64(),
            })
        }
    }
}

impl TryFrom<f64> for Hours {
    type Error = CalendarError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Hours::from_decimal(value).ok_or(CalendarError::InvalidHours {
            field: "hours",
            value,
        })
    }
}

impl From<Hours> for f64 {
    fn from(h: Hours) -> f64 {
        h.as_f64()
    }
}

impl Add for Hours {
    type Output = Hours;
    fn add(self, rhs: Hours) -> Hours {
        Hours(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, rhs: Hours) {
        self.0 += rhs.0;
    }
}

impl Sub for Hours {
    type Output = Hours;
    fn sub(self, rhs: Hours) -> Hours {
        Hours(self.0 - rhs.0)
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Hours>>(iter: I) -> Hours {
        iter.fold(Hours::ZERO, |acc, h| acc + h)
    }
}

impl<'a> Sum<&'a Hours> for Hours {
    fn sum<I: Iterator<Item = &'a Hours>>(iter: I) -> Hours {
        iter.copied().sum()
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = CENTI_SCALE as u64;
        write!(f, "{}{}.{:02}", sign, abs / scale, abs % scale)
    }
}
