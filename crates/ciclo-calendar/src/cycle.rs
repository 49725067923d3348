//! Work cycle: the repeating work/rest pattern.
//!
//! # Variants
//!
//! - [`CyclePattern::Weekly`]: a Monday-indexed mask of 7 days; the
//!   position of any date is its weekday.
//! - [`CyclePattern::Parts`]: an ordered list of work/rest blocks, flattened
//!   into one repeating sequence of length `Σ(work_days + rest_days)`.
//!
//! The cycle has no start of its own; alignment comes from a
//! [`CycleAnchor`](crate::CycleAnchor).

use serde::{Deserialize, Serialize};

use crate::CalendarError;

/// Whether a cycle day is part of the work block or the rest block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    Work,
    Rest,
}

/// Upper bound on the total length of a Parts cycle, in days.
pub const MAX_CYCLE_DAYS: u32 = 366 * 10;

/// One work block followed by one rest block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePart {
    pub work_days: u32,
    pub rest_days: u32,
}

impl CyclePart {
    pub fn new(work_days: u32, rest_days: u32) -> Self {
        Self {
            work_days,
            rest_days,
        }
    }

    pub fn len(&self) -> u32 {
        self.work_days.saturating_add(self.rest_days)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A point inside a Parts cycle, 1-based as the user sees it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePosition {
    pub part_number: u32,
    pub day_within_part: u32,
    pub day_type: DayType,
}

impl CyclePosition {
    pub fn new(part_number: u32, day_within_part: u32, day_type: DayType) -> Self {
        Self {
            part_number,
            day_within_part,
            day_type,
        }
    }

    /// Day 1 / WORK of part 1.
    pub fn start() -> Self {
        Self::new(1, 1, DayType::Work)
    }
}

/// Raw cycle shape as supplied by the caller (not yet validated).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CyclePattern {
    /// `mask[0]` is Monday.
    Weekly { mask: [bool; 7] },
    Parts { parts: Vec<CyclePart> },
}

/// Validated, infinitely repeating work/rest cycle.
///
/// Parts cycles carry a precomputed slot table so position lookups and
/// metadata are O(1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkCycle {
    pattern: CyclePattern,
    /// Flattened Parts sequence; empty for Weekly.
    slots: Vec<CyclePosition>,
}

impl WorkCycle {
    pub fn new(pattern: CyclePattern) -> Result<Self, CalendarError> {
        match &pattern {
            CyclePattern::Weekly { mask } => {
                if !mask.iter().any(|w| *w) {
                    return Err(CalendarError::InvalidCycle {
                        reason: "weekly mask has no work day".to_string(),
                    });
                }
                Ok(Self {
                    pattern,
                    slots: Vec::new(),
                })
            }
            CyclePattern::Parts { parts } => {
                if parts.is_empty() {
                    return Err(CalendarError::InvalidCycle {
                        reason: "parts list is empty".to_string(),
                    });
                }
                for (i, p) in parts.iter().enumerate() {
                    if p.work_days == 0 || p.rest_days == 0 {
                        return Err(CalendarError::InvalidCycle {
                            reason: format!(
                                "part {} must have work and rest days > 0 (got {}/{})",
                                i + 1,
                                p.work_days,
                                p.rest_days
                            ),
                        });
                    }
                }
                let total = parts
                    .iter()
                    .try_fold(0u32, |acc, p| {
                        p.work_days
                            .checked_add(p.rest_days)
                            .and_then(|len| acc.checked_add(len))
                    })
                    .filter(|&total| total <= MAX_CYCLE_DAYS);
                if total.is_none() {
                    return Err(CalendarError::InvalidCycle {
                        reason: format!("cycle is longer than {MAX_CYCLE_DAYS} days"),
                    });
                }
                let slots = flatten(parts);
                Ok(Self { pattern, slots })
            }
        }
    }

    pub fn weekly(mask: [bool; 7]) -> Result<Self, CalendarError> {
        Self::new(CyclePattern::Weekly { mask })
    }

    pub fn parts(parts: Vec<CyclePart>) -> Result<Self, CalendarError> {
        Self::new(CyclePattern::Parts { parts })
    }

    pub fn pattern(&self) -> &CyclePattern {
        &self.pattern
    }

    pub fn is_weekly(&self) -> bool {
        matches!(self.pattern, CyclePattern::Weekly { .. })
    }

    /// 7 for Weekly; `Σ(work_days + rest_days)` for Parts.
    pub fn len(&self) -> u32 {
        match &self.pattern {
            CyclePattern::Weekly { .. } => 7,
            CyclePattern::Parts { .. } => self.slots.len() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reduce any (possibly negative) cycle-relative index into `0..len`.
    pub fn normalize(&self, position: i64) -> usize {
        position.rem_euclid(i64::from(self.len())) as usize
    }

    /// `true` if the cycle-relative `position` is a work day.
    pub fn is_work_day(&self, position: i64) -> bool {
        let idx = self.normalize(position);
        match &self.pattern {
            CyclePattern::Weekly { mask } => mask[idx],
            CyclePattern::Parts { .. } => self.slots[idx].day_type == DayType::Work,
        }
    }

    /// Part/day metadata for `position`; `None` for Weekly cycles.
    pub fn slot(&self, position: i64) -> Option<CyclePosition> {
        match &self.pattern {
            CyclePattern::Weekly { .. } => None,
            CyclePattern::Parts { .. } => Some(self.slots[self.normalize(position)]),
        }
    }

    /// Zero-based cycle index of a user-facing Parts position.
    ///
    /// Fails with `InvalidOffset` when the part does not exist, the day is
    /// outside `1..=work_days+rest_days`, or the day type disagrees with the
    /// day's block. Weekly cycles have no explicit positions.
    pub fn index_of(&self, pos: &CyclePosition) -> Result<u32, CalendarError> {
        let parts = match &self.pattern {
            CyclePattern::Parts { parts } => parts,
            CyclePattern::Weekly { .. } => {
                return Err(CalendarError::InvalidOffset {
                    reason: "weekly cycles derive their position from the weekday".to_string(),
                })
            }
        };

        let part_idx = pos.part_number.checked_sub(1).map(|i| i as usize);
        let part = match part_idx.and_then(|i| parts.get(i)) {
            Some(p) => p,
            None => {
                return Err(CalendarError::InvalidOffset {
                    reason: format!(
                        "part {} does not exist (cycle has {} parts)",
                        pos.part_number,
                        parts.len()
                    ),
                })
            }
        };

        if pos.day_within_part < 1 || pos.day_within_part > part.len() {
            return Err(CalendarError::InvalidOffset {
                reason: format!(
                    "day {} outside part {} range 1..={}",
                    pos.day_within_part,
                    pos.part_number,
                    part.len()
                ),
            });
        }

        let expected = if pos.day_within_part <= part.work_days {
            DayType::Work
        } else {
            DayType::Rest
        };
        if expected != pos.day_type {
            return Err(CalendarError::InvalidOffset {
                reason: format!(
                    "day {} of part {} is {:?}, not {:?}",
                    pos.day_within_part, pos.part_number, expected, pos.day_type
                ),
            });
        }

        let before: u32 = parts
            .iter()
            .take(pos.part_number as usize - 1)
            .map(CyclePart::len)
            .sum();
        Ok(before + pos.day_within_part - 1)
    }
}

fn flatten(parts: &[CyclePart]) -> Vec<CyclePosition> {
    let mut slots = Vec::with_capacity(parts.iter().map(|p| p.len() as usize).sum());
    for (i, part) in parts.iter().enumerate() {
        let part_number = i as u32 + 1;
        for day in 1..=part.len() {
            let day_type = if day <= part.work_days {
                DayType::Work
            } else {
                DayType::Rest
            };
            slots.push(CyclePosition::new(part_number, day, day_type));
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    const MON_FRI: [bool; 7] = [true, true, true, true, true, false, false];

    #[test]
    fn all_rest_weekly_mask_is_rejected() {
        let err = WorkCycle::weekly([false; 7]).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidCycle { .. }));
    }

    #[test]
    fn empty_or_zero_parts_are_rejected() {
        assert!(WorkCycle::parts(vec![]).is_err());
        assert!(WorkCycle::parts(vec![CyclePart::new(0, 2)]).is_err());
        assert!(WorkCycle::parts(vec![CyclePart::new(4, 2), CyclePart::new(3, 0)]).is_err());
    }

    #[test]
    fn oversized_parts_are_rejected() {
        let err = WorkCycle::parts(vec![CyclePart::new(u32::MAX, 1)]).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidCycle { .. }));

        let err = WorkCycle::parts(vec![CyclePart::new(u32::MAX / 2, 1); 3]).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidCycle { .. }));

        let err = WorkCycle::parts(vec![CyclePart::new(MAX_CYCLE_DAYS, 1)]).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidCycle { .. }));

        let cycle = WorkCycle::parts(vec![CyclePart::new(MAX_CYCLE_DAYS - 1, 1)]).unwrap();
        assert_eq!(cycle.len(), MAX_CYCLE_DAYS);
        assert_eq!(CyclePart::new(u32::MAX, 1).len(), u32::MAX);
    }

    #[test]
    fn weekly_position_reduces_mod_seven() {
        let c = WorkCycle::weekly(MON_FRI).unwrap();
        assert_eq!(c.len(), 7);
        assert!(c.is_work_day(0));
        assert!(!c.is_work_day(5));
        assert!(c.is_work_day(7));
        assert!(!c.is_work_day(-1)); // Sunday
        assert!(c.slot(0).is_none());
    }

    #[test]
    fn parts_flatten_in_order() {
        let c = WorkCycle::parts(vec![CyclePart::new(2, 1), CyclePart::new(1, 2)]).unwrap();
        assert_eq!(c.len(), 6);
        let types: Vec<bool> = (0..6).map(|p| c.is_work_day(p)).collect();
        assert_eq!(types, vec![true, true, false, true, false, false]);

        assert_eq!(c.slot(3), Some(CyclePosition::new(2, 1, DayType::Work)));
        assert_eq!(c.slot(5), Some(CyclePosition::new(2, 3, DayType::Rest)));
        assert_eq!(c.slot(6), Some(CyclePosition::start()));
        assert_eq!(c.slot(-1), Some(CyclePosition::new(2, 3, DayType::Rest)));
    }

    #[test]
    fn index_of_validates_range_and_type() {
        let c = WorkCycle::parts(vec![CyclePart::new(4, 2), CyclePart::new(3, 3)]).unwrap();

        assert_eq!(c.index_of(&CyclePosition::start()), Ok(0));
        assert_eq!(c.index_of(&CyclePosition::new(1, 6, DayType::Rest)), Ok(5));
        assert_eq!(c.index_of(&CyclePosition::new(2, 2, DayType::Work)), Ok(7));

        // day type mismatch
        assert!(matches!(
            c.index_of(&CyclePosition::new(1, 5, DayType::Work)),
            Err(CalendarError::InvalidOffset { .. })
        ));
        // day beyond part length
        assert!(c.index_of(&CyclePosition::new(1, 7, DayType::Rest)).is_err());
        // day zero
        assert!(c.index_of(&CyclePosition::new(1, 0, DayType::Work)).is_err());
        // missing part
        assert!(c.index_of(&CyclePosition::new(3, 1, DayType::Work)).is_err());
        assert!(c.index_of(&CyclePosition::new(0, 1, DayType::Work)).is_err());
    }

    #[test]
    fn weekly_has_no_explicit_index() {
        let c = WorkCycle::weekly(MON_FRI).unwrap();
        assert!(c.index_of(&CyclePosition::start()).is_err());
    }

    #[test]
    fn pattern_deserializes_from_tagged_json() {
        let p: CyclePattern = serde_json::from_str(
            r#"{"mode":"parts","parts":[{"workDays":4,"restDays":2}]}"#,
        )
        .unwrap();
        assert_eq!(
            p,
            CyclePattern::Parts {
                parts: vec![CyclePart::new(4, 2)]
            }
        );
    }
}
