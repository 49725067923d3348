//! Validated engine configuration.
//!
//! [`CalendarInput`] is the raw record assembled by the caller (wizard,
//! config file). [`CalendarConfig::new`] runs every validation once and
//! produces an immutable record the resolver can trust. Nothing downstream
//! of construction can fail.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    CalendarError, ContractStart, CycleAnchor, DayClass, ExtraShift, Guardia, Holiday, Hours,
    VacationPeriod, WorkCycle, Year,
};

/// Hours credited for a worked day, by day class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursConfig {
    pub weekday: Hours,
    pub saturday: Hours,
    pub sunday: Hours,
    pub holiday: Hours,
}

impl WorkingHoursConfig {
    pub fn uniform(h: Hours) -> Self {
        Self {
            weekday: h,
            saturday: h,
            sunday: h,
            holiday: h,
        }
    }

    /// Each field independently within `0..=24`.
    pub fn validate(&self) -> Result<(), CalendarError> {
        let bounds = (Hours::ZERO, Some(Hours::FULL_DAY));
        Hours::checked("working_hours.weekday", self.weekday, bounds.0, bounds.1)?;
        Hours::checked("working_hours.saturday", self.saturday, bounds.0, bounds.1)?;
        Hours::checked("working_hours.sunday", self.sunday, bounds.0, bounds.1)?;
        Hours::checked("working_hours.holiday", self.holiday, bounds.0, bounds.1)?;
        Ok(())
    }

    /// Rate for a regular work day on `date` (holidays use `holiday`).
    pub fn rate_for(&self, date: NaiveDate) -> Hours {
        match DayClass::of(date) {
            DayClass::Weekday => self.weekday,
            DayClass::Saturday => self.saturday,
            DayClass::Sunday => self.sunday,
        }
    }
}

/// Unvalidated engine input. Year and cycle are already value objects.
#[derive(Clone, Debug)]
pub struct CalendarInput {
    pub year: Year,
    pub work_cycle: WorkCycle,
    pub contract_start: ContractStart,
    pub working_hours: WorkingHoursConfig,
    pub annual_contract_hours: Hours,
    pub holidays: Vec<Holiday>,
    pub vacations: Vec<VacationPeriod>,
    pub guardias: Vec<Guardia>,
    pub extra_shifts: Vec<ExtraShift>,
}

impl CalendarInput {
    /// Input with no overrides and zero contract hours.
    pub fn new(
        year: Year,
        work_cycle: WorkCycle,
        contract_start: ContractStart,
        working_hours: WorkingHoursConfig,
    ) -> Self {
        Self {
            year,
            work_cycle,
            contract_start,
            working_hours,
            annual_contract_hours: Hours::ZERO,
            holidays: Vec::new(),
            vacations: Vec::new(),
            guardias: Vec::new(),
            extra_shifts: Vec::new(),
        }
    }
}

/// Validated, immutable engine configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarConfig {
    year: Year,
    cycle: WorkCycle,
    contract_start: ContractStart,
    anchor: CycleAnchor,
    working_hours: WorkingHoursConfig,
    annual_contract_hours: Hours,
    holidays: BTreeMap<NaiveDate, Holiday>,
    vacations: Vec<VacationPeriod>,
    guardias: BTreeMap<NaiveDate, Guardia>,
    extra_shifts: Vec<ExtraShift>,
    /// Extra-shift hours summed per date.
    extra_hours: BTreeMap<NaiveDate, Hours>,
}

impl CalendarConfig {
    /// Validation order: hours, contract start / anchor, holidays,
    /// vacations, guardias, extra shifts. First failure wins.
    pub fn new(input: CalendarInput) -> Result<Self, CalendarError> {
        let CalendarInput {
            year,
            work_cycle: cycle,
            contract_start,
            working_hours,
            annual_contract_hours,
            holidays: holiday_list,
            vacations,
            guardias: guardia_list,
            extra_shifts,
        } = input;

        working_hours.validate()?;
        Hours::checked(
            "annual_contract_hours",
            annual_contract_hours,
            Hours::ZERO,
            None,
        )?;

        let anchor = CycleAnchor::resolve(&cycle, &contract_start, &year)?;

        let mut holidays = BTreeMap::new();
        for h in holiday_list {
            check_in_year(&year, "holiday", h.date, h.date)?;
            if holidays.contains_key(&h.date) {
                return Err(CalendarError::DuplicateDate {
                    field: "holiday",
                    date: h.date,
                });
            }
            holidays.insert(h.date, h);
        }

        for v in &vacations {
            v.check_order()?;
            check_in_year(&year, "vacation", v.start_date, v.end_date)?;
        }

        let mut guardias = BTreeMap::new();
        for g in guardia_list {
            check_in_year(&year, "guardia", g.date, g.date)?;
            Hours::checked("guardia.hours", g.hours, Hours::ZERO, Some(Hours::FULL_DAY))?;
            if guardias.contains_key(&g.date) {
                return Err(CalendarError::DuplicateDate {
                    field: "guardia",
                    date: g.date,
                });
            }
            let on_work_day = cycle.is_work_day(anchor.position(g.date));
            if contract_start.is_before_start(g.date) || on_work_day {
                return Err(CalendarError::InvalidGuardiaPlacement { date: g.date });
            }
            guardias.insert(g.date, g);
        }

        let mut extra_hours: BTreeMap<NaiveDate, Hours> = BTreeMap::new();
        for e in &extra_shifts {
            check_in_year(&year, "extra_shift", e.date, e.date)?;
            if let Some(start) = contract_start.start_date().filter(|&s| e.date < s) {
                return Err(CalendarError::InvalidDateRange {
                    field: "extra_shift",
                    start: e.date,
                    end: start,
                });
            }
            let h = Hours::checked("extra_shift.hours", e.hours, Hours::ZERO, Some(Hours::FULL_DAY))?;
            if h.is_zero() {
                return Err(CalendarError::InvalidHours {
                    field: "extra_shift.hours",
                    value: 0.0,
                });
            }
            *extra_hours.entry(e.date).or_default() += h;
        }

        Ok(Self {
            year,
            cycle,
            contract_start,
            anchor,
            working_hours,
            annual_contract_hours,
            holidays,
            vacations,
            guardias,
            extra_shifts,
            extra_hours,
        })
    }

    pub fn year(&self) -> &Year {
        &self.year
    }

    pub fn cycle(&self) -> &WorkCycle {
        &self.cycle
    }

    pub fn contract_start(&self) -> &ContractStart {
        &self.contract_start
    }

    pub fn anchor(&self) -> &CycleAnchor {
        &self.anchor
    }

    pub fn working_hours(&self) -> &WorkingHoursConfig {
        &self.working_hours
    }

    pub fn annual_contract_hours(&self) -> Hours {
        self.annual_contract_hours
    }

    pub fn holidays(&self) -> impl Iterator<Item = &Holiday> {
        self.holidays.values()
    }

    pub fn vacations(&self) -> &[VacationPeriod] {
        &self.vacations
    }

    pub fn guardias(&self) -> impl Iterator<Item = &Guardia> {
        self.guardias.values()
    }

    pub fn extra_shifts(&self) -> &[ExtraShift] {
        &self.extra_shifts
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.get(&date)
    }

    pub fn guardia_on(&self, date: NaiveDate) -> Option<&Guardia> {
        self.guardias.get(&date)
    }

    pub fn is_vacation(&self, date: NaiveDate) -> bool {
        self.vacations.iter().any(|v| v.contains(date))
    }

    /// Total extra-shift hours recorded for `date`.
    pub fn extra_hours_on(&self, date: NaiveDate) -> Hours {
        self.extra_hours.get(&date).copied().unwrap_or(Hours::ZERO)
    }

    /// Unreduced cycle position of `date`.
    pub fn position(&self, date: NaiveDate) -> i64 {
        self.anchor.position(date)
    }

    /// What the cycle alone says about `date`, ignoring every override.
    pub fn cycle_says_work(&self, date: NaiveDate) -> bool {
        self.cycle.is_work_day(self.position(date))
    }
}

fn check_in_year(
    year: &Year,
    field: &'static str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), CalendarError> {
    if year.contains(start) && year.contains(end) {
        Ok(())
    } else {
        Err(CalendarError::InvalidDateRange { field, start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CyclePart, CyclePosition, DayType};

    const MON_FRI: [bool; 7] = [true, true, true, true, true, false, false];

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn weekly_input() -> CalendarInput {
        CalendarInput::new(
            Year::new(2024, 2024).unwrap(),
            WorkCycle::weekly(MON_FRI).unwrap(),
            ContractStart::WorkedBefore { anchor: None },
            WorkingHoursConfig::uniform(Hours::from_whole(8)),
        )
    }

    #[test]
    fn rate_for_follows_day_class() {
        let wh = WorkingHoursConfig {
            weekday: Hours::from_whole(8),
            saturday: Hours::from_whole(6),
            sunday: Hours::from_whole(5),
            holiday: Hours::from_whole(10),
        };
        assert_eq!(wh.rate_for(d(7, 5)), Hours::from_whole(8)); // Fri
        assert_eq!(wh.rate_for(d(7, 6)), Hours::from_whole(6)); // Sat
        assert_eq!(wh.rate_for(d(7, 7)), Hours::from_whole(5)); // Sun
    }

    #[test]
    fn working_hours_over_24_rejected() {
        let mut input = weekly_input();
        input.working_hours.saturday = Hours::from_whole(25);
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidHours { field: "working_hours.saturday", .. })
        ));
    }

    #[test]
    fn duplicate_holiday_rejected() {
        let mut input = weekly_input();
        input.holidays = vec![
            Holiday::new(d(12, 25), Some("Navidad".into())),
            Holiday::new(d(12, 25), None),
        ];
        assert_eq!(
            CalendarConfig::new(input).unwrap_err(),
            CalendarError::DuplicateDate {
                field: "holiday",
                date: d(12, 25)
            }
        );
    }

    #[test]
    fn holiday_outside_year_rejected() {
        let mut input = weekly_input();
        input.holidays = vec![Holiday::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            None,
        )];
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidDateRange { field: "holiday", .. })
        ));
    }

    #[test]
    fn vacation_spanning_new_year_rejected() {
        let mut input = weekly_input();
        input.vacations = vec![VacationPeriod {
            start_date: d(12, 28),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            description: None,
        }];
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidDateRange { field: "vacation", .. })
        ));
    }

    #[test]
    fn reversed_vacation_rejected_even_when_built_by_hand() {
        let mut input = weekly_input();
        input.vacations = vec![VacationPeriod {
            start_date: d(7, 15),
            end_date: d(7, 1),
            description: None,
        }];
        assert!(CalendarConfig::new(input).is_err());
    }

    #[test]
    fn guardia_on_work_day_rejected() {
        let mut input = weekly_input();
        input.guardias = vec![Guardia::new(d(7, 8), Hours::from_whole(12), "")];
        assert_eq!(
            CalendarConfig::new(input).unwrap_err(),
            CalendarError::InvalidGuardiaPlacement { date: d(7, 8) }
        );
    }

    #[test]
    fn guardia_on_worked_holiday_rejected() {
        let mut input = weekly_input();
        // Monday holiday: the cycle says work, so it resolves FestivoTrabajado.
        input.holidays = vec![Holiday::new(d(4, 1), None)];
        input.guardias = vec![Guardia::new(d(4, 1), Hours::from_whole(12), "")];
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidGuardiaPlacement { .. })
        ));
    }

    #[test]
    fn guardia_before_contract_start_rejected() {
        let mut input = weekly_input();
        input.contract_start = ContractStart::StartedThisYear { date: d(9, 1) };
        input.guardias = vec![Guardia::new(d(7, 6), Hours::from_whole(12), "")];
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidGuardiaPlacement { .. })
        ));
    }

    #[test]
    fn duplicate_guardia_rejected() {
        let mut input = weekly_input();
        input.guardias = vec![
            Guardia::new(d(7, 6), Hours::from_whole(12), "a"),
            Guardia::new(d(7, 6), Hours::from_whole(4), "b"),
        ];
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::DuplicateDate { field: "guardia", .. })
        ));
    }

    #[test]
    fn guardia_hours_bounded() {
        let mut input = weekly_input();
        input.guardias = vec![Guardia::new(d(7, 6), Hours::from_whole(25), "")];
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidHours { field: "guardia.hours", .. })
        ));
    }

    #[test]
    fn extra_shift_needs_positive_hours_and_sums_per_date() {
        let mut input = weekly_input();
        input.extra_shifts = vec![ExtraShift::new(d(3, 4), Hours::ZERO, "")];
        assert!(CalendarConfig::new(input).is_err());

        let mut input = weekly_input();
        input.extra_shifts = vec![
            ExtraShift::new(d(3, 4), Hours::from_whole(2), "a"),
            ExtraShift::new(d(3, 4), Hours::from_centi(150), "b"),
        ];
        let cfg = CalendarConfig::new(input).unwrap();
        assert_eq!(cfg.extra_hours_on(d(3, 4)), Hours::from_centi(350));
        assert_eq!(cfg.extra_hours_on(d(3, 5)), Hours::ZERO);
    }

    #[test]
    fn extra_shift_before_contract_start_rejected() {
        let mut input = weekly_input();
        input.contract_start = ContractStart::StartedThisYear { date: d(3, 1) };
        input.extra_shifts = vec![ExtraShift::new(d(2, 1), Hours::from_whole(3), "")];
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidDateRange { field: "extra_shift", .. })
        ));

        let mut input = weekly_input();
        input.contract_start = ContractStart::StartedThisYear { date: d(3, 1) };
        input.extra_shifts = vec![ExtraShift::new(d(3, 1), Hours::from_whole(3), "")];
        let cfg = CalendarConfig::new(input).unwrap();
        assert_eq!(cfg.extra_hours_on(d(3, 1)), Hours::from_whole(3));
    }

    #[test]
    fn negative_contract_hours_rejected() {
        let mut input = weekly_input();
        input.annual_contract_hours = Hours::from_centi(-100);
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidHours { field: "annual_contract_hours", .. })
        ));
    }

    #[test]
    fn parts_anchor_mismatch_surfaces_as_invalid_offset() {
        let mut input = weekly_input();
        input.work_cycle = WorkCycle::parts(vec![CyclePart::new(4, 2)]).unwrap();
        input.contract_start = ContractStart::WorkedBefore {
            anchor: Some(CyclePosition::new(1, 6, DayType::Work)),
        };
        assert!(matches!(
            CalendarConfig::new(input),
            Err(CalendarError::InvalidOffset { .. })
        ));
    }
}
