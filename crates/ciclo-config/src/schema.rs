//! On-disk calendar configuration record.
//!
//! Mirrors the engine input field by field with camelCase keys and ISO-8601
//! dates. Deserializing only checks shapes; every domain rule is enforced by
//! [`CalendarConfig::new`] when the record is turned into a config.

use anyhow::{Context, Result};
use ciclo_calendar::{
    CalendarConfig, CalendarError, CalendarInput, ContractStart, CyclePattern, ExtraShift, Guardia,
    Holiday, Hours, VacationPeriod, WorkCycle, WorkingHoursConfig, Year,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFile {
    pub year: i32,
    pub work_cycle: CyclePattern,
    pub contract_start: ContractStart,
    pub working_hours: WorkingHoursConfig,
    #[serde(default)]
    pub annual_contract_hours: Hours,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub vacations: Vec<VacationPeriod>,
    #[serde(default)]
    pub guardias: Vec<Guardia>,
    #[serde(default)]
    pub extra_shifts: Vec<ExtraShift>,
}

impl CalendarFile {
    /// Decode a merged config tree.
    pub fn from_json(config_json: &Value) -> Result<Self> {
        serde_json::from_value(config_json.clone())
            .context("CONFIG_SCHEMA_INVALID: config does not match the calendar schema")
    }

    /// Raw engine input. Only the year window and cycle shape are checked
    /// here.
    pub fn into_input(self, reference_year: i32) -> Result<CalendarInput, CalendarError> {
        let year = Year::new(self.year, reference_year)?;
        let work_cycle = WorkCycle::new(self.work_cycle)?;
        Ok(CalendarInput {
            year,
            work_cycle,
            contract_start: self.contract_start,
            working_hours: self.working_hours,
            annual_contract_hours: self.annual_contract_hours,
            holidays: self.holidays,
            vacations: self.vacations,
            guardias: self.guardias,
            extra_shifts: self.extra_shifts,
        })
    }

    /// Fully validated engine configuration.
    pub fn into_config(self, reference_year: i32) -> Result<CalendarConfig, CalendarError> {
        CalendarConfig::new(self.into_input(reference_year)?)
    }
}
