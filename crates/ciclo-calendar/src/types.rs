use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{CyclePosition, Hours};

/// Resolved state of one calendar day.
///
/// Declaration order is the reporting order used by the statistics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EstadoDia {
    Trabajo,
    Descanso,
    Vacaciones,
    Guardia,
    Festivo,
    FestivoTrabajado,
    NoContratado,
}

impl EstadoDia {
    pub const ALL: [EstadoDia; 7] = [
        EstadoDia::Trabajo,
        EstadoDia::Descanso,
        EstadoDia::Vacaciones,
        EstadoDia::Guardia,
        EstadoDia::Festivo,
        EstadoDia::FestivoTrabajado,
        EstadoDia::NoContratado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoDia::Trabajo => "TRABAJO",
            EstadoDia::Descanso => "DESCANSO",
            EstadoDia::Vacaciones => "VACACIONES",
            EstadoDia::Guardia => "GUARDIA",
            EstadoDia::Festivo => "FESTIVO",
            EstadoDia::FestivoTrabajado => "FESTIVO_TRABAJADO",
            EstadoDia::NoContratado => "NO_CONTRATADO",
        }
    }

    /// States that count as a worked day on their own.
    pub fn is_worked(&self) -> bool {
        matches!(
            self,
            EstadoDia::Trabajo | EstadoDia::Guardia | EstadoDia::FestivoTrabajado
        )
    }
}

/// One derived day of the calendar. Recomputed on every generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Monday = 0 … Sunday = 6.
    pub weekday_index: u8,
    pub state: EstadoDia,
    /// Base hours for the state plus any extra-shift hours.
    pub hours_worked: Hours,
    /// Extra-shift part of `hours_worked`.
    #[serde(default, skip_serializing_if = "Hours::is_zero")]
    pub extra_hours: Hours,
    /// Parts cycles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_metadata: Option<CyclePosition>,
}

impl CalendarDay {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn has_extra_shift(&self) -> bool {
        !self.extra_hours.is_zero()
    }

    /// Worked by state, or carrying extra-shift hours.
    pub fn is_worked(&self) -> bool {
        self.state.is_worked() || self.has_extra_shift()
    }
}

/// Hour-rate class of a date.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DayClass {
    Weekday,
    Saturday,
    Sunday,
}

impl DayClass {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => DayClass::Saturday,
            Weekday::Sun => DayClass::Sunday,
            _ => DayClass::Weekday,
        }
    }
}
