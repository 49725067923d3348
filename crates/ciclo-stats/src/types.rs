use std::io;
use std::path::{Path, PathBuf};

use chrono::Weekday;
use ciclo_calendar::{CalendarDay, EstadoDia, Hours};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Balance thresholds
// ---------------------------------------------------------------------------

/// Compliance percentage at or above which the balance is `excelente`.
pub const UMBRAL_EXCELENTE: i64 = 100;
/// Compliance percentage at or above which the balance is `ok`.
pub const UMBRAL_OK: i64 = 95;
/// Compliance percentage at or above which the balance is `advertencia`.
pub const UMBRAL_ADVERTENCIA: i64 = 90;

/// Categorical hour-balance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoBalance {
    Excelente,
    Ok,
    Advertencia,
    Deficit,
}

impl EstadoBalance {
    /// Classify an unrounded compliance percentage.
    pub fn from_cumplimiento(porcentaje: f64) -> Self {
        Self::classify(|umbral| porcentaje >= umbral as f64)
    }

    /// Classify worked against contract hours with exact centi-hour
    /// arithmetic. A zero contract counts as fully met.
    pub fn from_hours(trabajadas: Hours, convenio: Hours) -> Self {
        if convenio.is_zero() {
            return EstadoBalance::Excelente;
        }
        let worked = i128::from(trabajadas.centi()) * 100;
        let contract = i128::from(convenio.centi());
        Self::classify(|umbral| worked >= contract * i128::from(umbral))
    }

    fn classify(reaches: impl Fn(i64) -> bool) -> Self {
        if reaches(UMBRAL_EXCELENTE) {
            EstadoBalance::Excelente
        } else if reaches(UMBRAL_OK) {
            EstadoBalance::Ok
        } else if reaches(UMBRAL_ADVERTENCIA) {
            EstadoBalance::Advertencia
        } else {
            EstadoBalance::Deficit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoBalance::Excelente => "excelente",
            EstadoBalance::Ok => "ok",
            EstadoBalance::Advertencia => "advertencia",
            EstadoBalance::Deficit => "deficit",
        }
    }
}

// ---------------------------------------------------------------------------
// Breakdowns
// ---------------------------------------------------------------------------

/// Day count for one [`EstadoDia`].
///
/// `porcentaje` is over `diasEfectivos`, except for `NoContratado` which is
/// over the total days of the year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConteoEstado {
    pub estado: EstadoDia,
    pub dias: u32,
    pub porcentaje: f64,
}

/// Worked days and hours for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistribucionSemanal {
    pub dia: Weekday,
    pub dias_trabajados: u32,
    /// Share of all worked days in the year.
    pub porcentaje: f64,
    pub horas: Hours,
}

/// Worked hours and days for one calendar month (1..=12).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumenMensual {
    pub mes: u32,
    pub horas: Hours,
    pub dias_trabajados: u32,
}

/// Worked hours against the annual contract hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceHoras {
    pub horas_trabajadas: Hours,
    pub horas_convenio: Hours,
    /// `horas_trabajadas - horas_convenio`; negative when short.
    pub saldo: Hours,
    pub porcentaje_cumplimiento: f64,
    pub estado: EstadoBalance,
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Year-level statistics over a generated calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadisticasDias {
    pub dias_totales: u32,
    /// Total days minus `NoContratado` days.
    pub dias_efectivos: u32,
    /// One entry per state, in [`EstadoDia::ALL`] order.
    pub por_estado: Vec<ConteoEstado>,
    /// Monday first.
    pub por_dia_semana: Vec<DistribucionSemanal>,
    pub dia_mas_trabajado: Option<Weekday>,
    pub dia_menos_trabajado: Option<Weekday>,
    /// January first.
    pub mensual: Vec<ResumenMensual>,
    pub balance: BalanceHoras,
}

impl EstadisticasDias {
    /// Day count for one state.
    pub fn dias(&self, estado: EstadoDia) -> u32 {
        self.por_estado
            .iter()
            .find(|c| c.estado == estado)
            .map_or(0, |c| c.dias)
    }

    pub fn porcentaje(&self, estado: EstadoDia) -> f64 {
        self.por_estado
            .iter()
            .find(|c| c.estado == estado)
            .map_or(0.0, |c| c.porcentaje)
    }

    /// Worked days across the year (state-worked or carrying extra hours).
    pub fn dias_trabajados(&self) -> u32 {
        self.mensual.iter().map(|m| m.dias_trabajados).sum()
    }
}

// ---------------------------------------------------------------------------
// Report artifact
// ---------------------------------------------------------------------------

/// Full generation output, as written by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarReport {
    pub year: i32,
    /// Hash of the canonical configuration the calendar was generated from.
    pub config_hash: String,
    pub days: Vec<CalendarDay>,
    pub statistics: EstadisticasDias,
}

/// Write `calendar_report.json` into `out_dir`, creating it if needed.
pub fn write_calendar_report_json(out_dir: &Path, report: &CalendarReport) -> io::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join("calendar_report.json");
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
