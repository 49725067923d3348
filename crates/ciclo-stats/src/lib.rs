//! ciclo-stats
//!
//! Year statistics over a generated calendar: per-state counts, weekday
//! and monthly breakdowns, and the hour balance against the annual
//! contract. Also owns the `calendar_report.json` artifact.
//!
//! Pure aggregation over `ciclo-calendar` output. Never fails.

mod aggregator;
mod types;

pub use aggregator::{aggregate, balance, build_report};
pub use types::{
    write_calendar_report_json, BalanceHoras, CalendarReport, ConteoEstado, DistribucionSemanal,
    EstadisticasDias, EstadoBalance, ResumenMensual, UMBRAL_ADVERTENCIA, UMBRAL_EXCELENTE,
    UMBRAL_OK,
};
