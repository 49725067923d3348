use chrono::Weekday;
use ciclo_calendar::{generate_calendar, CalendarConfig, CalendarDay, EstadoDia, Hours};

use crate::types::{
    BalanceHoras, CalendarReport, ConteoEstado, DistribucionSemanal, EstadisticasDias,
    EstadoBalance, ResumenMensual,
};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ============================================================================
// Public API
// ============================================================================

/// Roll a generated calendar up into year statistics.
///
/// Single pass over `days`. Never fails: empty input and a zero contract
/// yield zero counts and finite percentages.
pub fn aggregate(days: &[CalendarDay], config: &CalendarConfig) -> EstadisticasDias {
    let mut by_state = [0u32; 7];
    let mut week_days = [0u32; 7];
    let mut week_hours = [Hours::ZERO; 7];
    let mut month_days = [0u32; 12];
    let mut month_hours = [Hours::ZERO; 12];
    let mut total_hours = Hours::ZERO;

    for day in days {
        by_state[state_index(day.state)] += 1;
        total_hours += day.hours_worked;

        let w = usize::from(day.weekday_index).min(6);
        let m = (day.month() as usize).clamp(1, 12) - 1;
        month_hours[m] += day.hours_worked;
        if day.is_worked() {
            week_days[w] += 1;
            week_hours[w] += day.hours_worked;
            month_days[m] += 1;
        }
    }

    let dias_totales = days.len() as u32;
    let no_contratado = by_state[state_index(EstadoDia::NoContratado)];
    let dias_efectivos = dias_totales - no_contratado;
    let worked_total: u32 = week_days.iter().sum();

    let por_estado = EstadoDia::ALL
        .iter()
        .zip(by_state)
        .map(|(&estado, dias)| {
            let base = if estado == EstadoDia::NoContratado {
                dias_totales
            } else {
                dias_efectivos
            };
            ConteoEstado {
                estado,
                dias,
                porcentaje: ratio_pct(dias, base),
            }
        })
        .collect();

    let por_dia_semana = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, &dia)| DistribucionSemanal {
            dia,
            dias_trabajados: week_days[i],
            porcentaje: ratio_pct(week_days[i], worked_total),
            horas: week_hours[i],
        })
        .collect();

    let (dia_mas_trabajado, dia_menos_trabajado) = if worked_total == 0 {
        (None, None)
    } else {
        (Some(most_worked(&week_days)), Some(least_worked(&week_days)))
    };

    let mensual = (0..12)
        .map(|m| ResumenMensual {
            mes: m as u32 + 1,
            horas: month_hours[m],
            dias_trabajados: month_days[m],
        })
        .collect();

    EstadisticasDias {
        dias_totales,
        dias_efectivos,
        por_estado,
        por_dia_semana,
        dia_mas_trabajado,
        dia_menos_trabajado,
        mensual,
        balance: balance(total_hours, config.annual_contract_hours()),
    }
}

/// Generate the configured year and aggregate it into a report.
pub fn build_report(config: &CalendarConfig, config_hash: &str) -> CalendarReport {
    let days = generate_calendar(config);
    let statistics = aggregate(&days, config);
    CalendarReport {
        year: config.year().value(),
        config_hash: config_hash.to_string(),
        days,
        statistics,
    }
}

/// Compare worked hours with the annual contract.
///
/// `estado` comes from the exact hour totals; only the reported percentage
/// is rounded.
pub fn balance(horas_trabajadas: Hours, horas_convenio: Hours) -> BalanceHoras {
    let porcentaje_cumplimiento = if horas_convenio.is_zero() {
        100.0
    } else {
        round2(horas_trabajadas.centi() as f64 / horas_convenio.centi() as f64 * 100.0)
    };
    BalanceHoras {
        horas_trabajadas,
        horas_convenio,
        saldo: horas_trabajadas - horas_convenio,
        porcentaje_cumplimiento,
        estado: EstadoBalance::from_hours(horas_trabajadas, horas_convenio),
    }
}

// ============================================================================
// Helpers
// ============================================================================

// Slot in `EstadoDia::ALL` order.
fn state_index(estado: EstadoDia) -> usize {
    match estado {
        EstadoDia::Trabajo => 0,
        EstadoDia::Descanso => 1,
        EstadoDia::Vacaciones => 2,
        EstadoDia::Guardia => 3,
        EstadoDia::Festivo => 4,
        EstadoDia::FestivoTrabajado => 5,
        EstadoDia::NoContratado => 6,
    }
}

// Strict comparisons keep the earliest weekday on ties.
fn most_worked(counts: &[u32; 7]) -> Weekday {
    let mut best = 0;
    for i in 1..7 {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    WEEKDAYS[best]
}

fn least_worked(counts: &[u32; 7]) -> Weekday {
    let mut best = 0;
    for i in 1..7 {
        if counts[i] < counts[best] {
            best = i;
        }
    }
    WEEKDAYS[best]
}

/// `num / den * 100` rounded to 2 places; `0.0` when `den == 0`.
fn ratio_pct(num: u32, den: u32) -> f64 {
    if den == 0 {
        return 0.0;
    }
    round2(f64::from(num) / f64::from(den) * 100.0)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
