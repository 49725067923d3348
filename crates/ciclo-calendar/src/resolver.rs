//! Day-state resolution.
//!
//! Pure and total over a validated [`CalendarConfig`]. First match wins:
//!
//! 1. before contract start      → `NoContratado`, 0 h
//! 2. inside a vacation period   → `Vacaciones`, 0 h
//! 3. holiday                    → `FestivoTrabajado` (holiday rate) if the
//!    cycle says work; otherwise `Guardia` when one is recorded, else
//!    `Festivo`, 0 h
//! 4. guardia on a rest day      → `Guardia`, guardia hours
//! 5. cycle                      → `Trabajo` (day-class rate) / `Descanso`
//!
//! Extra-shift hours are then added on top of any contracted state without
//! changing it. `NoContratado` days always carry 0 h.

use chrono::{Datelike, NaiveDate};

use crate::{CalendarConfig, CalendarDay, EstadoDia, Hours};

/// Resolve the state and worked hours of one date.
pub fn resolve_day(config: &CalendarConfig, date: NaiveDate) -> CalendarDay {
    let position = config.position(date);
    let (state, base_hours) = base_state(config, date);
    let extra_hours = match state {
        EstadoDia::NoContratado => Hours::ZERO,
        _ => config.extra_hours_on(date),
    };

    CalendarDay {
        date,
        weekday_index: date.weekday().num_days_from_monday() as u8,
        state,
        hours_worked: base_hours + extra_hours,
        extra_hours,
        cycle_metadata: config.cycle().slot(position),
    }
}

fn base_state(config: &CalendarConfig, date: NaiveDate) -> (EstadoDia, Hours) {
    if config.contract_start().is_before_start(date) {
        return (EstadoDia::NoContratado, Hours::ZERO);
    }

    if config.is_vacation(date) {
        return (EstadoDia::Vacaciones, Hours::ZERO);
    }

    let cycle_work = config.cycle_says_work(date);

    if config.holiday_on(date).is_some() {
        if cycle_work {
            return (EstadoDia::FestivoTrabajado, config.working_hours().holiday);
        }
        return match config.guardia_on(date) {
            Some(g) => (EstadoDia::Guardia, g.hours),
            None => (EstadoDia::Festivo, Hours::ZERO),
        };
    }

    // Guardias on work days are rejected when the config is built.
    if let Some(g) = config.guardia_on(date) {
        if !cycle_work {
            return (EstadoDia::Guardia, g.hours);
        }
    }

    if cycle_work {
        (EstadoDia::Trabajo, config.working_hours().rate_for(date))
    } else {
        (EstadoDia::Descanso, Hours::ZERO)
    }
}
