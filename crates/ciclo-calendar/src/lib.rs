//! ciclo-calendar
//!
//! Calendar day-state resolution for irregular work cycles.
//!
//! A work cycle (weekly mask or repeating work/rest parts) is anchored to a
//! target year and overlaid with holidays, vacations, guardias and extra
//! shifts. The result is one [`CalendarDay`] per date with its
//! [`EstadoDia`] and worked [`Hours`].
//!
//! Rules:
//! - All validation happens in [`CalendarConfig::new`]; resolution and
//!   generation are total.
//! - Vacation outranks holiday, holiday outranks guardia, guardia outranks
//!   the cycle. Extra shifts only add hours.
//!
//! Pure deterministic logic. No IO, no wall-clock.

mod anchor;
mod config;
mod cycle;
mod error;
mod generator;
mod hours;
mod overrides;
mod resolver;
mod types;
mod year;

pub use anchor::{ContractStart, CycleAnchor};
pub use config::{CalendarConfig, CalendarInput, WorkingHoursConfig};
pub use cycle::{CyclePart, CyclePattern, CyclePosition, DayType, WorkCycle, MAX_CYCLE_DAYS};
pub use error::CalendarError;
pub use generator::generate_calendar;
pub use hours::{Hours, CENTI_SCALE};
pub use overrides::{find_overlaps, merge_overlapping, ExtraShift, Guardia, Holiday, VacationPeriod};
pub use resolver::resolve_day;
pub use types::{CalendarDay, DayClass, EstadoDia};
pub use year::{Year, YEARS_AHEAD, YEARS_BACK};
