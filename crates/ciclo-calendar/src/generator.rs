use crate::{resolve_day, CalendarConfig, CalendarDay};

/// Resolve every date of the configured year, ascending.
///
/// Always 365 or 366 entries. No clock access: the year is part of the
/// configuration, so equal inputs give equal output.
pub fn generate_calendar(config: &CalendarConfig) -> Vec<CalendarDay> {
    let year = config.year();
    let mut days = Vec::with_capacity(year.len_days() as usize);
    days.extend(year.days().map(|date| resolve_day(config, date)));
    days
}
