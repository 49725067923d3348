//! Weekly-mask cycles across a whole year.
//!
//! 2024 is a leap year starting on Monday: 366 days = 52 weeks + Mon 30 Dec
//! and Tue 31 Dec, so it holds 262 Mon–Fri days and 104 weekend days.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use ciclo_calendar::*;

const MON_FRI: [bool; 7] = [true, true, true, true, true, false, false];

fn config(year: i32, mask: [bool; 7]) -> CalendarConfig {
    CalendarConfig::new(CalendarInput::new(
        Year::new(year, year).unwrap(),
        WorkCycle::weekly(mask).unwrap(),
        ContractStart::WorkedBefore { anchor: None },
        WorkingHoursConfig::uniform(Hours::from_whole(8)),
    ))
    .unwrap()
}

fn count(days: &[CalendarDay], state: EstadoDia) -> usize {
    days.iter().filter(|d| d.state == state).count()
}

#[test]
fn mon_fri_2024_has_262_work_days() {
    let days = generate_calendar(&config(2024, MON_FRI));

    assert_eq!(days.len(), 366);
    assert_eq!(count(&days, EstadoDia::Trabajo), 262);
    assert_eq!(count(&days, EstadoDia::Descanso), 104);
    assert_eq!(count(&days, EstadoDia::Vacaciones), 0);
    assert_eq!(count(&days, EstadoDia::Festivo), 0);
    assert_eq!(
        count(&days, EstadoDia::Trabajo) + count(&days, EstadoDia::Descanso),
        366
    );
}

#[test]
fn work_days_match_weekday_count() {
    let days = generate_calendar(&config(2024, MON_FRI));
    let expected = days
        .iter()
        .filter(|d| !matches!(d.date.weekday(), Weekday::Sat | Weekday::Sun))
        .count();
    assert_eq!(count(&days, EstadoDia::Trabajo), expected);
}

#[test]
fn weekday_result_is_independent_of_year() {
    // Same weekday in different years resolves the same way.
    let a = config(2024, [true, false, true, false, true, false, true]);
    let b = config(2025, [true, false, true, false, true, false, true]);

    let wed_2024 = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    let wed_2025 = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
    assert_eq!(wed_2024.weekday(), Weekday::Wed);
    assert_eq!(wed_2025.weekday(), Weekday::Wed);

    assert_eq!(resolve_day(&a, wed_2024).state, EstadoDia::Trabajo);
    assert_eq!(resolve_day(&b, wed_2025).state, EstadoDia::Trabajo);

    let tue_2024 = wed_2024 - Duration::days(1);
    let tue_2025 = wed_2025 - Duration::days(1);
    assert_eq!(resolve_day(&a, tue_2024).state, EstadoDia::Descanso);
    assert_eq!(resolve_day(&b, tue_2025).state, EstadoDia::Descanso);
}

#[test]
fn weekly_position_is_stable_for_equal_weekdays() {
    let cfg = config(2024, MON_FRI);
    for day in cfg.year().days() {
        let week_later = day + Duration::days(7);
        assert_eq!(
            cfg.cycle().is_work_day(cfg.position(day)),
            cfg.cycle().is_work_day(cfg.position(week_later)),
            "weekday {day} and {week_later} disagree"
        );
    }
}

#[test]
fn non_leap_year_has_365_entries_in_order() {
    let days = generate_calendar(&config(2025, MON_FRI));
    assert_eq!(days.len(), 365);
    assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(days[364].date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
}
