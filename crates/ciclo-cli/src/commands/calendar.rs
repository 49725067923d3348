use anyhow::{Context, Result};
use ciclo_calendar::{find_overlaps, generate_calendar, merge_overlapping, CalendarDay};
use ciclo_stats::{aggregate, build_report, write_calendar_report_json};
use std::path::Path;

use super::{load_calendar, GlobalOpts};
use crate::{OutputFormat, SourceArgs};

pub fn validate(opts: &GlobalOpts, source: &SourceArgs) -> Result<()> {
    let (loaded, config) = load_calendar(opts, source)?;
    println!("ok");
    println!("config_hash={}", loaded.config_hash);
    println!("year={}", config.year().value());
    println!("days={}", config.year().len_days());
    Ok(())
}

pub fn generate(
    opts: &GlobalOpts,
    source: &SourceArgs,
    format: OutputFormat,
    out: Option<&Path>,
) -> Result<()> {
    let (loaded, config) = load_calendar(opts, source)?;

    let report = build_report(&config, &loaded.config_hash);
    tracing::info!(
        year = report.year,
        days = report.days.len(),
        config_hash = %report.config_hash,
        "calendar generated"
    );

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report.days).context("serialize days failed")?;
            println!("{json}");
        }
        OutputFormat::Table => print_table(&report.days),
    }

    if let Some(dir) = out {
        let path = write_calendar_report_json(dir, &report)
            .with_context(|| format!("write calendar report failed: {}", dir.display()))?;
        tracing::info!(path = %path.display(), "report written");
        eprintln!("report={}", path.display());
    }
    Ok(())
}

pub fn stats(opts: &GlobalOpts, source: &SourceArgs) -> Result<()> {
    let (_loaded, config) = load_calendar(opts, source)?;
    let days = generate_calendar(&config);
    let statistics = aggregate(&days, &config);
    let json = serde_json::to_string_pretty(&statistics).context("serialize statistics failed")?;
    println!("{json}");
    Ok(())
}

pub fn merge_vacations(opts: &GlobalOpts, source: &SourceArgs) -> Result<()> {
    let (_loaded, config) = load_calendar(opts, source)?;
    let vacations = config.vacations();

    for (a, b) in find_overlaps(vacations) {
        tracing::warn!(
            first = %format!("{}..{}", vacations[a].start_date, vacations[a].end_date),
            second = %format!("{}..{}", vacations[b].start_date, vacations[b].end_date),
            "overlapping vacation periods"
        );
    }

    let merged = merge_overlapping(vacations);
    tracing::info!(before = vacations.len(), after = merged.len(), "vacations merged");
    let json = serde_json::to_string_pretty(&merged).context("serialize vacations failed")?;
    println!("{json}");
    Ok(())
}

fn print_table(days: &[CalendarDay]) {
    println!(
        "{:<10}  {:<3}  {:<17}  {:>6}  {:>6}  CYCLE",
        "DATE", "DOW", "STATE", "HOURS", "EXTRA"
    );
    for d in days {
        let cycle = d
            .cycle_metadata
            .map(|m| format!("{}/{} {:?}", m.part_number, m.day_within_part, m.day_type))
            .unwrap_or_default();
        println!(
            "{:<10}  {:<3}  {:<17}  {:>6}  {:>6}  {}",
            d.date.to_string(),
            d.weekday().to_string(),
            d.state.as_str(),
            d.hours_worked.to_string(),
            d.extra_hours.to_string(),
            cycle
        );
    }
}
