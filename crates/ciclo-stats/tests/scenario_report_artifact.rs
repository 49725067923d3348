use ciclo_calendar::*;
use ciclo_stats::{build_report, write_calendar_report_json, CalendarReport};

fn config() -> CalendarConfig {
    let mut inp = CalendarInput::new(
        Year::new(2025, 2025).unwrap(),
        WorkCycle::parts(vec![CyclePart::new(5, 2)]).unwrap(),
        ContractStart::WorkedBefore {
            anchor: Some(CyclePosition::new(1, 3, DayType::Work)),
        },
        WorkingHoursConfig::uniform(Hours::from_centi(825)),
    );
    inp.annual_contract_hours = Hours::from_whole(1_720);
    CalendarConfig::new(inp).unwrap()
}

#[test]
fn report_is_written_as_pretty_json_and_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("out");

    let report = build_report(&config(), "deadbeef");
    let path = write_calendar_report_json(&out, &report).unwrap();
    assert_eq!(path, out.join("calendar_report.json"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"year\": 2025"));
    assert!(text.contains("\"configHash\": \"deadbeef\""));
    assert!(text.contains("\"horasConvenio\": 1720.0"));

    let back: CalendarReport = serde_json::from_str(&text).unwrap();
    assert_eq!(back, report);
    assert_eq!(back.days.len(), 365);
}

#[test]
fn rewriting_the_same_report_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let report = build_report(&config(), "h");

    let p1 = write_calendar_report_json(dir.path(), &report).unwrap();
    let first = std::fs::read(&p1).unwrap();
    let p2 = write_calendar_report_json(dir.path(), &build_report(&config(), "h")).unwrap();
    let second = std::fs::read(&p2).unwrap();
    assert_eq!(first, second);
}
