use tailorbird_e2e::trace::{CaseEvent, TraceEvent, TraceLogger};

fn read_events(path: &std::path::Path) -> Vec<TraceEvent> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn logger_appends_jsonl_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/run/trace.jsonl");
    let logger = TraceLogger::new(&path);
    assert!(logger.is_enabled());

    logger.log(&TraceEvent::now(CaseEvent::CaseStarted, "menu", "labels"));
    logger.log(
        &TraceEvent::now(CaseEvent::CaseFailed, "menu", "labels")
            .with_duration(120)
            .with_error("Timed out")
            .with_screenshot("artifacts/menu__labels.png"),
    );

    let events = read_events(&path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event, CaseEvent::CaseStarted);
    assert_eq!(events[1].duration_ms, Some(120));
    assert_eq!(events[1].error.as_deref(), Some("Timed out"));
    assert_eq!(events[1].screenshot.as_deref(), Some("artifacts/menu__labels.png"));
}

#[test]
fn logger_appends_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");

    TraceLogger::new(&path).log(&TraceEvent::now(CaseEvent::CasePassed, "a", "1"));
    TraceLogger::new(&path).log(&TraceEvent::now(CaseEvent::CaseSkipped, "a", "2"));

    let events = read_events(&path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].case, "2");
}

#[test]
fn event_json_uses_snake_case_and_omits_empty_fields() {
    let json = serde_json::to_value(TraceEvent::now(CaseEvent::CaseSkipped, "menu", "expand")).unwrap();
    assert_eq!(json["event"], "case_skipped");
    assert_eq!(json["suite"], "menu");
    assert!(json.get("error").is_none());
    assert!(json.get("duration_ms").is_none());
    assert!(json["timestamp_ms"].as_u64().unwrap() > 0);
}

#[test]
fn disabled_logger_writes_nothing() {
    let logger = TraceLogger::disabled();
    assert!(!logger.is_enabled());
    logger.log(&TraceEvent::now(CaseEvent::CaseStarted, "menu", "labels"));
}

#[test]
fn unwritable_path_disables_logger() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as the trace file.
    let logger = TraceLogger::new(dir.path());
    assert!(!logger.is_enabled());
}
