use std::path::PathBuf;

use tailorbird_e2e::report::console::format_console_report;
use tailorbird_e2e::report::html::generate_html_report;
use tailorbird_e2e::report::junit::{escape_xml, generate_junit_xml};
use tailorbird_e2e::report::report_model::TestSuiteReport;
use tailorbird_e2e::report::ReportFormat;
use tailorbird_e2e::spec::spec_model::{AssertionResult, AssertionSpec, TestResult};

// ============================================================================
// Helper builders
// ============================================================================

fn passing_result(name: &str) -> TestResult {
    TestResult {
        steps_run: 3,
        assertion_results: vec![AssertionResult {
            step_index: 2,
            spec: AssertionSpec::TitleContains {
                expected: "Dashboard".into(),
            },
            passed: true,
            actual: Some("Tailorbird Dashboard".into()),
            message: None,
        }],
        ..TestResult::passed(name)
    }
}

fn failing_result(name: &str) -> TestResult {
    TestResult {
        spec_name: name.to_string(),
        passed: false,
        skipped: false,
        steps_run: 5,
        assertion_results: vec![
            AssertionResult {
                step_index: 1,
                spec: AssertionSpec::UrlContains {
                    expected: "tab=invoices".into(),
                },
                passed: false,
                actual: Some("https://app.example.com/projects".into()),
                message: Some("URL does not contain 'tab=invoices'".into()),
            },
            AssertionResult {
                step_index: 3,
                spec: AssertionSpec::TextContains {
                    target: "text=Invited".into(),
                    expected: "Invited".into(),
                },
                passed: false,
                actual: Some("nothing".into()),
                message: Some("Badge 'Invited' not rendered".into()),
            },
        ],
        error: None,
        screenshot: None,
        duration_ms: Some(2500),
    }
}

fn case_failure(name: &str) -> TestResult {
    TestResult {
        screenshot: Some(PathBuf::from("artifacts/project__export_projects.png")),
        ..TestResult::failed(name, "Timed out after 5000ms waiting for grid rows").with_duration(5000)
    }
}

fn mixed_suite_report() -> TestSuiteReport {
    TestSuiteReport::from_results(
        "project",
        vec![
            passing_result("project::create project"),
            passing_result("project::search project"),
            failing_result("project::export projects"),
            TestResult::skipped("project::scope mix"),
        ],
    )
}

// ============================================================================
// 1. Suite report counts
// ============================================================================

#[test]
fn suite_report_from_results_counts() {
    let report = mixed_suite_report();
    assert_eq!(report.total, 4);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.suite_name, "project");
}

// ============================================================================
// 2. All passed (skips do not fail a run)
// ============================================================================

#[test]
fn suite_report_all_passed_with_skips() {
    let report = TestSuiteReport::from_results(
        "menu",
        vec![passing_result("menu::labels"), TestResult::skipped("menu::expand Financials")],
    );
    assert!(report.all_passed());
    assert_eq!(report.passed, 1);
    assert_eq!(report.skipped, 1);
}

#[test]
fn suite_report_not_all_passed() {
    let report = mixed_suite_report();
    assert!(!report.all_passed());
}

// ============================================================================
// 3. Duration and merge
// ============================================================================

#[test]
fn suite_report_with_duration() {
    let report = TestSuiteReport::from_results("Suite", vec![]).with_duration(1234);
    assert_eq!(report.duration_ms, Some(1234));
}

#[test]
fn suite_report_empty() {
    let report = TestSuiteReport::from_results("Empty", vec![]);
    assert_eq!(report.total, 0);
    assert_eq!(report.passed, 0);
    assert_eq!(report.failed, 0);
    assert!(report.all_passed());
}

#[test]
fn merge_keeps_order_and_sums_counts() {
    let menu = TestSuiteReport::from_results("menu", vec![passing_result("menu::labels")]).with_duration(1000);
    let project = mixed_suite_report().with_duration(4000);

    let merged = TestSuiteReport::merge("tailorbird-e2e", vec![menu, project]);

    assert_eq!(merged.suite_name, "tailorbird-e2e");
    assert_eq!(merged.total, 5);
    assert_eq!(merged.passed, 3);
    assert_eq!(merged.failed, 1);
    assert_eq!(merged.skipped, 1);
    assert_eq!(merged.duration_ms, Some(5000));
    assert_eq!(merged.test_results[0].spec_name, "menu::labels");
    assert_eq!(merged.test_results[4].spec_name, "project::scope mix");
}

#[test]
fn merge_without_durations_has_none() {
    let a = TestSuiteReport::from_results("a", vec![passing_result("a::1")]);
    let b = TestSuiteReport::from_results("b", vec![passing_result("b::1")]).with_duration(10);
    let merged = TestSuiteReport::merge("all", vec![a, b]);
    assert_eq!(merged.duration_ms, None);
}

#[test]
fn suite_report_json_roundtrip() {
    let report = mixed_suite_report().with_duration(5000);
    let json = serde_json::to_string(&report).unwrap();
    let parsed: TestSuiteReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.suite_name, "project");
    assert_eq!(parsed.total, 4);
    assert_eq!(parsed.skipped, 1);
    assert_eq!(parsed.duration_ms, Some(5000));
    assert_eq!(parsed.test_results, report.test_results);
}

// ============================================================================
// 4. Console report
// ============================================================================

#[test]
fn console_report_markers() {
    let output = format_console_report(&mixed_suite_report());
    assert!(output.contains("\u{2713} PASS  project::create project"));
    assert!(output.contains("\u{2717} FAIL  project::export projects"));
    assert!(output.contains("- SKIP  project::scope mix"));
}

#[test]
fn console_report_summary_line() {
    let output = format_console_report(&mixed_suite_report().with_duration(6200));
    assert!(output.contains("=== Results: 2 passed, 1 failed, 1 skipped (4 total) in 6.2s ==="));
}

#[test]
fn console_report_omits_skipped_when_none() {
    let report = TestSuiteReport::from_results("Suite", vec![passing_result("ok")]);
    let output = format_console_report(&report);
    assert!(output.contains("1 passed, 0 failed (1 total)"));
    assert!(!output.contains("skipped"));
}

#[test]
fn console_report_failure_details() {
    let report = TestSuiteReport::from_results("Suite", vec![failing_result("Failing")]);
    let output = format_console_report(&report);
    assert!(output.contains("[FAIL] Step 1: UrlContains: URL does not contain 'tab=invoices'"));
    assert!(output.contains("[FAIL] Step 3: TextContains: Badge 'Invited' not rendered"));
    assert!(output.contains("2.5s"));
}

#[test]
fn console_report_error_and_screenshot() {
    let report = TestSuiteReport::from_results("project", vec![case_failure("project::export projects")]);
    let output = format_console_report(&report);
    assert!(output.contains("[ERROR] Timed out after 5000ms waiting for grid rows"));
    assert!(output.contains("[SCREENSHOT] artifacts/project__export_projects.png"));
}

// ============================================================================
// 5. HTML report
// ============================================================================

#[test]
fn html_report_structure() {
    let html = generate_html_report(&mixed_suite_report());
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("</html>"));
    assert!(html.contains("project: 2 passed, 1 failed, 1 skipped (4 total)"));
    assert!(html.contains("test-case skip"));
}

#[test]
fn html_report_pass_and_fail_banners() {
    let green = generate_html_report(&TestSuiteReport::from_results("Suite", vec![passing_result("A")]));
    assert!(green.contains("class=\"banner ok\""));
    assert!(green.contains("ALL TESTS PASSED"));

    let red = generate_html_report(&mixed_suite_report());
    assert!(red.contains("class=\"banner ko\""));
    assert!(red.contains("SOME TESTS FAILED"));
}

#[test]
fn html_report_tables_merged_suites() {
    let single = generate_html_report(&mixed_suite_report());
    assert!(!single.contains("<table class=\"suites\">"));

    let merged = TestSuiteReport::merge(
        "all",
        vec![
            TestSuiteReport::from_results("menu", vec![passing_result("menu::labels")]),
            TestSuiteReport::from_results("invoice", vec![case_failure("invoice::save")]),
        ],
    );
    let html = generate_html_report(&merged);
    assert!(html.contains("<table class=\"suites\">"));
    assert!(html.contains("<tr><td>menu</td><td>1</td><td>0</td><td>0</td></tr>"));
    assert!(html.contains("<tr><td>invoice</td><td>0</td><td>1</td><td>0</td></tr>"));
}

#[test]
fn html_report_escapes_and_embeds_screenshot() {
    let mut failure = case_failure("properties::<delete> & verify");
    failure.error = Some("Expected \"row\" gone".into());
    let html = generate_html_report(&TestSuiteReport::from_results("properties", vec![failure]));

    assert!(html.contains("properties::&lt;delete&gt; &amp; verify"));
    assert!(html.contains("Expected &quot;row&quot; gone"));
    assert!(html.contains("<img class=\"shot\" src=\"artifacts/project__export_projects.png\""));
}

// ============================================================================
// 6. JUnit XML
// ============================================================================

#[test]
fn junit_xml_structure() {
    let xml = generate_junit_xml(&mixed_suite_report());
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<testsuite name=\"project\" tests=\"4\" failures=\"1\" skipped=\"1\""));
    assert!(xml.contains("classname=\"tailorbird-e2e\""));
    assert!(xml.contains("<skipped />"));
    assert!(xml.trim_end().ends_with("</testsuite>"));
}

#[test]
fn junit_xml_assertion_failure_element() {
    let report = TestSuiteReport::from_results("Suite", vec![failing_result("Broken Test")]);
    let xml = generate_junit_xml(&report);
    assert!(xml.contains("<failure message=\"2 assertion(s) failed\""));
    assert!(xml.contains("Step 1: URL does not contain &apos;tab=invoices&apos;"));
    assert!(xml.contains("time=\"2.500\""));
}

#[test]
fn junit_xml_error_with_attachment() {
    let report = TestSuiteReport::from_results("project", vec![case_failure("project::export projects")]);
    let xml = generate_junit_xml(&report);
    assert!(xml.contains("<failure message=\"execution error\""));
    assert!(xml.contains("Error: Timed out after 5000ms"));
    assert!(xml.contains("<system-out>[[ATTACHMENT|artifacts/project__export_projects.png]]</system-out>"));
}

#[test]
fn escape_xml_special_characters() {
    assert_eq!(escape_xml("a < b & \"c\" 'd' >"), "a &lt; b &amp; &quot;c&quot; &apos;d&apos; &gt;");
}

// ============================================================================
// 7. Format selection
// ============================================================================

#[test]
fn report_format_renders_and_defaults() {
    let report = mixed_suite_report();
    assert!(ReportFormat::Console.render(&report).contains("=== Test Suite: project ==="));
    assert!(ReportFormat::Html.render(&report).contains("<!DOCTYPE html>"));
    assert!(ReportFormat::Junit.render(&report).starts_with("<?xml"));

    assert_eq!(ReportFormat::Console.default_output(), None);
    assert_eq!(ReportFormat::Html.default_output(), Some("report.html"));
    assert_eq!(ReportFormat::Junit.default_output(), Some("report.xml"));
}
