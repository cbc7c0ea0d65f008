use crate::report::report_model::TestSuiteReport;
use crate::spec::spec_model::TestResult;

pub const JUNIT_CLASSNAME: &str = "tailorbird-e2e";

// ============================================================================
// JUnit XML reporter for CI
// ============================================================================

/// Generate JUnit XML.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="project" tests="3" failures="1" skipped="1" time="6.200">
///   <testcase name="project::create project" classname="tailorbird-e2e" time="1.200" />
///   <testcase name="project::export projects" classname="tailorbird-e2e" time="5.000">
///     <failure message="execution error" type="E2eFailure">Error: ...</failure>
///     <system-out>[[ATTACHMENT|artifacts/project__export_projects.png]]</system-out>
///   </testcase>
///   <testcase name="project::scope mix" classname="tailorbird-e2e"><skipped /></testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &TestSuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let cases: String = report.test_results.iter().map(junit_case).collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\" skipped=\"{skipped}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        skipped = report.skipped,
        time = time_attr,
        cases = cases,
    )
}

fn junit_case(result: &TestResult) -> String {
    let open = format!(
        "  <testcase name=\"{}\" classname=\"{}\"{}",
        escape_xml(&result.spec_name),
        JUNIT_CLASSNAME,
        result
            .duration_ms
            .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
            .unwrap_or_default()
    );

    if result.skipped {
        return format!("{}>\n    <skipped />\n  </testcase>\n", open);
    }
    if result.passed {
        return format!("{} />\n", open);
    }

    let mut body_parts: Vec<String> = result
        .assertion_results
        .iter()
        .filter(|ar| !ar.passed)
        .map(|ar| {
            let msg = ar.message.as_deref().unwrap_or("assertion failed");
            format!("Step {}: {}", ar.step_index, msg)
        })
        .collect();
    let failure_count = body_parts.len();
    if let Some(ref e) = result.error {
        body_parts.push(format!("Error: {}", e));
    }

    let failure_message = if failure_count > 0 {
        format!("{} assertion(s) failed", failure_count)
    } else {
        "execution error".to_string()
    };

    let attachment = result
        .screenshot
        .as_ref()
        .map(|p| {
            format!(
                "    <system-out>[[ATTACHMENT|{}]]</system-out>\n",
                escape_xml(&p.display().to_string())
            )
        })
        .unwrap_or_default();

    format!(
        "{open}>\n    <failure message=\"{message}\" type=\"E2eFailure\">{body}</failure>\n{attachment}  </testcase>\n",
        open = open,
        message = escape_xml(&failure_message),
        body = escape_xml(&body_parts.join("\n")),
        attachment = attachment,
    )
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
