use crate::report::report_model::{TestSuiteReport, seconds};
use crate::spec::spec_model::TestResult;

// ============================================================================
// HTML reporter: one self-contained file, inline CSS
// ============================================================================

const STYLE: &str = r#"body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f4f5f7; }
.banner { color: white; padding: 18px 28px; }
.banner.ok { background: #2e7d32; }
.banner.ko { background: #c62828; }
.banner h1 { margin: 0 0 6px 0; font-size: 22px; }
.banner p { margin: 0; opacity: 0.9; }
main { max-width: 960px; margin: 20px auto; padding: 0 20px; }
table.suites { border-collapse: collapse; width: 100%; margin-bottom: 20px; background: white; }
table.suites th, table.suites td { padding: 6px 10px; border-bottom: 1px solid #e0e0e0; text-align: left; font-size: 14px; }
.test-case { background: white; border-radius: 6px; padding: 14px 18px; margin-bottom: 10px; border-left: 4px solid #bbb; }
.test-case.pass { border-left-color: #2e7d32; }
.test-case.fail { border-left-color: #c62828; }
.test-case.skip { border-left-color: #9e9e9e; opacity: 0.7; }
.test-case h3 { margin: 0 0 6px 0; font-size: 15px; }
.test-case p { margin: 4px 0; color: #555; font-size: 13px; }
.test-case .error { color: #c62828; font-weight: bold; white-space: pre-wrap; }
.failures li { color: #b71c1c; font-size: 13px; }
.shot { max-width: 100%; margin-top: 8px; border: 1px solid #ddd; }"#;

pub fn generate_html_report(report: &TestSuiteReport) -> String {
    let (banner_class, headline) = if report.all_passed() {
        ("ok", "ALL TESTS PASSED")
    } else {
        ("ko", "SOME TESTS FAILED")
    };
    let duration = report
        .duration_ms
        .map(|ms| format!(" in {}", seconds(ms)))
        .unwrap_or_default();
    let name = escape_html(&report.suite_name);

    let mut body = suite_table(&report.test_results);
    for result in &report.test_results {
        body.push_str(&case_section(result));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{name}: E2E Report</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <div class=\"banner {banner_class}\">\n<h1>{headline}</h1>\n\
         <p>{name}: {passed} passed, {failed} failed, {skipped} skipped ({total} total){duration}</p>\n\
         </div>\n<main>\n{body}</main>\n</body>\n</html>",
        passed = report.passed,
        failed = report.failed,
        skipped = report.skipped,
        total = report.total,
    )
}

/// Per-suite counts, only when the report merges several suites.
fn suite_table(results: &[TestResult]) -> String {
    let mut rows: Vec<(&str, [usize; 3])> = Vec::new();
    for result in results {
        let suite = result
            .spec_name
            .split_once("::")
            .map(|(suite, _)| suite)
            .unwrap_or("");
        let slot = if result.skipped {
            2
        } else if result.passed {
            0
        } else {
            1
        };
        match rows.iter_mut().find(|(name, _)| *name == suite) {
            Some((_, counts)) => counts[slot] += 1,
            None => {
                let mut counts = [0; 3];
                counts[slot] = 1;
                rows.push((suite, counts));
            }
        }
    }
    if rows.len() < 2 {
        return String::new();
    }

    let mut table = String::from(
        "<table class=\"suites\">\n<tr><th>Suite</th><th>Passed</th><th>Failed</th><th>Skipped</th></tr>\n",
    );
    for (suite, [passed, failed, skipped]) in rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(suite),
            passed,
            failed,
            skipped
        ));
    }
    table.push_str("</table>\n");
    table
}

fn case_section(result: &TestResult) -> String {
    let (class, marker) = if result.skipped {
        ("skip", "-")
    } else if result.passed {
        ("pass", "\u{2713}")
    } else {
        ("fail", "\u{2717}")
    };
    let timing = result
        .duration_ms
        .map(|ms| format!(" | {}", seconds(ms)))
        .unwrap_or_default();

    let mut out = format!(
        "<div class=\"test-case {class}\">\n<h3>{marker} {}</h3>\n<p>Steps: {} | Assertions: {}{timing}</p>\n",
        escape_html(&result.spec_name),
        result.steps_run,
        result.assertion_results.len(),
    );

    if let Some(ref error) = result.error {
        out.push_str(&format!("<p class=\"error\">Error: {}</p>\n", escape_html(error)));
    }

    let failures: String = result
        .assertion_results
        .iter()
        .filter(|ar| !ar.passed)
        .map(|ar| {
            format!(
                "<li>Step {}: {}</li>\n",
                ar.step_index,
                escape_html(ar.message.as_deref().unwrap_or("assertion failed"))
            )
        })
        .collect();
    if !failures.is_empty() {
        out.push_str(&format!("<ul class=\"failures\">\n{failures}</ul>\n"));
    }

    if let Some(ref shot) = result.screenshot {
        let path = escape_html(&shot.display().to_string());
        out.push_str(&format!(
            "<p><a href=\"{path}\">screenshot</a></p>\n<img class=\"shot\" src=\"{path}\" alt=\"failure screenshot\">\n"
        ));
    }

    out.push_str("</div>\n");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
