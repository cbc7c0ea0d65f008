use crate::report::report_model::{TestSuiteReport, seconds};

// ============================================================================
// Console reporter
// ============================================================================

/// Format a report for terminal output.
///
/// ```text
/// === Test Suite: project ===
///
/// ✓ PASS  project::create project (1.2s)
/// ✗ FAIL  project::export projects (5.0s)
///     [ERROR] Timed out after 5000ms waiting for ...
///     [SCREENSHOT] artifacts/project__export_projects.png
/// - SKIP  project::scope mix
///
/// === Results: 1 passed, 1 failed, 1 skipped (3 total) in 6.2s ===
/// ```
pub fn format_console_report(report: &TestSuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Test Suite: {} ===\n\n", report.suite_name));

    for result in &report.test_results {
        let marker = if result.skipped {
            "- SKIP"
        } else if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        let mut details = Vec::new();
        if result.steps_run > 0 {
            details.push(format!("{} steps", result.steps_run));
        }
        if !result.assertion_results.is_empty() {
            details.push(format!("{} assertions", result.assertion_results.len()));
        }
        if let Some(ms) = result.duration_ms {
            details.push(seconds(ms));
        }
        if details.is_empty() {
            out.push_str(&format!("{}  {}\n", marker, result.spec_name));
        } else {
            out.push_str(&format!("{}  {} ({})\n", marker, result.spec_name, details.join(", ")));
        }

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        for ar in result.assertion_results.iter().filter(|ar| !ar.passed) {
            let detail = ar.message.as_deref().unwrap_or("assertion failed");
            out.push_str(&format!(
                "    [FAIL] Step {}: {}: {}\n",
                ar.step_index,
                ar.spec.kind(),
                detail
            ));
        }

        if let Some(ref shot) = result.screenshot {
            out.push_str(&format!("    [SCREENSHOT] {}\n", shot.display()));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed",
        report.passed, report.failed
    ));
    if report.skipped > 0 {
        out.push_str(&format!(", {} skipped", report.skipped));
    }
    out.push_str(&format!(" ({} total)", report.total));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {}", seconds(ms)));
    }

    out.push_str(" ===\n");

    out
}
