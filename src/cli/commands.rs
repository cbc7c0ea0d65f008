use std::fmt::Write as _;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::browser::page::Page;
use crate::browser::preflight::check_reachable;
use crate::browser::session::BrowserSession;
use crate::cli::config::RunContext;
use crate::data::fixtures::Fixtures;
use crate::data::scratch::ScratchStore;
use crate::harness::Harness;
use crate::report::{ReportFormat, TestSuiteReport};
use crate::spec::runner::TestRunner;
use crate::spec::spec_model::TestSpec;
use crate::suite::{self, SUITE_NAMES, Suite};
use crate::trace::TraceLogger;

const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// run subcommand
// ============================================================================

/// Run built-in suites and return whether all selected cases passed.
pub fn cmd_run(
    suite_name: &str,
    grep: Option<&str>,
    ctx: &RunContext,
    format: ReportFormat,
    output: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let suites = select_suites(suite_name)?;

    if ctx.preflight && !ctx.settings.dashboard_url.is_empty() {
        let status = check_reachable(&ctx.settings.dashboard_url, PREFLIGHT_TIMEOUT)?;
        info!(url = %ctx.settings.dashboard_url, status, "application reachable");
    }

    let tracer = match &ctx.trace {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let session = BrowserSession::launch(&ctx.driver, &ctx.launch)?;
    let mut harness = Harness::new(Box::new(session), ctx.waits)
        .with_scratch(ScratchStore::new(&ctx.data_dir))
        .with_fixtures(Fixtures::load(&ctx.fixtures_dir)?)
        .with_settings(ctx.settings.clone());

    let start = Instant::now();
    let mut reports = Vec::with_capacity(suites.len());
    for suite in &suites {
        reports.push(suite.run(&mut harness, grep, &tracer));
    }
    let duration = start.elapsed().as_millis();

    if let Err(e) = harness.close() {
        warn!(error = %e, "browser did not close cleanly");
    }

    let name = if suites.len() == 1 { suites[0].name.as_str() } else { "tailorbird-e2e" };
    let report = TestSuiteReport::merge(name, reports).with_duration(duration);
    write_report(&report, format, output)?;
    Ok(report.all_passed())
}

/// `all` expands to every suite in dependency order.
pub fn select_suites(name: &str) -> Result<Vec<Suite>, Box<dyn std::error::Error>> {
    if name == "all" {
        return Ok(suite::all());
    }
    suite::by_name(name).map(|s| vec![s]).ok_or_else(|| {
        format!("unknown suite '{}', expected one of: all, {}", name, SUITE_NAMES.join(", ")).into()
    })
}

// ============================================================================
// spec subcommand
// ============================================================================

/// Run test specs and return whether all passed.
pub fn cmd_spec(
    spec_path: &str,
    ctx: &RunContext,
    format: ReportFormat,
    output: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let specs = load_specs(spec_path)?;

    if specs.is_empty() {
        warn!(path = spec_path, "no test specs found");
        return Ok(true);
    }

    info!(count = specs.len(), "running test specs");

    let mut session = BrowserSession::launch(&ctx.driver, &ctx.launch)?;
    let start = Instant::now();

    let mut results = Vec::new();
    for spec in &specs {
        info!(spec = %spec.name, "running spec");
        let result = TestRunner::run(spec, &mut session, &ctx.waits);
        results.push(result);
    }

    let duration = start.elapsed().as_millis();
    session.close()?;

    let report = TestSuiteReport::from_results("CLI Run", results).with_duration(duration);
    write_report(&report, format, output)?;
    Ok(report.all_passed())
}

/// Load test specs from a single YAML file or a directory of YAML files.
pub fn load_specs(path: &str) -> Result<Vec<TestSpec>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut specs = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let p = entry.path();
            if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
                let content = std::fs::read_to_string(&p)?;
                let spec: TestSpec = serde_yaml::from_str(&content)?;
                specs.push(spec);
            }
        }
        // Sort by name for deterministic order
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(specs)
    } else {
        let content = std::fs::read_to_string(path)?;
        let spec: TestSpec = serde_yaml::from_str(&content)?;
        Ok(vec![spec])
    }
}

// ============================================================================
// list subcommand
// ============================================================================

pub fn cmd_list(grep: Option<&str>) {
    print!("{}", list_cases(grep));
}

/// One line per suite, then one indented line per selected case.
pub fn list_cases(grep: Option<&str>) -> String {
    let mut out = String::new();
    for suite in suite::all() {
        let cases = suite.selected(grep);
        if cases.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{} ({} cases)", suite.name, cases.len());
        for case in cases {
            let tags = if case.tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", case.tags.join(" "))
            };
            let skip = if case.skip { " (skipped)" } else { "" };
            let _ = writeln!(out, "  - {}{}{}", case.name, tags, skip);
        }
    }
    out
}

// ============================================================================
// Helpers
// ============================================================================

/// Print console reports; write the others to `--output` or their default file.
pub fn write_report(
    report: &TestSuiteReport,
    format: ReportFormat,
    output: Option<&str>,
) -> std::io::Result<()> {
    let content = format.render(report);
    match output.or(format.default_output()) {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &content)?;
            info!(path, "report written");
        }
        None => print!("{}", content),
    }
    Ok(())
}
