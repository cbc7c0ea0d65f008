//! Built-in scenarios: named cases run in order on one harness.

pub mod invoice;
pub mod jobs;
pub mod menu;
pub mod organization;
pub mod project;
pub mod properties;

use std::path::PathBuf;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::harness::Harness;
use crate::report::TestSuiteReport;
use crate::spec::spec_model::TestResult;
use crate::trace::{CaseEvent, TraceEvent, TraceLogger};

pub type CaseFn = Box<dyn Fn(&mut Harness) -> E2eResult<()>>;

pub struct Case {
    pub name: String,
    pub tags: Vec<String>,
    pub skip: bool,
    run: CaseFn,
}

impl Case {
    pub fn new(name: impl Into<String>, run: impl Fn(&mut Harness) -> E2eResult<()> + 'static) -> Self {
        Case {
            name: name.into(),
            tags: Vec::new(),
            skip: false,
            run: Box::new(run),
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Keep the case listed but never run it.
    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Substring match on the name or any tag.
    pub fn matches(&self, grep: &str) -> bool {
        self.name.contains(grep) || self.tags.iter().any(|t| t.contains(grep))
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

/// An ordered list of cases sharing one harness and its browser state.
///
/// Cases run one after another and later cases may depend on earlier ones
/// (a created property is searched, then deleted). A failure is recorded
/// with a screenshot and the next case still runs.
pub struct Suite {
    pub name: String,
    pub cases: Vec<Case>,
    before_all: Option<CaseFn>,
    before_each: Option<CaseFn>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Suite {
            name: name.into(),
            cases: Vec::new(),
            before_all: None,
            before_each: None,
        }
    }

    /// Runs once before the first selected case. When it fails every
    /// selected case fails with its error.
    pub fn before_all(mut self, hook: impl Fn(&mut Harness) -> E2eResult<()> + 'static) -> Self {
        self.before_all = Some(Box::new(hook));
        self
    }

    pub fn before_each(mut self, hook: impl Fn(&mut Harness) -> E2eResult<()> + 'static) -> Self {
        self.before_each = Some(Box::new(hook));
        self
    }

    pub fn case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }

    pub fn selected(&self, grep: Option<&str>) -> Vec<&Case> {
        self.cases
            .iter()
            .filter(|c| grep.is_none_or(|g| c.matches(g)))
            .collect()
    }

    pub fn run(&self, h: &mut Harness, grep: Option<&str>, tracer: &TraceLogger) -> TestSuiteReport {
        let started = Instant::now();
        let selected = self.selected(grep);
        info!(suite = %self.name, cases = selected.len(), "running suite");

        let mut setup_error: Option<String> = None;
        if selected.iter().any(|c| !c.skip) {
            if let Some(hook) = &self.before_all {
                if let Err(e) = hook(h) {
                    error!(suite = %self.name, error = %e, "before_all failed");
                    setup_error = Some(format!("before_all failed: {}", e));
                }
            }
        }

        let mut session_lost = false;
        let mut results = Vec::with_capacity(selected.len());
        for case in selected {
            let full_name = format!("{}::{}", self.name, case.name);

            if case.skip {
                info!(case = %full_name, "skipped");
                tracer.log(&TraceEvent::now(CaseEvent::CaseSkipped, &self.name, &case.name));
                results.push(TestResult::skipped(full_name));
                continue;
            }

            tracer.log(&TraceEvent::now(CaseEvent::CaseStarted, &self.name, &case.name));
            info!(case = %full_name, "case started");
            let case_start = Instant::now();

            let outcome = if session_lost {
                Err(E2eError::SessionIO("browser session was lost by an earlier case".into()))
            } else if let Some(e) = &setup_error {
                Err(E2eError::check(e.clone()))
            } else {
                self.run_case(case, h)
            };
            let elapsed = case_start.elapsed().as_millis();

            match outcome {
                Ok(()) => {
                    info!(case = %full_name, elapsed_ms = elapsed as u64, "case passed");
                    tracer.log(
                        &TraceEvent::now(CaseEvent::CasePassed, &self.name, &case.name).with_duration(elapsed),
                    );
                    results.push(TestResult::passed(full_name).with_duration(elapsed));
                }
                Err(e) => {
                    error!(case = %full_name, error = %e, "case failed");
                    let screenshot = if session_lost || e.is_session_failure() {
                        None
                    } else {
                        capture_failure(h, &full_name)
                    };
                    session_lost = session_lost || e.is_session_failure();

                    let mut event = TraceEvent::now(CaseEvent::CaseFailed, &self.name, &case.name)
                        .with_duration(elapsed)
                        .with_error(&e);
                    if let Some(ref shot) = screenshot {
                        event = event.with_screenshot(shot.display());
                    }
                    tracer.log(&event);

                    results.push(TestResult {
                        screenshot,
                        ..TestResult::failed(full_name, e.to_string()).with_duration(elapsed)
                    });
                }
            }
        }

        TestSuiteReport::from_results(&self.name, results).with_duration(started.elapsed().as_millis())
    }

    fn run_case(&self, case: &Case, h: &mut Harness) -> E2eResult<()> {
        if let Some(hook) = &self.before_each {
            hook(h)?;
        }
        (case.run)(h)
    }
}

fn capture_failure(h: &mut Harness, full_name: &str) -> Option<PathBuf> {
    match h.screenshot(&full_name.replace("::", "__")) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(error = %e, "could not capture failure screenshot");
            None
        }
    }
}

pub const SUITE_NAMES: &[&str] = &["menu", "organization", "properties", "project", "jobs", "invoice"];

/// All built-in suites in their natural order: projects are created before
/// the job and invoice suites read them back.
pub fn all() -> Vec<Suite> {
    SUITE_NAMES.iter().filter_map(|name| by_name(name)).collect()
}

pub fn by_name(name: &str) -> Option<Suite> {
    match name {
        "menu" => Some(menu::suite()),
        "organization" => Some(organization::suite()),
        "properties" => Some(properties::suite()),
        "project" => Some(project::suite()),
        "jobs" => Some(jobs::suite()),
        "invoice" => Some(invoice::suite()),
        _ => None,
    }
}

/// Dashboard URL from the settings, else from the organization fixture.
pub(crate) fn dashboard_url(h: &Harness) -> E2eResult<String> {
    first_configured(
        &h.settings.dashboard_url,
        &h.fixtures.organization.dashboard_url,
        "dashboard URL (DASHBOARD_URL)",
    )
}

pub(crate) fn organization_url(h: &Harness) -> E2eResult<String> {
    first_configured(
        &h.settings.organization_url,
        &h.fixtures.organization.organization_url,
        "organization URL (ORGANIZATION_URL)",
    )
}

fn first_configured(primary: &str, fallback: &str, what: &str) -> E2eResult<String> {
    [primary, fallback]
        .into_iter()
        .find(|u| !u.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| E2eError::check(format!("no {} configured", what)))
}

/// Go to the dashboard and wait until it is the current page.
pub(crate) fn open_dashboard(h: &mut Harness) -> E2eResult<()> {
    let url = dashboard_url(h)?;
    info!(%url, "navigating to dashboard");
    h.goto(&url)?;
    h.expect_url_eq(&url)?;
    info!("dashboard loaded");
    Ok(())
}
