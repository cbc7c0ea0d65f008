use regex::Regex;
use tracing::{debug, info, warn};

use crate::browser::locator::{Locator, TextMatch};
use crate::browser::page::{ClickOptions, LoadState, Page};
use crate::error::{E2eError, E2eResult};
use crate::expect::{Expectation, expect_url};
use crate::spec::context::TestContext;
use crate::spec::spec_model::{AssertionResult, AssertionSpec, TestResult, TestSpec, TestStep};
use crate::wait::{ElementState, WaitConfig, WaitPolicy, settle, wait_for, wait_for_enabled};

/// Executes a [`TestSpec`] step by step on any [`Page`].
pub struct TestRunner;

impl TestRunner {
    /// Run a complete spec. Step errors stop the run and are reported in
    /// `error`; failed assertions are recorded and the run continues.
    pub fn run(spec: &TestSpec, page: &mut dyn Page, waits: &WaitConfig) -> TestResult {
        let mut ctx = TestContext::new(&spec.name);
        info!(spec = %spec.name, steps = spec.steps.len(), "running spec");

        if let Err(e) = page.goto(&spec.start_url, LoadState::Load) {
            return ctx.finish(Some(format!("Failed to navigate to start_url: {}", e)));
        }

        for (i, step) in spec.steps.iter().enumerate() {
            ctx.begin_step(i);
            debug!(step = i, ?step, "executing step");
            if let Err(e) = Self::execute_step(step, i, page, waits, &mut ctx) {
                warn!(spec = %spec.name, step = i, error = %e, "step failed");
                return ctx.finish(Some(format!("Step {} failed: {}", i, e)));
            }
        }

        let result = ctx.finish(None);
        info!(spec = %spec.name, passed = result.passed, "spec finished");
        result
    }

    fn execute_step(
        step: &TestStep,
        step_index: usize,
        page: &mut dyn Page,
        waits: &WaitConfig,
        ctx: &mut TestContext,
    ) -> E2eResult<()> {
        match step {
            TestStep::Goto { url } => page.goto(url, LoadState::Load),

            TestStep::Click { target } => {
                let locator = target.to_locator();
                wait_for_enabled(page, &locator, &waits.action)?;
                page.click(&locator, ClickOptions::default())
            }

            TestStep::Fill { target, value } => {
                let locator = target.to_locator();
                wait_for(page, &locator, ElementState::Visible, &waits.action)?;
                page.fill(&locator, value)
            }

            TestStep::Type {
                target,
                text,
                delay_ms,
            } => {
                let locator = target.to_locator();
                wait_for(page, &locator, ElementState::Visible, &waits.action)?;
                page.type_text(&locator, text, *delay_ms)
            }

            TestStep::Press { target, key } => match target {
                Some(t) => {
                    let locator = t.to_locator();
                    wait_for(page, &locator, ElementState::Visible, &waits.action)?;
                    page.press(Some(&locator), key)
                }
                None => page.press(None, key),
            },

            TestStep::SelectOption { target, option } => {
                let dropdown = target.to_locator();
                wait_for_enabled(page, &dropdown, &waits.action)?;
                page.click(&dropdown, ClickOptions::default())?;
                let choice = Self::option_locator(option);
                wait_for(page, &choice, ElementState::Visible, &waits.action)?;
                page.click(&choice, ClickOptions::default())
            }

            TestStep::Upload { target, files } => {
                let locator = target.to_locator();
                wait_for(page, &locator, ElementState::Attached, &waits.action)?;
                page.set_input_files(&locator, files)
            }

            TestStep::WaitFor {
                target,
                state,
                timeout_ms,
            } => {
                let policy = timeout_ms.map_or(waits.action, |ms| waits.action.with_timeout(ms));
                wait_for(page, &target.to_locator(), *state, &policy).map(|_| ())
            }

            TestStep::Settle => settle(page),

            TestStep::Wait { duration_ms } => page.pause(*duration_ms),

            TestStep::Assert { assertions } => {
                let results = assertions
                    .iter()
                    .map(|spec| Self::evaluate_one(spec, step_index, page, &waits.expect))
                    .collect();
                ctx.record_assertions(results);
                Ok(())
            }
        }
    }

    /// Dropdown options are matched by exact accessible name.
    fn option_locator(option: &str) -> Locator {
        Locator::role_matching("option", TextMatch::exact(option))
    }

    /// Evaluate one assertion. Never fails: errors become a failed result.
    pub fn evaluate_one(
        spec: &AssertionSpec,
        step_index: usize,
        page: &mut dyn Page,
        policy: &WaitPolicy,
    ) -> AssertionResult {
        let outcome = Self::check(spec, page, policy);
        let (passed, actual, message) = match outcome {
            Ok(actual) => (true, Some(actual), None),
            Err(e) => match &e {
                E2eError::AssertionFailed { actual, .. } => (false, Some(actual.clone()), Some(e.to_string())),
                _ => (false, None, Some(format!("{} could not be evaluated: {}", spec.kind(), e))),
            },
        };
        AssertionResult {
            step_index,
            spec: spec.clone(),
            passed,
            actual,
            message,
        }
    }

    /// Returns the observed value when the assertion holds.
    fn check(spec: &AssertionSpec, page: &mut dyn Page, policy: &WaitPolicy) -> E2eResult<String> {
        match spec {
            AssertionSpec::UrlContains { expected } => {
                let pattern = Regex::new(&regex::escape(expected))?;
                expect_url(page, &pattern, policy)
            }

            AssertionSpec::UrlMatches { pattern } => expect_url(page, &Regex::new(pattern)?, policy),

            AssertionSpec::TitleContains { expected } => Self::expect_title(page, expected, policy),

            AssertionSpec::Visible { target } => Expectation::new(page, target.to_locator(), *policy)
                .to_be_visible()
                .map(|_| "visible".to_string()),

            AssertionSpec::Hidden { target } => Expectation::new(page, target.to_locator(), *policy)
                .to_be_hidden()
                .map(|_| "hidden".to_string()),

            AssertionSpec::TextEquals { target, expected } => {
                Expectation::new(page, target.to_locator(), *policy)
                    .to_have_text(expected)
                    .map(|_| expected.clone())
            }

            AssertionSpec::TextContains { target, expected } => {
                Expectation::new(page, target.to_locator(), *policy)
                    .to_contain_text(expected)
                    .map(|_| expected.clone())
            }

            AssertionSpec::Count { target, expected } => Expectation::new(page, target.to_locator(), *policy)
                .to_have_count(*expected)
                .map(|_| expected.to_string()),

            AssertionSpec::ValueEquals { target, expected } => {
                Expectation::new(page, target.to_locator(), *policy)
                    .to_have_value(expected)
                    .map(|_| expected.clone())
            }
        }
    }

    fn expect_title(page: &mut dyn Page, expected: &str, policy: &WaitPolicy) -> E2eResult<String> {
        let mut last = String::new();
        let expectation = format!("to contain {:?}", expected);
        let outcome = policy.poll(&expectation, || {
            let title = page.title()?;
            if title.contains(expected) {
                return Ok(Some(title));
            }
            last = title;
            Ok(None)
        });
        match outcome {
            Err(E2eError::Timeout { .. }) => Err(E2eError::AssertionFailed {
                locator: "page title".into(),
                expectation,
                actual: format!("{:?}", last),
            }),
            other => other,
        }
    }
}
