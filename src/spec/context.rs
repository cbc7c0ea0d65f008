use std::time::Instant;

use crate::spec::spec_model::{AssertionResult, TestResult};

/// Execution state of one running spec.
#[derive(Debug, Clone)]
pub struct TestContext {
    name: String,
    started: Instant,

    /// Index of the step being executed (0-based)
    pub current_step: usize,

    /// Steps that started executing
    pub steps_run: usize,

    pub assertion_results: Vec<AssertionResult>,
}

impl TestContext {
    pub fn new(name: impl Into<String>) -> Self {
        TestContext {
            name: name.into(),
            started: Instant::now(),
            current_step: 0,
            steps_run: 0,
            assertion_results: Vec::new(),
        }
    }

    pub fn begin_step(&mut self, index: usize) {
        self.current_step = index;
        self.steps_run = index + 1;
    }

    pub fn record_assertions(&mut self, results: Vec<AssertionResult>) {
        self.assertion_results.extend(results);
    }

    pub fn all_passed(&self) -> bool {
        self.assertion_results.iter().all(|r| r.passed)
    }

    pub fn fail_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| !r.passed).count()
    }

    /// Close the run. An `error` fails the result regardless of assertions.
    pub fn finish(self, error: Option<String>) -> TestResult {
        let passed = error.is_none() && self.all_passed();
        TestResult {
            spec_name: self.name,
            passed,
            skipped: false,
            steps_run: self.steps_run,
            assertion_results: self.assertion_results,
            error,
            screenshot: None,
            duration_ms: Some(self.started.elapsed().as_millis()),
        }
    }
}
