use serde::{Deserialize, Serialize};

use crate::spec::spec_model::TestResult;

/// Aggregated results of one run: a built-in suite, several suites, or a
/// directory of spec files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteReport {
    pub suite_name: String,

    pub total: usize,

    pub passed: usize,

    pub failed: usize,

    pub skipped: usize,

    /// Total execution duration in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub test_results: Vec<TestResult>,
}

impl TestSuiteReport {
    /// Build a report; counts are derived from the results.
    pub fn from_results(suite_name: &str, results: Vec<TestResult>) -> Self {
        let total = results.len();
        let skipped = results.iter().filter(|r| r.skipped).count();
        let passed = results.iter().filter(|r| r.passed && !r.skipped).count();
        Self {
            suite_name: suite_name.to_string(),
            total,
            passed,
            failed: total - passed - skipped,
            skipped,
            duration_ms: None,
            test_results: results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Merge reports of several suites into one, keeping result order.
    pub fn merge(suite_name: &str, reports: Vec<TestSuiteReport>) -> Self {
        let duration: Option<u128> = reports.iter().map(|r| r.duration_ms).sum();
        let results = reports.into_iter().flat_map(|r| r.test_results).collect();
        let merged = Self::from_results(suite_name, results);
        match duration {
            Some(ms) => merged.with_duration(ms),
            None => merged,
        }
    }

    /// Skipped tests do not fail a run.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Format a duration in milliseconds as seconds with one decimal.
pub(crate) fn seconds(ms: u128) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}
