use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::browser::locator::Locator;
use crate::wait::ElementState;

/// A declarative flow, usually deserialized from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestSpec {
    /// Human-readable name for this test
    pub name: String,

    /// URL to navigate to before executing steps
    pub start_url: String,

    /// Ordered list of test steps to execute
    pub steps: Vec<TestStep>,
}

/// An element reference in a spec file: either a selector string
/// (`"button:has-text('Save')"`, `"xpath=//td"`) or a full locator chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Target {
    Selector(String),
    Chain(Locator),
}

impl Target {
    pub fn to_locator(&self) -> Locator {
        match self {
            Target::Selector(s) => Locator::css(s.as_str()),
            Target::Chain(l) => l.clone(),
        }
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

/// A single step in a test spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    Goto {
        url: String,
    },

    Click {
        target: Target,
    },

    /// Replace the field's value
    Fill {
        target: Target,
        value: String,
    },

    /// Type key by key, for inputs that react to keystrokes
    Type {
        target: Target,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay_ms: Option<u64>,
    },

    /// Press a key, on the target or on the focused element
    Press {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<Target>,
        key: String,
    },

    /// Open a dropdown and pick the option with this accessible name
    SelectOption {
        target: Target,
        option: String,
    },

    Upload {
        target: Target,
        files: Vec<PathBuf>,
    },

    WaitFor {
        target: Target,
        #[serde(default)]
        state: ElementState,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },

    /// Wait for the network to go idle
    Settle,

    /// Fixed pause. Prefer `wait_for`; kept for flows with nothing to observe.
    Wait {
        duration_ms: u64,
    },

    Assert {
        assertions: Vec<AssertionSpec>,
    },
}

/// A single assertion to evaluate against the page. Element assertions
/// retry until they hold or the expect timeout runs out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssertionSpec {
    UrlContains { expected: String },

    /// Current URL matches a regular expression
    UrlMatches { pattern: String },

    TitleContains { expected: String },

    Visible { target: Target },

    Hidden { target: Target },

    /// Trimmed text equals `expected`
    TextEquals { target: Target, expected: String },

    TextContains { target: Target, expected: String },

    Count { target: Target, expected: u32 },

    ValueEquals { target: Target, expected: String },
}

impl AssertionSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            AssertionSpec::UrlContains { .. } => "UrlContains",
            AssertionSpec::UrlMatches { .. } => "UrlMatches",
            AssertionSpec::TitleContains { .. } => "TitleContains",
            AssertionSpec::Visible { .. } => "Visible",
            AssertionSpec::Hidden { .. } => "Hidden",
            AssertionSpec::TextEquals { .. } => "TextEquals",
            AssertionSpec::TextContains { .. } => "TextContains",
            AssertionSpec::Count { .. } => "Count",
            AssertionSpec::ValueEquals { .. } => "ValueEquals",
        }
    }
}

/// Result of evaluating a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Which step this assertion belongs to (0-indexed)
    pub step_index: usize,

    pub spec: AssertionSpec,

    pub passed: bool,

    /// Actual value found (for debugging failed assertions)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of one spec run or one suite case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    /// Spec name, or `suite::case` for built-in suites
    pub spec_name: String,

    pub passed: bool,

    #[serde(default)]
    pub skipped: bool,

    pub steps_run: usize,

    pub assertion_results: Vec<AssertionResult>,

    /// Error message if the test failed due to an error (not assertion failure)
    pub error: Option<String>,

    /// Screenshot taken when the test failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
}

impl TestResult {
    pub fn passed(name: impl Into<String>) -> Self {
        TestResult {
            spec_name: name.into(),
            passed: true,
            skipped: false,
            steps_run: 0,
            assertion_results: Vec::new(),
            error: None,
            screenshot: None,
            duration_ms: None,
        }
    }

    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        TestResult {
            passed: false,
            error: Some(error.into()),
            ..Self::passed(name)
        }
    }

    /// Skipped tests count as neither passed nor failed.
    pub fn skipped(name: impl Into<String>) -> Self {
        TestResult {
            skipped: true,
            ..Self::passed(name)
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}
