use regex::Regex;
use tracing::debug;

use crate::browser::locator::Locator;
use crate::browser::page::{ElementProbe, Page};
use crate::error::{E2eError, E2eResult};
use crate::wait::policy::WaitPolicy;

/// A retrying assertion over one locator.
///
/// Each `to_*` method re-probes the page until the expectation holds or the
/// policy deadline passes. On failure the error carries the locator
/// expression, the expectation and the last value that was observed.
pub struct Expectation<'p> {
    page: &'p mut dyn Page,
    locator: Locator,
    policy: WaitPolicy,
}

impl<'p> Expectation<'p> {
    pub fn new(page: &'p mut dyn Page, locator: Locator, policy: WaitPolicy) -> Self {
        Expectation {
            page,
            locator,
            policy,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.policy = self.policy.with_timeout(timeout_ms);
        self
    }

    /// Poll `observe` until `accept` holds; on timeout report the last observation.
    fn retry<T: std::fmt::Debug>(
        &mut self,
        expectation: String,
        mut observe: impl FnMut(&mut dyn Page, &Locator) -> E2eResult<T>,
        accept: impl Fn(&T) -> bool,
    ) -> E2eResult<T> {
        let mut last: Option<T> = None;
        let page = &mut *self.page;
        let locator = &self.locator;
        let outcome = self.policy.poll(&expectation, || {
            let observed = observe(page, locator)?;
            if accept(&observed) {
                return Ok(Some(observed));
            }
            last = Some(observed);
            Ok(None)
        });
        match outcome {
            Ok(value) => {
                debug!(locator = %self.locator, expectation, "expectation met");
                Ok(value)
            }
            Err(E2eError::Timeout { .. }) => Err(E2eError::AssertionFailed {
                locator: self.locator.to_string(),
                expectation,
                actual: last.map(|v| format!("{:?}", v)).unwrap_or_else(|| "nothing".into()),
            }),
            Err(other) => Err(other),
        }
    }

    fn retry_probe(&mut self, expectation: String, accept: impl Fn(&ElementProbe) -> bool) -> E2eResult<ElementProbe> {
        self.retry(expectation, |page, locator| page.probe(locator), accept)
    }

    pub fn to_be_visible(mut self) -> E2eResult<()> {
        self.retry_probe("to be visible".into(), |p| p.visible).map(|_| ())
    }

    pub fn to_be_hidden(mut self) -> E2eResult<()> {
        self.retry_probe("to be hidden".into(), |p| !p.visible).map(|_| ())
    }

    pub fn to_be_enabled(mut self) -> E2eResult<()> {
        self.retry_probe("to be enabled".into(), |p| p.attached() && p.enabled)
            .map(|_| ())
    }

    pub fn to_be_disabled(mut self) -> E2eResult<()> {
        self.retry_probe("to be disabled".into(), |p| p.attached() && !p.enabled)
            .map(|_| ())
    }

    /// Trimmed text of the first match equals `expected`.
    pub fn to_have_text(mut self, expected: &str) -> E2eResult<()> {
        let expected = expected.trim().to_string();
        self.retry(
            format!("to have text {:?}", expected),
            |page, locator| Ok(page.probe(locator)?.display_text()),
            |text| text.as_deref() == Some(expected.as_str()),
        )
        .map(|_| ())
    }

    pub fn to_contain_text(mut self, expected: &str) -> E2eResult<()> {
        let expected = expected.to_string();
        self.retry(
            format!("to contain text {:?}", expected),
            |page, locator| Ok(page.probe(locator)?.display_text()),
            |text| text.as_deref().is_some_and(|t| t.contains(expected.as_str())),
        )
        .map(|_| ())
    }

    pub fn to_match_text(mut self, pattern: &Regex) -> E2eResult<()> {
        self.retry(
            format!("to match /{}/", pattern.as_str()),
            |page, locator| Ok(page.probe(locator)?.display_text()),
            |text| text.as_deref().is_some_and(|t| pattern.is_match(t)),
        )
        .map(|_| ())
    }

    pub fn to_have_count(mut self, expected: u32) -> E2eResult<()> {
        self.retry(
            format!("to have count {}", expected),
            |page, locator| Ok(page.probe(locator)?.count),
            |count| *count == expected,
        )
        .map(|_| ())
    }

    pub fn to_have_value(mut self, expected: &str) -> E2eResult<()> {
        let expected = expected.to_string();
        self.retry(
            format!("to have value {:?}", expected),
            |page, locator| Ok(page.probe(locator)?.value),
            |value| value.as_deref() == Some(expected.as_str()),
        )
        .map(|_| ())
    }

    pub fn to_have_attribute(mut self, name: &str, expected: &str) -> E2eResult<()> {
        let expected = expected.to_string();
        let attr = name.to_string();
        self.retry(
            format!("to have attribute {}={:?}", name, expected),
            |page, locator| page.attribute(locator, &attr),
            |value| value.as_deref() == Some(expected.as_str()),
        )
        .map(|_| ())
    }
}

/// Retry until the current URL matches `pattern`.
pub fn expect_url(page: &mut dyn Page, pattern: &Regex, policy: &WaitPolicy) -> E2eResult<String> {
    let mut last = String::new();
    let expectation = format!("to match /{}/", pattern.as_str());
    let outcome = policy.poll(&expectation, || {
        let url = page.current_url()?;
        if pattern.is_match(&url) {
            return Ok(Some(url));
        }
        last = url;
        Ok(None)
    });
    url_outcome(outcome, expectation, last)
}

pub fn expect_url_eq(page: &mut dyn Page, expected: &str, policy: &WaitPolicy) -> E2eResult<String> {
    let mut last = String::new();
    let expectation = format!("to equal {:?}", expected);
    let outcome = policy.poll(&expectation, || {
        let url = page.current_url()?;
        if url == expected {
            return Ok(Some(url));
        }
        last = url;
        Ok(None)
    });
    url_outcome(outcome, expectation, last)
}

fn url_outcome(outcome: E2eResult<String>, expectation: String, last: String) -> E2eResult<String> {
    match outcome {
        Err(E2eError::Timeout { .. }) => Err(E2eError::AssertionFailed {
            locator: "page URL".into(),
            expectation,
            actual: last,
        }),
        other => other,
    }
}
