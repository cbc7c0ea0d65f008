use regex::Regex;
use tailorbird_e2e::browser::locator::Locator;
use tailorbird_e2e::browser::mock::{MockElement, MockPage};
use tailorbird_e2e::error::E2eError;
use tailorbird_e2e::expect::{Expectation, expect_url, expect_url_eq};
use tailorbird_e2e::wait::{WaitConfig, WaitPolicy};

fn policy() -> WaitPolicy {
    WaitConfig::fast().expect
}

fn page_with(key: &str, element: MockElement) -> MockPage {
    let page = MockPage::new();
    page.dom().borrow_mut().set(key, element);
    page
}

fn expect<'p>(page: &'p mut MockPage, selector: &str) -> Expectation<'p> {
    Expectation::new(page, Locator::css(selector), policy())
}

// ============================================================================
// Visibility and state
// ============================================================================

#[test]
fn visible_retries_until_rendered() {
    let mut page = page_with("h1", MockElement::with_text("Properties").appearing_after(4));
    expect(&mut page, "h1").to_be_visible().unwrap();
}

#[test]
fn hidden_passes_for_missing_and_hidden() {
    let mut page = page_with(".mantine-Modal-content", MockElement::hidden());
    expect(&mut page, ".mantine-Modal-content").to_be_hidden().unwrap();
    expect(&mut page, ".not-rendered").to_be_hidden().unwrap();
}

#[test]
fn enabled_and_disabled() {
    let mut page = page_with("button.save", MockElement::new().disabled());
    expect(&mut page, "button.save").to_be_disabled().unwrap();

    let err = expect(&mut page, "button.save").to_be_enabled().unwrap_err();
    assert!(matches!(err, E2eError::AssertionFailed { .. }));

    // A missing element is neither enabled nor disabled.
    assert!(expect(&mut page, "button.gone").to_be_disabled().is_err());
}

// ============================================================================
// Text and values
// ============================================================================

#[test]
fn text_is_trimmed_before_comparison() {
    let mut page = page_with("h1", MockElement::with_text("  Dashboard \n"));
    expect(&mut page, "h1").to_have_text(" Dashboard").unwrap();
    expect(&mut page, "h1").to_contain_text("Dash").unwrap();
    expect(&mut page, "h1")
        .to_match_text(&Regex::new("^Dash.*d$").unwrap())
        .unwrap();
}

#[test]
fn text_failure_reports_last_observation() {
    let mut page = page_with("h1", MockElement::with_text("Dashboard"));
    let err = expect(&mut page, "h1").to_have_text("Properties").unwrap_err();
    match err {
        E2eError::AssertionFailed {
            locator,
            expectation,
            actual,
        } => {
            assert_eq!(locator, "h1");
            assert_eq!(expectation, "to have text \"Properties\"");
            assert_eq!(actual, "Some(\"Dashboard\")");
        }
        other => panic!("Expected AssertionFailed, got {:?}", other),
    }
}

#[test]
fn hidden_element_falls_back_to_text_content() {
    let mut page = page_with("span.count", MockElement::with_text("12"));
    page.dom().borrow_mut().hide("span.count");
    expect(&mut page, "span.count").to_have_text("12").unwrap();
}

#[test]
fn count_of_missing_element_is_zero() {
    let mut page = page_with(".ag-row", MockElement::new().count(3));
    expect(&mut page, ".ag-row").to_have_count(3).unwrap();
    expect(&mut page, ".deleted-row").to_have_count(0).unwrap();

    let err = expect(&mut page, ".ag-row").to_have_count(4).unwrap_err();
    assert!(err.to_string().contains("to have count 4, but got 3"));
}

#[test]
fn value_and_attribute() {
    let mut page = page_with(
        "input[name='amount']",
        MockElement::new().value("1000").attr("aria-invalid", "false"),
    );
    expect(&mut page, "input[name='amount']").to_have_value("1000").unwrap();
    expect(&mut page, "input[name='amount']")
        .to_have_attribute("aria-invalid", "false")
        .unwrap();

    let err = expect(&mut page, "input[name='amount']")
        .to_have_attribute("aria-invalid", "true")
        .unwrap_err();
    assert!(err.to_string().contains("but got Some(\"false\")"));
}

#[test]
fn with_timeout_overrides_deadline() {
    let mut page = page_with("h1", MockElement::with_text("Jobs").appearing_after(2));
    Expectation::new(&mut page, Locator::css("h1"), WaitPolicy::new(0).with_intervals(1, 1))
        .with_timeout(500)
        .to_be_visible()
        .unwrap();
}

// ============================================================================
// URL expectations
// ============================================================================

#[test]
fn url_pattern_and_equality() {
    let mut page = MockPage::with_url("https://app.example.com/projects?tab=jobs");
    expect_url(&mut page, &Regex::new("tab=jobs").unwrap(), &policy()).unwrap();
    expect_url_eq(&mut page, "https://app.example.com/projects?tab=jobs", &policy()).unwrap();
}

#[test]
fn url_failure_names_the_page_url() {
    let mut page = MockPage::with_url("https://app.example.com/login");
    let err = expect_url_eq(&mut page, "https://app.example.com/", &policy()).unwrap_err();
    match err {
        E2eError::AssertionFailed { locator, actual, .. } => {
            assert_eq!(locator, "page URL");
            assert_eq!(actual, "https://app.example.com/login");
        }
        other => panic!("Expected AssertionFailed, got {:?}", other),
    }
}
