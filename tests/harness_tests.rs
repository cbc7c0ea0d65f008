use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tailorbird_e2e::browser::locator::Locator;
use tailorbird_e2e::browser::mock::{MockDom, MockElement, MockPage};
use tailorbird_e2e::browser::page::FailedResponse;
use tailorbird_e2e::error::E2eError;
use tailorbird_e2e::harness::{Harness, HarnessSettings, sanitize_file_name};
use tailorbird_e2e::wait::{WaitConfig, WaitPolicy};

fn harness() -> (Harness, Rc<RefCell<MockDom>>) {
    let page = MockPage::with_url("https://app.example.com/");
    let dom = page.dom();
    (Harness::new(Box::new(page), WaitConfig::fast()), dom)
}

fn harness_in(dir: &std::path::Path) -> (Harness, Rc<RefCell<MockDom>>) {
    let (h, dom) = harness();
    let settings = HarnessSettings {
        download_dir: dir.join("downloads"),
        artifact_dir: dir.join("artifacts"),
        files_dir: dir.join("files"),
        ..Default::default()
    };
    (h.with_settings(settings), dom)
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn goto_settles_after_load() {
    let (mut h, dom) = harness();
    h.goto("https://app.example.com/properties").unwrap();

    let dom = dom.borrow();
    assert_eq!(
        dom.log,
        ["goto https://app.example.com/properties", "load_state NetworkIdle"]
    );
    assert_eq!(dom.url, "https://app.example.com/properties");
}

#[test]
fn url_expectations_use_navigation_policy() {
    let (mut h, _dom) = harness();
    assert!(h.expect_url("example\\.com").is_ok());
    assert!(h.expect_url_eq("https://app.example.com/").is_ok());
    assert!(matches!(h.wait_url("(unclosed"), Err(E2eError::Regex(_))));
}

// ============================================================================
// Actions wait for their target
// ============================================================================

#[test]
fn click_waits_for_late_button() {
    let (mut h, dom) = harness();
    dom.borrow_mut()
        .set("button.create", MockElement::new().appearing_after(3));

    h.click(&Locator::css("button.create")).unwrap();
    assert!(dom.borrow().performed("click button.create"));
}

#[test]
fn click_on_disabled_button_times_out_without_clicking() {
    let (mut h, dom) = harness();
    dom.borrow_mut().set("button.save", MockElement::new().disabled());

    let err = h.click(&Locator::css("button.save")).unwrap_err();
    assert!(matches!(err, E2eError::Timeout { .. }));
    assert!(!dom.borrow().performed("click button.save"));
}

#[test]
fn forced_clicks_accept_hidden_elements() {
    let (mut h, dom) = harness();
    dom.borrow_mut().set(".ag-cell", MockElement::hidden());

    h.click_forced(&Locator::css(".ag-cell")).unwrap();
    h.dblclick_forced(&Locator::css(".ag-cell")).unwrap();

    let dom = dom.borrow();
    assert!(dom.performed("click .ag-cell"));
    assert!(dom.performed("dblclick .ag-cell"));
}

#[test]
fn fill_type_press_and_clear() {
    let (mut h, dom) = harness();
    dom.borrow_mut().set("input.search", MockElement::new());
    let search = Locator::css("input.search");

    h.fill(&search, "Mall").unwrap();
    h.expect(&search).to_have_value("Mall").unwrap();
    h.type_slowly(&search, "_1", 100).unwrap();
    h.expect(&search).to_have_value("Mall_1").unwrap();
    h.press(&search, "Enter").unwrap();
    h.press_key("Escape").unwrap();
    h.clear(&search).unwrap();
    h.expect(&search).to_have_value("").unwrap();

    let dom = dom.borrow();
    assert!(dom.performed("fill input.search = Mall"));
    assert!(dom.performed("type input.search = _1"));
    assert!(dom.performed("press input.search Enter"));
    assert!(dom.performed("press keyboard Escape"));
    assert!(dom.performed("clear input.search"));
}

#[test]
fn upload_only_needs_attachment() {
    let (mut h, dom) = harness();
    dom.borrow_mut().set("input[type=\"file\"]", MockElement::hidden());

    h.upload(
        &Locator::css("input[type=\"file\"]"),
        &[PathBuf::from("files/test_image.png")],
    )
    .unwrap();
    assert!(dom
        .borrow()
        .performed("upload input[type=\"file\"] = files/test_image.png"));
}

// ============================================================================
// Visibility checks
// ============================================================================

#[test]
fn is_visible_within_reports_false_instead_of_failing() {
    let (mut h, dom) = harness();
    dom.borrow_mut().set("button.export", MockElement::new());

    assert!(h.is_visible_within(&Locator::css("button.export"), 1_000).unwrap());
    assert!(!h.is_visible_within(&Locator::css("button.missing"), 1_000).unwrap());
    assert!(h.is_visible(&Locator::css("button.export")).unwrap());
}

#[test]
fn fast_config_ceiling_bounds_explicit_deadlines() {
    let (mut h, _dom) = harness();
    let started = Instant::now();
    assert!(!h.is_visible_within(&Locator::css(".never"), 30_000).unwrap());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn explicit_deadline_outlasts_shorter_navigation_deadline() {
    let page = MockPage::with_url("https://app.example.com/");
    page.dom()
        .borrow_mut()
        .set("input.search", MockElement::new().appearing_after(6));
    let policy = WaitPolicy::new(20).with_intervals(10, 10);
    let waits = WaitConfig {
        expect: policy,
        action: policy,
        navigation: policy,
    };
    let mut h = Harness::new(Box::new(page), waits);

    assert!(h.is_visible_within(&Locator::css("input.search"), 2_000).unwrap());
}

#[test]
fn wait_any_returns_first_visible_candidate() {
    let (mut h, dom) = harness();
    dom.borrow_mut().set("text=No results.", MockElement::new());
    let row = Locator::css("tr.row");
    let empty = Locator::css("text=No results.");
    assert_eq!(h.wait_any(&[&row, &empty]).unwrap(), 1);
}

// ============================================================================
// Reads
// ============================================================================

#[test]
fn text_reads_are_trimmed() {
    let (mut h, dom) = harness();
    {
        let mut dom = dom.borrow_mut();
        dom.set("h1", MockElement::with_text("  Projects  "));
        dom.set("td.name", MockElement::new().texts(&["Mall ", " ", "Tower"]));
        dom.set("div.empty", MockElement::new());
    }

    assert_eq!(h.text_of(&Locator::css("h1")).unwrap(), "Projects");
    assert_eq!(h.texts_of(&Locator::css("td.name")).unwrap(), ["Mall", "Tower"]);
    assert!(matches!(
        h.text_of(&Locator::css("div.empty")),
        Err(E2eError::ElementNotFound { .. })
    ));
}

#[test]
fn count_attribute_and_enabled() {
    let (mut h, dom) = harness();
    {
        let mut dom = dom.borrow_mut();
        dom.set(".ag-row", MockElement::new().count(4));
        dom.set("button.toggle", MockElement::new().attr("aria-expanded", "true").disabled());
    }

    assert_eq!(h.count(&Locator::css(".ag-row")).unwrap(), 4);
    assert_eq!(h.count(&Locator::css(".none")).unwrap(), 0);
    assert_eq!(
        h.attribute(&Locator::css("button.toggle"), "aria-expanded").unwrap().as_deref(),
        Some("true")
    );
    assert!(!h.is_enabled(&Locator::css("button.toggle")).unwrap());
    assert!(!h.is_enabled(&Locator::css(".none")).unwrap());
}

#[test]
fn wait_stable_count_and_options() {
    let (mut h, dom) = harness();
    {
        let mut dom = dom.borrow_mut();
        dom.set(".type-button", MockElement::new().count(5));
        dom.set(".option", MockElement::new().texts(&["Sumit_automation", "Other"]));
    }
    assert_eq!(h.wait_stable_count(&Locator::css(".type-button")).unwrap(), 5);
    assert_eq!(h.wait_options(&Locator::css(".option")).unwrap(), ["Sumit_automation", "Other"]);
}

// ============================================================================
// Files: screenshots and downloads
// ============================================================================

#[test]
fn screenshot_lands_in_artifact_dir() {
    let dir = tempfile::tempdir().unwrap();
    let (mut h, dom) = harness_in(dir.path());

    let path = h.screenshot("project::export projects").unwrap();

    assert_eq!(path, dir.path().join("artifacts/project__export_projects.png"));
    assert!(dir.path().join("artifacts").is_dir());
    assert!(dom
        .borrow()
        .performed(&format!("screenshot {}", path.display())));
}

#[test]
fn sanitize_keeps_safe_characters() {
    assert_eq!(sanitize_file_name("menu__verify all-menu_1"), "menu__verify_all-menu_1");
    assert_eq!(sanitize_file_name("a/b\\c:d"), "a_b_c_d");
}

#[test]
fn download_saves_under_download_dir() {
    let dir = tempfile::tempdir().unwrap();
    let (mut h, dom) = harness_in(dir.path());
    {
        let mut dom = dom.borrow_mut();
        dom.set("button.export", MockElement::new());
        dom.downloads
            .push_back(("projects.csv".into(), "Name,Status\nMall,Active\n".into()));
    }

    let download = h.download(&Locator::css("button.export")).unwrap();

    assert_eq!(download.suggested_filename, "projects.csv");
    assert_eq!(download.path, dir.path().join("downloads/projects.csv"));
    let saved = std::fs::read_to_string(&download.path).unwrap();
    assert!(saved.starts_with("Name,Status"));
}

#[test]
fn download_without_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (mut h, dom) = harness_in(dir.path());
    dom.borrow_mut().set("button.export", MockElement::new());

    let err = h.download(&Locator::css("button.export")).unwrap_err();
    assert!(matches!(err, E2eError::Download(_)));
}

// ============================================================================
// Network and dialogs
// ============================================================================

#[test]
fn failed_responses_become_a_check_failure() {
    let (mut h, dom) = harness();
    h.track_responses().unwrap();
    assert!(h.assert_no_failed_responses().is_ok());

    dom.borrow_mut().failed.push(FailedResponse {
        url: "https://api.example.com/projects".into(),
        status: 500,
    });
    let err = h.assert_no_failed_responses().unwrap_err();
    match err {
        E2eError::CheckFailed(msg) => {
            assert!(msg.starts_with("API errors found"));
            assert!(msg.contains("https://api.example.com/projects"));
            assert!(msg.contains("500"));
        }
        other => panic!("Expected CheckFailed, got {:?}", other),
    }
    assert!(dom.borrow().performed("track_responses"));
}

#[test]
fn dialog_message_is_returned_once() {
    let (mut h, dom) = harness();
    dom.borrow_mut().dialog_message = Some("Delete this row?".into());

    assert_eq!(h.accept_next_dialog().unwrap().as_deref(), Some("Delete this row?"));
    assert_eq!(h.accept_next_dialog().unwrap(), None);
}

#[test]
fn taking_the_dialog_message_does_not_accept_the_next_one() {
    let (mut h, dom) = harness();

    h.accept_next_dialog().unwrap();
    assert!(dom.borrow_mut().raise_dialog("Submit this bid?"));

    assert_eq!(h.take_dialog_message().unwrap().as_deref(), Some("Submit this bid?"));
    assert!(!dom.borrow().dialog_armed);
    assert!(!dom.borrow_mut().raise_dialog("Leave without saving?"));

    assert_eq!(h.take_dialog_message().unwrap(), None);
    assert!(dom.borrow().performed("take_dialog"));
}

#[test]
fn close_and_pause_reach_the_page() {
    let (mut h, dom) = harness();
    h.pause(250).unwrap();
    h.close().unwrap();
    let dom = dom.borrow();
    assert!(dom.performed("pause 250"));
    assert!(dom.performed("close"));
}
