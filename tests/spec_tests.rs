use tailorbird_e2e::browser::locator::{Locator, TextMatch};
use tailorbird_e2e::browser::mock::{MockElement, MockPage};
use tailorbird_e2e::spec::{
    context::TestContext,
    runner::TestRunner,
    spec_model::{AssertionResult, AssertionSpec, Target, TestResult, TestSpec, TestStep},
};
use tailorbird_e2e::wait::{ElementState, WaitConfig};

// =========================================================================
// Helpers
// =========================================================================

fn create_property_spec() -> TestSpec {
    TestSpec {
        name: "create property".into(),
        start_url: "https://app.example.com/properties".into(),
        steps: vec![
            TestStep::Click {
                target: "button:has-text('Add Property')".into(),
            },
            TestStep::Fill {
                target: "input[name='name']".into(),
                value: "name_1700000000000".into(),
            },
            TestStep::SelectOption {
                target: "input[placeholder='Select type']".into(),
                option: "Garden Style".into(),
            },
            TestStep::Click {
                target: "button:has-text('Save')".into(),
            },
            TestStep::Assert {
                assertions: vec![
                    AssertionSpec::UrlContains {
                        expected: "/properties".into(),
                    },
                    AssertionSpec::Visible {
                        target: "text=Property created".into(),
                    },
                ],
            },
        ],
    }
}

fn scripted_property_page() -> MockPage {
    let mut page = MockPage::new();
    let dom = page.dom();
    {
        let mut dom = dom.borrow_mut();
        dom.set("button:has-text('Add Property')", MockElement::new());
        dom.set("input[name='name']", MockElement::new());
        dom.set("input[placeholder='Select type']", MockElement::new());
        dom.set("button:has-text('Save')", MockElement::new());
    }
    let option = Locator::role_matching("option", TextMatch::exact("Garden Style"));
    page.on_click("input[placeholder='Select type']", move |dom, _| {
        dom.set(&option, MockElement::with_text("Garden Style"));
    });
    page.on_click("button:has-text('Save')", |dom, _| {
        dom.set("text=Property created", MockElement::with_text("Property created"));
    });
    page
}

// =========================================================================
// Serde
// =========================================================================

#[test]
fn test_spec_yaml_roundtrip() {
    let spec = create_property_spec();

    let yaml = serde_yaml::to_string(&spec).expect("Failed to serialize TestSpec to YAML");
    let deserialized: TestSpec =
        serde_yaml::from_str(&yaml).expect("Failed to deserialize TestSpec from YAML");

    assert_eq!(spec, deserialized, "Roundtrip must produce identical spec");
}

#[test]
fn test_spec_deserialize_from_yaml_string() {
    let yaml = r#"
name: invoice tab
start_url: https://app.example.com/projects/42
steps:
  - action: click
    target: "role=tab[name='Invoices']"
  - action: wait_for
    target: "button:has-text('Add Invoice')"
    timeout_ms: 10000
  - action: settle
  - action: type
    target: "input[placeholder='Search']"
    text: mall
    delay_ms: 100
  - action: press
    key: Enter
  - action: upload
    target: "input[type='file']"
    files: [files/test_image.png]
  - action: wait
    duration_ms: 500
  - action: assert
    assertions:
      - type: url_matches
        pattern: "tab=invoices$"
      - type: count
        target: ".ag-center-cols-container .ag-row"
        expected: 3
      - type: value_equals
        target: "input[name='amount']"
        expected: "1000"
"#;
    let spec: TestSpec = serde_yaml::from_str(yaml).expect("Failed to parse YAML");

    assert_eq!(spec.name, "invoice tab");
    assert_eq!(spec.steps.len(), 8);
    assert_eq!(
        spec.steps[1],
        TestStep::WaitFor {
            target: "button:has-text('Add Invoice')".into(),
            state: ElementState::Visible,
            timeout_ms: Some(10_000),
        }
    );
    assert_eq!(spec.steps[2], TestStep::Settle);
    assert_eq!(
        spec.steps[4],
        TestStep::Press {
            target: None,
            key: "Enter".into()
        }
    );
    match &spec.steps[7] {
        TestStep::Assert { assertions } => {
            assert_eq!(assertions.len(), 3);
            assert_eq!(assertions[1].kind(), "Count");
        }
        other => panic!("Expected Assert step, got {:?}", other),
    }
}

#[test]
fn target_accepts_selector_or_locator_chain() {
    let yaml = r#"
- "button.save"
- steps:
    - op: find
      strategy: { by: role, role: button, name: { match: exact, value: Save } }
    - op: nth
      index: 0
"#;
    let targets: Vec<Target> = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(targets[0].to_locator(), Locator::css("button.save"));
    assert_eq!(
        targets[1].to_locator(),
        Locator::role_matching("button", TextMatch::exact("Save")).first()
    );
}

#[test]
fn wait_for_state_parses_snake_case() {
    let step: TestStep = serde_yaml::from_str(
        "action: wait_for\ntarget: \".mantine-Modal-content\"\nstate: detached\n",
    )
    .unwrap();
    assert_eq!(
        step,
        TestStep::WaitFor {
            target: ".mantine-Modal-content".into(),
            state: ElementState::Detached,
            timeout_ms: None,
        }
    );
}

#[test]
fn test_result_json_skips_empty_optionals() {
    let json = serde_json::to_value(TestResult::passed("menu::labels")).unwrap();
    assert_eq!(json["spec_name"], "menu::labels");
    assert!(json.get("screenshot").is_none());
    assert!(json.get("duration_ms").is_none());

    let parsed: TestResult = serde_json::from_str(
        r#"{"spec_name":"x","passed":true,"steps_run":0,"assertion_results":[],"error":null}"#,
    )
    .unwrap();
    assert!(!parsed.skipped);
}

// =========================================================================
// TestContext
// =========================================================================

#[test]
fn context_tracks_steps_and_failures() {
    let mut ctx = TestContext::new("ctx");
    ctx.begin_step(0);
    ctx.begin_step(1);
    ctx.record_assertions(vec![
        AssertionResult {
            step_index: 1,
            spec: AssertionSpec::UrlContains { expected: "a".into() },
            passed: true,
            actual: Some("https://a".into()),
            message: None,
        },
        AssertionResult {
            step_index: 1,
            spec: AssertionSpec::TitleContains { expected: "b".into() },
            passed: false,
            actual: Some("c".into()),
            message: Some("no".into()),
        },
    ]);
    assert_eq!(ctx.steps_run, 2);
    assert_eq!(ctx.fail_count(), 1);
    assert!(!ctx.all_passed());

    let result = ctx.finish(None);
    assert!(!result.passed);
    assert_eq!(result.steps_run, 2);
    assert!(result.duration_ms.is_some());
}

#[test]
fn context_error_fails_result() {
    let result = TestContext::new("err").finish(Some("boom".into()));
    assert!(!result.passed);
    assert_eq!(result.error.as_deref(), Some("boom"));
}

// =========================================================================
// TestRunner on a scripted page
// =========================================================================

#[test]
fn runner_executes_flow_and_passes() {
    let mut page = scripted_property_page();
    let dom = page.dom();

    let result = TestRunner::run(&create_property_spec(), &mut page, &WaitConfig::fast());

    assert!(result.passed, "unexpected failure: {:?}", result);
    assert_eq!(result.steps_run, 5);
    assert_eq!(result.assertion_results.len(), 2);
    assert!(result.assertion_results.iter().all(|a| a.passed));

    let dom = dom.borrow();
    assert!(dom.performed("goto https://app.example.com/properties"));
    assert!(dom.performed("fill input[name='name'] = name_1700000000000"));
    assert!(dom.performed("click role=option[name=\"Garden Style\"s]"));
}

#[test]
fn runner_records_failed_assertion_and_continues() {
    let mut page = MockPage::with_url("https://app.example.com/");
    page.dom().borrow_mut().title = "Tailorbird".into();
    page.dom().borrow_mut().set("h1", MockElement::with_text("Dashboard"));

    let spec = TestSpec {
        name: "dashboard".into(),
        start_url: "https://app.example.com/dashboard".into(),
        steps: vec![
            TestStep::Assert {
                assertions: vec![
                    AssertionSpec::TextEquals {
                        target: "h1".into(),
                        expected: "Properties".into(),
                    },
                    AssertionSpec::TitleContains {
                        expected: "Tailor".into(),
                    },
                ],
            },
            TestStep::Assert {
                assertions: vec![AssertionSpec::UrlContains {
                    expected: "dashboard".into(),
                }],
            },
        ],
    };

    let result = TestRunner::run(&spec, &mut page, &WaitConfig::fast());

    assert!(!result.passed);
    assert!(result.error.is_none());
    assert_eq!(result.steps_run, 2);
    assert_eq!(result.assertion_results.len(), 3);

    let text = &result.assertion_results[0];
    assert!(!text.passed);
    assert_eq!(text.actual.as_deref(), Some("Some(\"Dashboard\")"));
    assert!(text.message.as_deref().unwrap().contains("to have text"));

    assert!(result.assertion_results[1].passed);
    assert!(result.assertion_results[2].passed);
    assert_eq!(result.assertion_results[2].step_index, 1);
}

#[test]
fn runner_stops_on_step_error() {
    let mut page = MockPage::new();
    let spec = TestSpec {
        name: "missing button".into(),
        start_url: "https://app.example.com/".into(),
        steps: vec![
            TestStep::Click {
                target: "button.missing".into(),
            },
            TestStep::Goto {
                url: "https://app.example.com/never".into(),
            },
        ],
    };

    let result = TestRunner::run(&spec, &mut page, &WaitConfig::fast());

    assert!(!result.passed);
    assert_eq!(result.steps_run, 1);
    let error = result.error.unwrap();
    assert!(error.starts_with("Step 0 failed"), "{}", error);
    assert!(error.contains("button.missing"));
    assert!(!page.dom().borrow().performed("goto https://app.example.com/never"));
}

#[test]
fn invalid_url_pattern_is_a_failed_assertion_not_a_panic() {
    let mut page = MockPage::with_url("https://app.example.com/");
    let result = TestRunner::evaluate_one(
        &AssertionSpec::UrlMatches {
            pattern: "([unclosed".into(),
        },
        4,
        &mut page,
        &WaitConfig::fast().expect,
    );
    assert!(!result.passed);
    assert_eq!(result.step_index, 4);
    assert!(result.message.unwrap().starts_with("UrlMatches could not be evaluated"));
}

#[test]
fn hidden_and_count_assertions() {
    let mut page = MockPage::new();
    {
        let dom = page.dom();
        let mut dom = dom.borrow_mut();
        dom.set(".mantine-Modal-content", MockElement::hidden());
        dom.set(".ag-row", MockElement::new().count(3));
    }
    let policy = WaitConfig::fast().expect;

    let hidden = TestRunner::evaluate_one(
        &AssertionSpec::Hidden {
            target: ".mantine-Modal-content".into(),
        },
        0,
        &mut page,
        &policy,
    );
    assert!(hidden.passed);

    let count = TestRunner::evaluate_one(
        &AssertionSpec::Count {
            target: ".ag-row".into(),
            expected: 3,
        },
        0,
        &mut page,
        &policy,
    );
    assert!(count.passed);
    assert_eq!(count.actual.as_deref(), Some("3"));
}
