use serde_json::json;
use tailorbird_e2e::browser::locator::{Locator, LocatorStep, Strategy, TextMatch, quote, xpath_literal};
use tailorbird_e2e::locators::{invoice, navigation, property};

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn css_and_xpath_render_raw_selectors() {
    assert_eq!(Locator::css("button.save").to_string(), "button.save");
    assert_eq!(
        Locator::xpath("//div[@role='row']").to_string(),
        "xpath=//div[@role='row']"
    );
    assert_eq!(Locator::from("tr.ag-row").expression(), "tr.ag-row");
}

#[test]
fn role_expressions_with_and_without_name() {
    assert_eq!(Locator::role("dialog").to_string(), "role=dialog");
    assert_eq!(
        Locator::role_named("tab", "Invoices").to_string(),
        "role=tab[name=\"Invoices\"i]"
    );
    assert_eq!(
        Locator::role_matching("option", TextMatch::exact("Garden Style")).to_string(),
        "role=option[name=\"Garden Style\"s]"
    );
    assert_eq!(
        Locator::role_matching("button", TextMatch::pattern_ci("add property")).to_string(),
        "role=button[name=/add property/i]"
    );
}

#[test]
fn text_label_placeholder_and_test_id() {
    assert_eq!(Locator::text("No results").to_string(), "text=\"No results\"i");
    assert_eq!(Locator::text_exact("Save").to_string(), "text=\"Save\"s");
    assert_eq!(Locator::label("City").to_string(), "label=\"City\"i");
    assert_eq!(
        Locator::placeholder("Search").to_string(),
        "placeholder=\"Search\"i"
    );
    assert_eq!(Locator::test_id("grid").to_string(), "testid=\"grid\"");
}

#[test]
fn chained_steps_join_with_arrows() {
    let row = Locator::css("[role=\"row\"]")
        .has_text("Mall")
        .has(Locator::css("button.delete"))
        .visible()
        .first();
    assert_eq!(
        row.to_string(),
        "[role=\"row\"] >> has-text=\"Mall\"i >> has=(button.delete) >> visible=true >> nth=0"
    );
    assert_eq!(Locator::css("button").last().to_string(), "button >> nth=-1");
    assert_eq!(
        Locator::css("tr").css_within("td").nth(2).to_string(),
        "tr >> td >> nth=2"
    );
}

#[test]
fn quote_escapes_quotes_and_backslashes() {
    assert_eq!(quote("Projects & Jobs"), "\"Projects & Jobs\"");
    assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(quote("a\\b"), "\"a\\\\b\"");
}

#[test]
fn xpath_literals_pick_a_delimiter_or_concat() {
    assert_eq!(xpath_literal("Year Built"), "\"Year Built\"");
    assert_eq!(xpath_literal("a\\b"), "\"a\\b\"");
    assert_eq!(xpath_literal("Unit \"A\""), "'Unit \"A\"'");
    assert_eq!(
        xpath_literal("Owner's \"Main\" Site"),
        "concat(\"Owner's \", '\"', \"Main\", '\"', \" Site\")"
    );
}

#[test]
fn overview_field_value_quotes_label_as_xpath() {
    let key = property::overview_field_value("Owner's \"Main\" Site").to_string();
    assert!(
        key.starts_with(
            "xpath=//p[text()=concat(\"Owner's \", '\"', \"Main\", '\"', \" Site\")]/./following-sibling::div//p"
        ),
        "{}",
        key
    );
    assert!(!key.contains("\\\""));
}

#[test]
fn page_locators_render_stable_keys() {
    assert_eq!(
        navigation::nav_link("Vendors").to_string(),
        "a.mantine-NavLink-root:has(span.mantine-NavLink-label:has-text(\"Vendors\"))"
    );
    assert_eq!(
        navigation::first_toggle().to_string(),
        ".mantine-AppShell-navbar [aria-expanded] >> nth=0"
    );
    assert_eq!(
        invoice::stat_value(invoice::PENDING_INVOICES).to_string(),
        "text=Pending Invoices >> .. >> p >> nth=0"
    );
}

// ============================================================================
// Wire shape
// ============================================================================

#[test]
fn serializes_tagged_steps() {
    let locator = Locator::role_named("button", "Save").first();
    let value = serde_json::to_value(&locator).unwrap();
    assert_eq!(
        value,
        json!({
            "steps": [
                {
                    "op": "find",
                    "strategy": {
                        "by": "role",
                        "role": "button",
                        "name": { "match": "contains", "value": "Save" }
                    }
                },
                { "op": "nth", "index": 0 }
            ]
        })
    );
}

#[test]
fn serialization_omits_empty_options() {
    let value = serde_json::to_value(Locator::role("grid").has_text("Mall").visible()).unwrap();
    let steps = value["steps"].as_array().unwrap();
    assert!(steps[0]["strategy"].get("name").is_none());
    assert_eq!(steps[1]["op"], "filter");
    assert!(steps[1].get("has").is_none());
    assert_eq!(steps[1]["has_text"]["match"], "contains");
    assert_eq!(steps[2], json!({ "op": "visible" }));
}

#[test]
fn deserializes_pattern_with_default_flags() {
    let step: LocatorStep = serde_json::from_value(json!({
        "op": "find",
        "strategy": { "by": "text", "text": { "match": "pattern", "source": "^Invoice" } }
    }))
    .unwrap();
    assert_eq!(
        step,
        LocatorStep::Find {
            strategy: Strategy::Text {
                text: TextMatch::pattern("^Invoice"),
            },
        }
    );
}

#[test]
fn nested_has_survives_json() {
    let locator = Locator::css(".mantine-Card-root").has(Locator::text_exact("Active"));
    let json = serde_json::to_string(&locator).unwrap();
    let parsed: Locator = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, locator);
}
