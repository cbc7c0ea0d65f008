use std::path::Path;

use chrono::NaiveDate;
use regex::Regex;
use tailorbird_e2e::data::export::{check_export_name, fingerprint, is_accepted_export, parse_csv, read_csv};
use tailorbird_e2e::data::fixtures::{Fixtures, LeftPanelFixture, OrganizationFixture, fill_dynamic};
use tailorbird_e2e::data::generate;
use tailorbird_e2e::data::scratch::{PROJECT_DATA_FILE, ProjectRecord, ScratchStore};
use tailorbird_e2e::data::upload::{TEST_IMAGE_NAME, TINY_PNG, ensure_test_image};
use tailorbird_e2e::error::E2eError;

// ============================================================================
// Exports
// ============================================================================

#[test]
fn export_extensions() {
    assert!(is_accepted_export("Properties_2026.xlsx"));
    assert!(is_accepted_export("projects.csv"));
    assert!(is_accepted_export("contract.pdf"));
    assert!(!is_accepted_export("projects.json"));
    assert!(!is_accepted_export("no_extension"));
    assert!(matches!(check_export_name("x.txt"), Err(E2eError::Download(_))));
}

#[test]
fn csv_headers_rows_and_lookup() {
    let table = parse_csv("\"Project Name\", Status ,Budget\nMall,Active,100\n\nTower,\"Draft\"\nShort\n").unwrap();

    assert_eq!(table.headers, ["Project Name", "Status", "Budget"]);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[1]["Status"], "Draft");
    assert_eq!(table.rows[1]["Budget"], "");
    assert_eq!(table.rows[2]["Project Name"], "Short");

    assert_eq!(table.find_column("name"), Some("Project Name"));
    assert_eq!(table.find_column("STATUS"), Some("Status"));
    assert_eq!(table.find_column("owner"), None);

    let active = table.rows_where("Status", "Active");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["Project Name"], "Mall");
}

#[test]
fn quoted_cells_keep_commas_and_quotes() {
    let table = parse_csv(
        "Name,Property,Address\n\"Garden, Court\",Sumit_automation,\"12 \"\"Elm\"\" St, Unit 4\"\n",
    )
    .unwrap();

    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    assert_eq!(row["Name"], "Garden, Court");
    assert_eq!(row["Property"], "Sumit_automation");
    assert_eq!(row["Address"], "12 \"Elm\" St, Unit 4");
    assert_eq!(table.rows_where("Property", "Sumit_automation").len(), 1);
}

#[test]
fn empty_csv_has_no_headers() {
    let table = parse_csv("  \n").unwrap();
    assert!(table.headers.is_empty());
    assert!(table.rows.is_empty());
}

#[test]
fn read_csv_and_fingerprint_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.csv");
    std::fs::write(&path, "abc").unwrap();

    assert_eq!(
        fingerprint(&path).unwrap(),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
    assert_eq!(read_csv(&path).unwrap().headers, ["abc"]);
    assert!(fingerprint(&dir.path().join("missing.csv")).is_err());
}

// ============================================================================
// Scratch files
// ============================================================================

#[test]
fn project_record_roundtrip_uses_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScratchStore::new(dir.path());
    let record = ProjectRecord {
        project_name: "Automa_Test_260301_AB12CD".into(),
        description: "Auto_Description_XY34".into(),
        property: "Sumit_automation".into(),
        created_at: "2026-03-01T10:00:00+00:00".into(),
    };

    let path = store.save_project(&record).unwrap();
    assert_eq!(path, dir.path().join(PROJECT_DATA_FILE));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"projectName\""));
    assert!(raw.contains("\"createdAt\""));
    assert_eq!(store.load_project().unwrap(), record);
}

#[test]
fn project_record_without_property_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScratchStore::new(dir.path());
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        store.path_of(PROJECT_DATA_FILE),
        r#"{ "projectName": "Automa_Test_260301_AB12CD", "description": "d", "createdAt": "2026-03-01T10:00:00+00:00" }"#,
    )
    .unwrap();

    let record = store.load_project().unwrap();
    assert_eq!(record.project_name, "Automa_Test_260301_AB12CD");
    assert!(record.property.is_empty());
}

#[test]
fn property_and_last_url_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScratchStore::new(dir.path());

    store.save_property("name_1700000000000").unwrap();
    store.save_last_url("https://app.example.com/projects/42").unwrap();

    assert_eq!(store.load_property_name().unwrap(), "name_1700000000000");
    assert_eq!(store.load_last_url().unwrap(), "https://app.example.com/projects/42");
    assert_eq!(store.root(), dir.path());
}

#[test]
fn missing_scratch_file_is_a_scratch_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScratchStore::new(dir.path());
    match store.load_project() {
        Err(E2eError::Scratch { path, reason }) => {
            assert!(path.ends_with("projectData.json"));
            assert!(reason.contains("has the suite that writes it run?"));
        }
        other => panic!("Expected Scratch error, got {:?}", other),
    }
}

#[test]
fn corrupt_scratch_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScratchStore::new(dir.path());
    std::fs::write(store.path_of("property.json"), "{ not json").unwrap();
    assert!(matches!(store.load_property_name(), Err(E2eError::JsonParse { .. })));
}

// ============================================================================
// Fixtures
// ============================================================================

#[test]
fn fixtures_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(Fixtures::load(dir.path()).unwrap(), Fixtures::default());
}

#[test]
fn bundled_fixture_files_match_defaults() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let fixtures = Fixtures::load(&dir).unwrap();
    assert_eq!(fixtures.organization, OrganizationFixture::default());
    assert_eq!(fixtures.left_panel, LeftPanelFixture::default());
}

#[test]
fn partial_fixture_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("left_panel.json"),
        r#"{ "expectedLabels": ["Dashboard", "Reports"] }"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("organization.json"), r#"{ "roles": ["Owner", "Viewer"] }"#).unwrap();

    let fixtures = Fixtures::load(dir.path()).unwrap();
    assert_eq!(fixtures.left_panel.expected_labels, ["Dashboard", "Reports"]);
    assert_eq!(fixtures.left_panel.menu_items.len(), 4);
    assert_eq!(fixtures.organization.roles, ["Owner", "Viewer"]);
    assert_eq!(fixtures.organization.invite_button_text, "Invite");
}

#[test]
fn invalid_fixture_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("organization.json"), "[1, 2").unwrap();
    assert!(matches!(Fixtures::load(dir.path()), Err(E2eError::JsonParse { .. })));
}

#[test]
fn fill_dynamic_replaces_every_placeholder() {
    assert_eq!(
        fill_dynamic("Sent to {{email}}. Resend to {{email}}?", "a@b.com"),
        "Sent to a@b.com. Resend to a@b.com?"
    );
    assert_eq!(fill_dynamic("No placeholder", "a@b.com"), "No placeholder");
}

#[test]
fn toggled_role_alternates() {
    let fixture = OrganizationFixture::default();
    assert_eq!(fixture.toggled_role("Admin"), "Member");
    assert_eq!(fixture.toggled_role("Member"), "Admin");
    assert_eq!(fixture.toggled_role("Viewer"), "Admin");

    let no_roles = OrganizationFixture {
        roles: Vec::new(),
        ..Default::default()
    };
    assert_eq!(no_roles.toggled_role("Admin"), "Admin");
}

// ============================================================================
// Generated values
// ============================================================================

#[test]
fn names_and_emails_follow_their_shapes() {
    let name = Regex::new(r"^Automa_Test_\d{6}_[A-Z0-9]{6}$").unwrap();
    assert!(name.is_match(&generate::project_name(generate::DEFAULT_PROJECT_PREFIX)));

    let email = Regex::new(r"^qa_\d{6}_[A-Z0-9]{6}@gmail\.com$").unwrap();
    assert!(email.is_match(&generate::email("qa")));

    let stamped = Regex::new(r"^invite_\d{13}@example\.com$").unwrap();
    assert!(stamped.is_match(&generate::timestamped_email("invite", "example.com")));

    assert_eq!(generate::random_suffix(8).len(), 8);
    assert_ne!(generate::project_name("P"), generate::project_name("P"));
}

#[test]
fn descriptions_default_their_base() {
    let default = Regex::new(r"^Auto_Description_[A-Z0-9]{4}$").unwrap();
    assert!(default.is_match(&generate::description(None)));
    assert!(default.is_match(&generate::description(Some(""))));
    assert!(generate::description(Some("Scope")).starts_with("Scope_"));
}

#[test]
fn dates_format_for_inputs_and_pickers() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
    assert_eq!(generate::format_dmy(date), "05-03-2026");
    assert_eq!(generate::picker_label(date), "5 March 2026");
    assert_eq!(
        generate::days_after(date, 30),
        NaiveDate::from_ymd_opt(2026, 4, 4).unwrap()
    );
}

#[test]
fn end_date_is_thirty_days_after_start() {
    let start = NaiveDate::parse_from_str(&generate::start_date(), "%d-%m-%Y").unwrap();
    let end = NaiveDate::parse_from_str(&generate::end_date(), "%d-%m-%Y").unwrap();
    assert_eq!((end - start).num_days(), 30);
}

#[test]
fn filter_values_are_snake_case() {
    assert_eq!(generate::normalize_filter_value("Garden Style"), "garden_style");
    assert_eq!(generate::normalize_filter_value("  High   Rise "), "high_rise");
    assert_eq!(generate::normalize_filter_value("Mid-Rise"), "mid-rise");
}

#[test]
fn bid_cells_and_digits() {
    assert_eq!(generate::bid_cell_value(0), "Appliance");
    assert!(generate::bid_cell_value(2).starts_with("UpdatedValue_"));
    assert_eq!(generate::bid_cell_value(4), "110");
    assert_eq!(generate::bid_cell_value(6), "Updated_7");

    for _ in 0..50 {
        let n = generate::random_three_digits();
        assert!((100..1000).contains(&n));
    }
}

#[test]
fn choose_option_prefers_configured_value() {
    let options: Vec<String> = ["Sumit_automation", "Other", "Third"].iter().map(|s| s.to_string()).collect();

    assert_eq!(
        generate::choose_option(&options, Some("Other")).map(String::as_str),
        Some("Other")
    );
    let any = generate::choose_option(&options, Some("Not offered")).unwrap();
    assert!(options.contains(any));
    assert_eq!(generate::choose_option(&[], None), None);

    assert_eq!(generate::random_index(0), 0);
    assert!(generate::random_index(3) < 3);
}

// ============================================================================
// Upload image
// ============================================================================

#[test]
fn test_image_is_created_once() {
    let dir = tempfile::tempdir().unwrap();
    let files = dir.path().join("files");

    let path = ensure_test_image(&files).unwrap();
    assert_eq!(path, files.join(TEST_IMAGE_NAME));
    assert_eq!(std::fs::read(&path).unwrap(), TINY_PNG);

    std::fs::write(&path, b"custom").unwrap();
    ensure_test_image(&files).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"custom");
}
