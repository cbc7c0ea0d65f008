use std::path::PathBuf;

use tailorbird_e2e::browser::locator::Locator;
use tailorbird_e2e::browser::page::{ClickOptions, LoadState};
use tailorbird_e2e::browser::protocol::BrowserRequest;

const DRIVER: &str = include_str!("../driver/browser_server.js");

fn every_request() -> Vec<BrowserRequest> {
    let locator = Locator::css("button");
    vec![
        BrowserRequest::Goto {
            url: "https://app.example.com/".into(),
            wait_until: LoadState::Load,
        },
        BrowserRequest::WaitForLoadState {
            state: LoadState::NetworkIdle,
        },
        BrowserRequest::CurrentUrl,
        BrowserRequest::Title,
        BrowserRequest::Click {
            locator: locator.clone(),
            options: ClickOptions::default(),
        },
        BrowserRequest::Fill {
            locator: locator.clone(),
            value: "x".into(),
        },
        BrowserRequest::Type {
            locator: locator.clone(),
            text: "x".into(),
            delay_ms: None,
        },
        BrowserRequest::Press {
            locator: None,
            key: "Enter".into(),
        },
        BrowserRequest::Clear {
            locator: locator.clone(),
        },
        BrowserRequest::SetInputFiles {
            locator: locator.clone(),
            files: vec![PathBuf::from("a.png")],
        },
        BrowserRequest::ScrollIntoView {
            locator: locator.clone(),
        },
        BrowserRequest::Probe {
            locator: locator.clone(),
        },
        BrowserRequest::Attribute {
            locator: locator.clone(),
            name: "title".into(),
        },
        BrowserRequest::AllTexts {
            locator: locator.clone(),
        },
        BrowserRequest::Download {
            trigger: locator,
            save_dir: PathBuf::from("downloads"),
        },
        BrowserRequest::Evaluate {
            script: "1".into(),
        },
        BrowserRequest::Screenshot {
            path: PathBuf::from("a.png"),
        },
        BrowserRequest::SaveStorageState {
            path: PathBuf::from("state.json"),
        },
        BrowserRequest::AcceptNextDialog,
        BrowserRequest::TakeDialogMessage,
        BrowserRequest::TrackResponses,
        BrowserRequest::FailedResponses,
        BrowserRequest::Pause { duration_ms: 1 },
        BrowserRequest::Quit,
    ]
}

#[test]
fn driver_handles_every_request() {
    for request in every_request() {
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["cmd"], request.name());
        let case = format!("case '{}':", request.name());
        let check = format!("req.cmd === '{}'", request.name());
        assert!(
            DRIVER.contains(&case) || DRIVER.contains(&check),
            "driver has no handler for {}",
            request.name()
        );
    }
}

#[test]
fn driver_counts_every_non_2xx_response_as_failed() {
    assert!(DRIVER.contains("tracking && !response.ok()"));
    assert!(!DRIVER.contains("status() >= 400"));
}

#[test]
fn taking_the_dialog_message_does_not_arm_the_driver() {
    let start = DRIVER.find("case 'take_dialog_message':").unwrap();
    let rest = &DRIVER[start + 1..];
    let handler = &rest[..rest.find("case '").unwrap_or(rest.len())];
    assert!(handler.contains("lastDialog"));
    assert!(!handler.contains("dialogArmed = true"));
}
