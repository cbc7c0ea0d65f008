use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::browser::locator::Locator;
use crate::browser::page::{ClickOptions, LoadState};

/// Request sent to browser_server.js over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BrowserRequest {
    Goto {
        url: String,
        wait_until: LoadState,
    },
    WaitForLoadState {
        state: LoadState,
    },
    CurrentUrl,
    Title,
    Click {
        locator: Locator,
        options: ClickOptions,
    },
    Fill {
        locator: Locator,
        value: String,
    },
    Type {
        locator: Locator,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        delay_ms: Option<u64>,
    },
    Press {
        #[serde(skip_serializing_if = "Option::is_none")]
        locator: Option<Locator>,
        key: String,
    },
    Clear {
        locator: Locator,
    },
    SetInputFiles {
        locator: Locator,
        files: Vec<PathBuf>,
    },
    ScrollIntoView {
        locator: Locator,
    },
    Probe {
        locator: Locator,
    },
    Attribute {
        locator: Locator,
        name: String,
    },
    AllTexts {
        locator: Locator,
    },
    Download {
        trigger: Locator,
        save_dir: PathBuf,
    },
    Evaluate {
        script: String,
    },
    Screenshot {
        path: PathBuf,
    },
    SaveStorageState {
        path: PathBuf,
    },
    AcceptNextDialog,
    TakeDialogMessage,
    TrackResponses,
    FailedResponses,
    Pause {
        duration_ms: u64,
    },
    Quit,
}

impl BrowserRequest {
    /// Command name as it appears on the wire, for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BrowserRequest::Goto { .. } => "goto",
            BrowserRequest::WaitForLoadState { .. } => "wait_for_load_state",
            BrowserRequest::CurrentUrl => "current_url",
            BrowserRequest::Title => "title",
            BrowserRequest::Click { .. } => "click",
            BrowserRequest::Fill { .. } => "fill",
            BrowserRequest::Type { .. } => "type",
            BrowserRequest::Press { .. } => "press",
            BrowserRequest::Clear { .. } => "clear",
            BrowserRequest::SetInputFiles { .. } => "set_input_files",
            BrowserRequest::ScrollIntoView { .. } => "scroll_into_view",
            BrowserRequest::Probe { .. } => "probe",
            BrowserRequest::Attribute { .. } => "attribute",
            BrowserRequest::AllTexts { .. } => "all_texts",
            BrowserRequest::Download { .. } => "download",
            BrowserRequest::Evaluate { .. } => "evaluate",
            BrowserRequest::Screenshot { .. } => "screenshot",
            BrowserRequest::SaveStorageState { .. } => "save_storage_state",
            BrowserRequest::AcceptNextDialog => "accept_next_dialog",
            BrowserRequest::TakeDialogMessage => "take_dialog_message",
            BrowserRequest::TrackResponses => "track_responses",
            BrowserRequest::FailedResponses => "failed_responses",
            BrowserRequest::Pause { .. } => "pause",
            BrowserRequest::Quit => "quit",
        }
    }
}

/// Response received from browser_server.js over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub ready: Option<bool>,
}

/// Options passed to browser_server.js on its command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchOptions {
    pub headless: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_state: Option<PathBuf>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// CSS zoom applied to the application shell after every load, e.g. "70%"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_zoom: Option<String>,
    pub default_timeout_ms: u64,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        LaunchOptions {
            headless: true,
            storage_state: None,
            viewport_width: 1440,
            viewport_height: 900,
            shell_zoom: None,
            default_timeout_ms: 30_000,
        }
    }
}
