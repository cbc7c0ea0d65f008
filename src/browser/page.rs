use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::browser::locator::Locator;
use crate::error::E2eResult;

/// Page lifecycle milestones a navigation can wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Load,
    DomContentLoaded,
    NetworkIdle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClickOptions {
    /// Skip actionability checks (overlays, animations)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub double: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl ClickOptions {
    pub fn forced() -> Self {
        ClickOptions {
            force: true,
            ..Default::default()
        }
    }

    pub fn double() -> Self {
        ClickOptions {
            double: true,
            ..Default::default()
        }
    }
}

/// Snapshot of the first element matched by a locator, plus the match count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementProbe {
    pub count: u32,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub enabled: bool,
    /// textContent of the first match
    #[serde(default)]
    pub text: Option<String>,
    /// innerText of the first match (rendered text only)
    #[serde(default)]
    pub inner_text: Option<String>,
    /// Current value for inputs, textareas and selects
    #[serde(default)]
    pub value: Option<String>,
}

impl ElementProbe {
    pub fn missing() -> Self {
        ElementProbe::default()
    }

    pub fn attached(&self) -> bool {
        self.count > 0
    }

    /// Visible text, preferring innerText over textContent, trimmed.
    pub fn display_text(&self) -> Option<String> {
        self.inner_text
            .as_deref()
            .or(self.text.as_deref())
            .map(|t| t.trim().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    pub suggested_filename: String,
    pub path: PathBuf,
}

/// A non-2xx network response observed while tracking was on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedResponse {
    pub url: String,
    pub status: u16,
}

/// The seam between the test engine and the browser automation runtime.
///
/// Every operation is a single, immediate request: implementations do not
/// retry. Waiting and retrying live in [`crate::wait`] and [`crate::expect`],
/// so a scripted implementation ([`MockPage`](crate::browser::mock::MockPage))
/// exercises the same stabilization logic as a live browser.
pub trait Page {
    fn goto(&mut self, url: &str, wait_until: LoadState) -> E2eResult<()>;

    fn wait_for_load_state(&mut self, state: LoadState) -> E2eResult<()>;

    fn current_url(&mut self) -> E2eResult<String>;

    fn title(&mut self) -> E2eResult<String>;

    fn click(&mut self, locator: &Locator, options: ClickOptions) -> E2eResult<()>;

    fn fill(&mut self, locator: &Locator, value: &str) -> E2eResult<()>;

    /// Type key by key, with an optional delay between keystrokes.
    fn type_text(&mut self, locator: &Locator, text: &str, delay_ms: Option<u64>) -> E2eResult<()>;

    /// Press a key on an element, or on the page keyboard when `locator` is None.
    fn press(&mut self, locator: Option<&Locator>, key: &str) -> E2eResult<()>;

    fn clear(&mut self, locator: &Locator) -> E2eResult<()>;

    fn set_input_files(&mut self, locator: &Locator, files: &[PathBuf]) -> E2eResult<()>;

    fn scroll_into_view(&mut self, locator: &Locator) -> E2eResult<()>;

    fn probe(&mut self, locator: &Locator) -> E2eResult<ElementProbe>;

    fn attribute(&mut self, locator: &Locator, name: &str) -> E2eResult<Option<String>>;

    /// textContent of every match, in document order.
    fn all_texts(&mut self, locator: &Locator) -> E2eResult<Vec<String>>;

    /// Click `trigger` and wait for the download it starts; save it under `save_dir`.
    fn download(&mut self, trigger: &Locator, save_dir: &Path) -> E2eResult<Download>;

    fn evaluate(&mut self, script: &str) -> E2eResult<Value>;

    fn screenshot(&mut self, path: &Path) -> E2eResult<()>;

    fn save_storage_state(&mut self, path: &Path) -> E2eResult<()>;

    /// Accept the next native dialog (confirm / alert). Returns its message
    /// once one has been handled since the last call.
    fn accept_next_dialog(&mut self) -> E2eResult<Option<String>>;

    /// Message of the last accepted dialog. Later dialogs are dismissed
    /// unless [`Page::accept_next_dialog`] is called again.
    fn take_dialog_message(&mut self) -> E2eResult<Option<String>>;

    /// Start (or restart) recording non-2xx responses.
    fn track_responses(&mut self) -> E2eResult<()>;

    fn failed_responses(&mut self) -> E2eResult<Vec<FailedResponse>>;

    /// Unconditional pause. Only for UI animations with no observable end state.
    fn pause(&mut self, ms: u64) -> E2eResult<()>;

    fn close(&mut self) -> E2eResult<()>;
}
