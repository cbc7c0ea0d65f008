use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};

use crate::browser::locator::Locator;
use crate::browser::page::{ClickOptions, Download, ElementProbe, LoadState, Page};
use crate::data::fixtures::Fixtures;
use crate::data::scratch::ScratchStore;
use crate::error::{E2eError, E2eResult};
use crate::expect::{self, Expectation};
use crate::wait::{self, ElementState, WaitConfig, WaitPolicy};

/// Where a run reads from and writes to, and which app it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessSettings {
    pub dashboard_url: String,
    pub organization_url: String,
    /// Preferred property option for new projects (`OPTION`)
    pub preferred_option: Option<String>,
    pub download_dir: PathBuf,
    pub artifact_dir: PathBuf,
    /// Files handed to upload inputs
    pub files_dir: PathBuf,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        HarnessSettings {
            dashboard_url: String::new(),
            organization_url: String::new(),
            preferred_option: None,
            download_dir: PathBuf::from("downloads"),
            artifact_dir: PathBuf::from("artifacts"),
            files_dir: PathBuf::from("files"),
        }
    }
}

/// A page plus everything the page objects need around it.
///
/// Every action waits for its target first (visible, and enabled for
/// clicks), so page objects never sleep.
pub struct Harness {
    page: Box<dyn Page>,
    pub waits: WaitConfig,
    pub scratch: ScratchStore,
    pub fixtures: Fixtures,
    pub settings: HarnessSettings,
}

impl Harness {
    pub fn new(page: Box<dyn Page>, waits: WaitConfig) -> Self {
        Harness {
            page,
            waits,
            scratch: ScratchStore::default(),
            fixtures: Fixtures::default(),
            settings: HarnessSettings::default(),
        }
    }

    pub fn with_scratch(mut self, scratch: ScratchStore) -> Self {
        self.scratch = scratch;
        self
    }

    pub fn with_fixtures(mut self, fixtures: Fixtures) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn with_settings(mut self, settings: HarnessSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn page(&mut self) -> &mut dyn Page {
        self.page.as_mut()
    }

    // ---- navigation ----

    /// Load `url` and wait for the network to go quiet.
    pub fn goto(&mut self, url: &str) -> E2eResult<()> {
        debug!(url, "navigating");
        self.page.goto(url, LoadState::Load)?;
        self.settle()
    }

    pub fn settle(&mut self) -> E2eResult<()> {
        wait::settle(self.page.as_mut())
    }

    pub fn current_url(&mut self) -> E2eResult<String> {
        self.page.current_url()
    }

    pub fn expect_url(&mut self, pattern: &str) -> E2eResult<String> {
        let re = Regex::new(pattern)?;
        let policy = self.waits.navigation;
        expect::expect_url(self.page.as_mut(), &re, &policy)
    }

    pub fn expect_url_eq(&mut self, expected: &str) -> E2eResult<String> {
        let policy = self.waits.navigation;
        expect::expect_url_eq(self.page.as_mut(), expected, &policy)
    }

    // ---- waits ----

    pub fn wait_visible(&mut self, locator: &Locator) -> E2eResult<ElementProbe> {
        let policy = self.waits.action;
        wait::wait_for(self.page.as_mut(), locator, ElementState::Visible, &policy)
    }

    /// Wait with an explicit deadline instead of the action deadline.
    pub fn wait_visible_within(&mut self, locator: &Locator, timeout_ms: u64) -> E2eResult<ElementProbe> {
        let policy = self.waits.action.with_timeout(timeout_ms);
        wait::wait_for(self.page.as_mut(), locator, ElementState::Visible, &policy)
    }

    pub fn wait_hidden(&mut self, locator: &Locator) -> E2eResult<()> {
        let policy = self.waits.action;
        wait::wait_for(self.page.as_mut(), locator, ElementState::Hidden, &policy).map(|_| ())
    }

    pub fn wait_attached(&mut self, locator: &Locator) -> E2eResult<ElementProbe> {
        let policy = self.waits.action;
        wait::wait_for(self.page.as_mut(), locator, ElementState::Attached, &policy)
    }

    /// Index of the first candidate to become visible.
    pub fn wait_any(&mut self, candidates: &[&Locator]) -> E2eResult<usize> {
        let policy = self.waits.action;
        wait::wait_for_any(self.page.as_mut(), candidates, &policy)
    }

    pub fn wait_url(&mut self, pattern: &str) -> E2eResult<String> {
        let re = Regex::new(pattern)?;
        let policy = self.waits.navigation;
        wait::wait_for_url(self.page.as_mut(), &re, &policy)
    }

    pub fn wait_stable_count(&mut self, locator: &Locator) -> E2eResult<u32> {
        let policy = self.waits.action;
        wait::wait_for_stable_count(self.page.as_mut(), locator, 2, &policy)
    }

    pub fn wait_options(&mut self, options: &Locator) -> E2eResult<Vec<String>> {
        let policy = self.waits.action;
        wait::wait_for_options(self.page.as_mut(), options, &policy)
    }

    /// Probe with a deadline; any failure to show up counts as "not visible".
    pub fn is_visible_within(&mut self, locator: &Locator, timeout_ms: u64) -> E2eResult<bool> {
        match self.wait_visible_within(locator, timeout_ms) {
            Ok(_) => Ok(true),
            Err(e) if e.is_session_failure() => Err(e),
            Err(_) => Ok(false),
        }
    }

    /// Immediate visibility check, no waiting.
    pub fn is_visible(&mut self, locator: &Locator) -> E2eResult<bool> {
        Ok(self.page.probe(locator)?.visible)
    }

    // ---- actions ----

    pub fn click(&mut self, locator: &Locator) -> E2eResult<()> {
        let policy = self.waits.action;
        wait::wait_for_enabled(self.page.as_mut(), locator, &policy)?;
        self.page.click(locator, ClickOptions::default())
    }

    /// Click without actionability checks, once the element is attached.
    pub fn click_forced(&mut self, locator: &Locator) -> E2eResult<()> {
        self.wait_attached(locator)?;
        self.page.click(locator, ClickOptions::forced())
    }

    pub fn click_with_delay(&mut self, locator: &Locator, delay_ms: u64) -> E2eResult<()> {
        let policy = self.waits.action;
        wait::wait_for_enabled(self.page.as_mut(), locator, &policy)?;
        self.page.click(
            locator,
            ClickOptions {
                delay_ms: Some(delay_ms),
                ..Default::default()
            },
        )
    }

    pub fn dblclick(&mut self, locator: &Locator) -> E2eResult<()> {
        self.wait_visible(locator)?;
        self.page.click(locator, ClickOptions::double())
    }

    pub fn dblclick_forced(&mut self, locator: &Locator) -> E2eResult<()> {
        self.wait_attached(locator)?;
        self.page.click(
            locator,
            ClickOptions {
                force: true,
                double: true,
                delay_ms: None,
            },
        )
    }

    pub fn fill(&mut self, locator: &Locator, value: &str) -> E2eResult<()> {
        self.wait_visible(locator)?;
        self.page.fill(locator, value)
    }

    /// Type key by key; date inputs with masks only accept typed input.
    pub fn type_slowly(&mut self, locator: &Locator, text: &str, delay_ms: u64) -> E2eResult<()> {
        self.wait_visible(locator)?;
        self.page.type_text(locator, text, Some(delay_ms))
    }

    pub fn press(&mut self, locator: &Locator, key: &str) -> E2eResult<()> {
        self.wait_visible(locator)?;
        self.page.press(Some(locator), key)
    }

    pub fn press_key(&mut self, key: &str) -> E2eResult<()> {
        self.page.press(None, key)
    }

    pub fn clear(&mut self, locator: &Locator) -> E2eResult<()> {
        self.wait_visible(locator)?;
        self.page.clear(locator)
    }

    /// File inputs are usually hidden; only attachment is required.
    pub fn upload(&mut self, locator: &Locator, files: &[PathBuf]) -> E2eResult<()> {
        self.wait_attached(locator)?;
        self.page.set_input_files(locator, files)
    }

    pub fn scroll_into_view(&mut self, locator: &Locator) -> E2eResult<()> {
        self.page.scroll_into_view(locator)
    }

    /// Click `trigger` and save the resulting download under the download dir.
    pub fn download(&mut self, trigger: &Locator) -> E2eResult<Download> {
        self.wait_visible(trigger)?;
        let dir = self.settings.download_dir.clone();
        let download = self.page.download(trigger, &dir)?;
        debug!(file = %download.suggested_filename, path = %download.path.display(), "downloaded");
        Ok(download)
    }

    pub fn screenshot(&mut self, name: &str) -> E2eResult<PathBuf> {
        let file = format!("{}.png", sanitize_file_name(name));
        let path = self.settings.artifact_dir.join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.page.screenshot(&path)?;
        Ok(path)
    }

    pub fn save_storage_state(&mut self, path: &Path) -> E2eResult<()> {
        self.page.save_storage_state(path)
    }

    /// Unconditional pause, for animations with no observable end state.
    pub fn pause(&mut self, ms: u64) -> E2eResult<()> {
        self.page.pause(ms)
    }

    // ---- reads ----

    /// Trimmed text of the first match, once it is attached.
    pub fn text_of(&mut self, locator: &Locator) -> E2eResult<String> {
        let probe = self.wait_attached(locator)?;
        probe.display_text().ok_or_else(|| E2eError::ElementNotFound {
            element: locator.to_string(),
            context: "element has no text".into(),
        })
    }

    /// Trimmed, non-empty texts of every match.
    pub fn texts_of(&mut self, locator: &Locator) -> E2eResult<Vec<String>> {
        Ok(self
            .page
            .all_texts(locator)?
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect())
    }

    pub fn count(&mut self, locator: &Locator) -> E2eResult<u32> {
        Ok(self.page.probe(locator)?.count)
    }

    pub fn attribute(&mut self, locator: &Locator, name: &str) -> E2eResult<Option<String>> {
        self.page.attribute(locator, name)
    }

    pub fn is_enabled(&mut self, locator: &Locator) -> E2eResult<bool> {
        let probe = self.page.probe(locator)?;
        Ok(probe.attached() && probe.enabled)
    }

    // ---- assertions ----

    pub fn expect(&mut self, locator: &Locator) -> Expectation<'_> {
        let policy = self.waits.expect;
        Expectation::new(self.page.as_mut(), locator.clone(), policy)
    }

    pub fn expect_policy(&self) -> WaitPolicy {
        self.waits.expect
    }

    // ---- network ----

    pub fn track_responses(&mut self) -> E2eResult<()> {
        self.page.track_responses()
    }

    /// Fail when any non-2xx response was recorded since tracking started.
    pub fn assert_no_failed_responses(&mut self) -> E2eResult<()> {
        let failed = self.page.failed_responses()?;
        if failed.is_empty() {
            return Ok(());
        }
        for f in &failed {
            warn!(url = %f.url, status = f.status, "failed API response");
        }
        let listing = serde_json::to_string_pretty(&failed).map_err(|e| E2eError::JsonSerialize {
            context: "failed responses".into(),
            source: e,
        })?;
        Err(E2eError::check(format!("API errors found:\n{}", listing)))
    }

    pub fn accept_next_dialog(&mut self) -> E2eResult<Option<String>> {
        self.page.accept_next_dialog()
    }

    pub fn take_dialog_message(&mut self) -> E2eResult<Option<String>> {
        self.page.take_dialog_message()
    }

    pub fn close(&mut self) -> E2eResult<()> {
        self.page.close()
    }
}

pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
