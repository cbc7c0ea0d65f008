use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::Value;

use crate::browser::locator::Locator;
use crate::browser::page::{ClickOptions, Download, ElementProbe, FailedResponse, LoadState, Page};
use crate::error::{E2eError, E2eResult};

/// One scripted element (or set of elements) keyed by locator expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MockElement {
    pub count: u32,
    pub visible: bool,
    pub enabled: bool,
    pub text: Option<String>,
    pub value: Option<String>,
    pub attributes: HashMap<String, String>,
    /// Per-match texts for `all_texts`; falls back to `text` repeated `count` times
    pub texts: Vec<String>,
    /// Probes answered with "missing" before the element shows up
    pub pending_probes: u32,
}

impl Default for MockElement {
    fn default() -> Self {
        MockElement {
            count: 1,
            visible: true,
            enabled: true,
            text: None,
            value: None,
            attributes: HashMap::new(),
            texts: Vec::new(),
            pending_probes: 0,
        }
    }
}

impl MockElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        MockElement {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn hidden() -> Self {
        MockElement {
            visible: false,
            ..Default::default()
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn texts(mut self, texts: &[&str]) -> Self {
        self.texts = texts.iter().map(|t| t.to_string()).collect();
        self.count = self.texts.len() as u32;
        self
    }

    pub fn appearing_after(mut self, probes: u32) -> Self {
        self.pending_probes = probes;
        self
    }
}

/// The scripted page state shared between a [`MockPage`] and the test that built it.
#[derive(Debug, Default)]
pub struct MockDom {
    pub elements: HashMap<String, MockElement>,
    pub url: String,
    pub title: String,
    pub failed: Vec<FailedResponse>,
    /// Message of the last accepted dialog
    pub dialog_message: Option<String>,
    /// The next dialog is accepted rather than dismissed
    pub dialog_armed: bool,
    /// (suggested filename, content) served by the next downloads
    pub downloads: VecDeque<(String, String)>,
    /// Every action performed, in order, e.g. `click css=button`
    pub log: Vec<String>,
}

impl MockDom {
    /// A native dialog opens: accepted once if armed, dismissed otherwise.
    /// Returns whether it was accepted.
    pub fn raise_dialog(&mut self, message: &str) -> bool {
        if self.dialog_armed {
            self.dialog_armed = false;
            self.dialog_message = Some(message.to_string());
            self.log.push(format!("dialog accepted: {}", message));
            true
        } else {
            self.log.push(format!("dialog dismissed: {}", message));
            false
        }
    }

    pub fn set(&mut self, key: impl ToString, element: MockElement) {
        self.elements.insert(key.to_string(), element);
    }

    pub fn show(&mut self, key: impl ToString) {
        let key = key.to_string();
        let entry = self.elements.entry(key).or_default();
        entry.visible = true;
        entry.pending_probes = 0;
        if entry.count == 0 {
            entry.count = 1;
        }
    }

    /// Element stays attached but is no longer visible.
    pub fn hide(&mut self, key: impl ToString) {
        if let Some(el) = self.elements.get_mut(&key.to_string()) {
            el.visible = false;
        }
    }

    pub fn remove(&mut self, key: impl ToString) {
        self.elements.remove(&key.to_string());
    }

    pub fn set_text(&mut self, key: impl ToString, text: impl Into<String>) {
        let entry = self.elements.entry(key.to_string()).or_default();
        entry.text = Some(text.into());
    }

    pub fn get(&self, key: impl ToString) -> Option<&MockElement> {
        self.elements.get(&key.to_string())
    }

    pub fn performed(&self, entry: &str) -> bool {
        self.log.iter().any(|l| l == entry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockAction {
    Click,
    Fill,
    Press,
    Goto,
}

type Reaction = Box<dyn FnMut(&mut MockDom, &str)>;

/// In-memory [`Page`] for exercising waits, assertions and page objects
/// without a browser.
///
/// Elements are keyed by [`Locator`] expression, so a test scripts exactly
/// the locators a page object resolves. Reactions model the page's answer to
/// an action (a click opens a modal, a fill filters a grid).
pub struct MockPage {
    dom: Rc<RefCell<MockDom>>,
    reactions: Vec<(MockAction, String, Reaction)>,
}

impl MockPage {
    pub fn new() -> Self {
        MockPage {
            dom: Rc::new(RefCell::new(MockDom::default())),
            reactions: Vec::new(),
        }
    }

    pub fn with_url(url: &str) -> Self {
        let page = Self::new();
        page.dom.borrow_mut().url = url.to_string();
        page
    }

    /// Shared handle to the scripted state; stays valid after the page is boxed.
    pub fn dom(&self) -> Rc<RefCell<MockDom>> {
        Rc::clone(&self.dom)
    }

    /// Register a reaction to `action` on `key`. For `Press` without a
    /// locator the key is `"keyboard"`; for `Goto` it is the URL.
    pub fn on(
        &mut self,
        action: MockAction,
        key: impl ToString,
        reaction: impl FnMut(&mut MockDom, &str) + 'static,
    ) {
        self.reactions
            .push((action, key.to_string(), Box::new(reaction)));
    }

    pub fn on_click(&mut self, key: impl ToString, reaction: impl FnMut(&mut MockDom, &str) + 'static) {
        self.on(MockAction::Click, key, reaction);
    }

    fn react(&mut self, action: MockAction, key: &str, arg: &str) {
        let mut dom = self.dom.borrow_mut();
        for (a, k, reaction) in self.reactions.iter_mut() {
            if *a == action && k == key {
                reaction(&mut dom, arg);
            }
        }
    }

    fn record(&self, entry: String) {
        self.dom.borrow_mut().log.push(entry);
    }

    /// The element must be attached, and visible + enabled unless forced.
    fn require_actionable(&self, locator: &Locator, force: bool) -> E2eResult<()> {
        let dom = self.dom.borrow();
        let key = locator.expression();
        match dom.elements.get(&key) {
            Some(el) if el.count > 0 && el.pending_probes == 0 => {
                if !force && !(el.visible && el.enabled) {
                    return Err(E2eError::ElementNotFound {
                        element: key,
                        context: "element is not visible and enabled".into(),
                    });
                }
                Ok(())
            }
            _ => Err(E2eError::ElementNotFound {
                element: key,
                context: "no element matches".into(),
            }),
        }
    }
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MockPage {
    fn goto(&mut self, url: &str, _wait_until: LoadState) -> E2eResult<()> {
        self.record(format!("goto {}", url));
        self.dom.borrow_mut().url = url.to_string();
        self.react(MockAction::Goto, url, url);
        Ok(())
    }

    fn wait_for_load_state(&mut self, state: LoadState) -> E2eResult<()> {
        self.record(format!("load_state {:?}", state));
        Ok(())
    }

    fn current_url(&mut self) -> E2eResult<String> {
        Ok(self.dom.borrow().url.clone())
    }

    fn title(&mut self) -> E2eResult<String> {
        Ok(self.dom.borrow().title.clone())
    }

    fn click(&mut self, locator: &Locator, options: ClickOptions) -> E2eResult<()> {
        self.require_actionable(locator, options.force)?;
        let key = locator.expression();
        let verb = if options.double { "dblclick" } else { "click" };
        self.record(format!("{} {}", verb, key));
        self.react(MockAction::Click, &key, "");
        Ok(())
    }

    fn fill(&mut self, locator: &Locator, value: &str) -> E2eResult<()> {
        self.require_actionable(locator, false)?;
        let key = locator.expression();
        self.record(format!("fill {} = {}", key, value));
        if let Some(el) = self.dom.borrow_mut().elements.get_mut(&key) {
            el.value = Some(value.to_string());
        }
        self.react(MockAction::Fill, &key, value);
        Ok(())
    }

    fn type_text(&mut self, locator: &Locator, text: &str, _delay_ms: Option<u64>) -> E2eResult<()> {
        self.require_actionable(locator, false)?;
        let key = locator.expression();
        self.record(format!("type {} = {}", key, text));
        if let Some(el) = self.dom.borrow_mut().elements.get_mut(&key) {
            let mut current = el.value.clone().unwrap_or_default();
            current.push_str(text);
            el.value = Some(current);
        }
        self.react(MockAction::Fill, &key, text);
        Ok(())
    }

    fn press(&mut self, locator: Option<&Locator>, key: &str) -> E2eResult<()> {
        let target = match locator {
            Some(l) => {
                self.require_actionable(l, false)?;
                l.expression()
            }
            None => "keyboard".to_string(),
        };
        self.record(format!("press {} {}", target, key));
        self.react(MockAction::Press, &target, key);
        Ok(())
    }

    fn clear(&mut self, locator: &Locator) -> E2eResult<()> {
        self.require_actionable(locator, false)?;
        let key = locator.expression();
        self.record(format!("clear {}", key));
        if let Some(el) = self.dom.borrow_mut().elements.get_mut(&key) {
            el.value = Some(String::new());
        }
        self.react(MockAction::Fill, &key, "");
        Ok(())
    }

    fn set_input_files(&mut self, locator: &Locator, files: &[PathBuf]) -> E2eResult<()> {
        self.require_actionable(locator, true)?;
        let names: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
        self.record(format!("upload {} = {}", locator.expression(), names.join(",")));
        Ok(())
    }

    fn scroll_into_view(&mut self, locator: &Locator) -> E2eResult<()> {
        self.require_actionable(locator, true)
    }

    fn probe(&mut self, locator: &Locator) -> E2eResult<ElementProbe> {
        let mut dom = self.dom.borrow_mut();
        let Some(el) = dom.elements.get_mut(&locator.expression()) else {
            return Ok(ElementProbe::missing());
        };
        if el.pending_probes > 0 {
            el.pending_probes -= 1;
            return Ok(ElementProbe::missing());
        }
        Ok(ElementProbe {
            count: el.count,
            visible: el.count > 0 && el.visible,
            enabled: el.enabled,
            text: el.text.clone(),
            inner_text: if el.visible { el.text.clone() } else { None },
            value: el.value.clone(),
        })
    }

    fn attribute(&mut self, locator: &Locator, name: &str) -> E2eResult<Option<String>> {
        let dom = self.dom.borrow();
        Ok(dom
            .elements
            .get(&locator.expression())
            .and_then(|el| el.attributes.get(name).cloned()))
    }

    fn all_texts(&mut self, locator: &Locator) -> E2eResult<Vec<String>> {
        let dom = self.dom.borrow();
        let Some(el) = dom.elements.get(&locator.expression()) else {
            return Ok(Vec::new());
        };
        if !el.texts.is_empty() {
            return Ok(el.texts.clone());
        }
        let text = el.text.clone().unwrap_or_default();
        Ok(vec![text; el.count as usize])
    }

    fn download(&mut self, trigger: &Locator, save_dir: &Path) -> E2eResult<Download> {
        self.require_actionable(trigger, false)?;
        self.record(format!("download {}", trigger.expression()));
        let (name, content) = self
            .dom
            .borrow_mut()
            .downloads
            .pop_front()
            .ok_or_else(|| E2eError::Download("no download was started".into()))?;
        std::fs::create_dir_all(save_dir)?;
        let path = save_dir.join(&name);
        std::fs::write(&path, content)?;
        Ok(Download {
            suggested_filename: name,
            path,
        })
    }

    fn evaluate(&mut self, script: &str) -> E2eResult<Value> {
        self.record(format!("evaluate {}", script));
        Ok(Value::Null)
    }

    fn screenshot(&mut self, path: &Path) -> E2eResult<()> {
        self.record(format!("screenshot {}", path.display()));
        Ok(())
    }

    fn save_storage_state(&mut self, path: &Path) -> E2eResult<()> {
        self.record(format!("storage_state {}", path.display()));
        Ok(())
    }

    fn accept_next_dialog(&mut self) -> E2eResult<Option<String>> {
        self.record("accept_dialog".to_string());
        let mut dom = self.dom.borrow_mut();
        dom.dialog_armed = true;
        Ok(dom.dialog_message.take())
    }

    fn take_dialog_message(&mut self) -> E2eResult<Option<String>> {
        self.record("take_dialog".to_string());
        Ok(self.dom.borrow_mut().dialog_message.take())
    }

    fn track_responses(&mut self) -> E2eResult<()> {
        self.record("track_responses".to_string());
        Ok(())
    }

    fn failed_responses(&mut self) -> E2eResult<Vec<FailedResponse>> {
        Ok(self.dom.borrow().failed.clone())
    }

    fn pause(&mut self, ms: u64) -> E2eResult<()> {
        self.record(format!("pause {}", ms));
        Ok(())
    }

    fn close(&mut self) -> E2eResult<()> {
        self.record("close".to_string());
        Ok(())
    }
}
