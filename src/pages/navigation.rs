use regex::Regex;
use tracing::info;

use crate::browser::locator::Locator;
use crate::error::{E2eError, E2eResult};
use crate::harness::Harness;
use crate::locators::navigation as loc;

/// `aria-expanded` of a toggle before and after two clicks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleStates {
    pub before: Option<String>,
    pub after_first: Option<String>,
    pub after_second: Option<String>,
}

impl ToggleStates {
    /// Two clicks flip the state and then restore it.
    pub fn round_trips(&self) -> bool {
        self.before.is_some() && self.after_first != self.before && self.after_second == self.before
    }
}

pub struct LeftPanel<'h> {
    h: &'h mut Harness,
}

impl<'h> LeftPanel<'h> {
    pub fn new(h: &'h mut Harness) -> Self {
        LeftPanel { h }
    }

    pub fn labels(&mut self) -> E2eResult<Vec<String>> {
        let labels = self.h.wait_options(&loc::nav_labels())?;
        info!(count = labels.len(), "left panel labels");
        Ok(labels)
    }

    /// Click the menu entry and check the URL contains `url_fragment`.
    pub fn navigate(&mut self, label: &str, url_fragment: &str) -> E2eResult<String> {
        let link = loc::nav_link(label);
        self.h.wait_visible_within(&link, 5_000)?;
        self.h.click(&link)?;
        let url = self.h.expect_url(&regex::escape(url_fragment))?;
        info!(label, url_fragment, "navigation valid");
        Ok(url)
    }

    fn toggle_twice(&mut self, toggle: &Locator) -> E2eResult<ToggleStates> {
        let before = self.h.attribute(toggle, "aria-expanded")?;
        self.h.click(toggle)?;
        let after_first = self.wait_attribute_change(toggle, &before)?;
        self.h.click(toggle)?;
        let after_second = self.wait_attribute_change(toggle, &after_first)?;
        let states = ToggleStates {
            before,
            after_first,
            after_second,
        };
        info!(?states, "toggle states");
        Ok(states)
    }

    /// Read `aria-expanded` until it differs from `previous`; keeps the last
    /// reading when it never changes.
    fn wait_attribute_change(
        &mut self,
        toggle: &Locator,
        previous: &Option<String>,
    ) -> E2eResult<Option<String>> {
        let policy = self.h.waits.action.with_timeout(1_000);
        let mut last = previous.clone();
        let page = self.h.page();
        let outcome = policy.poll("aria-expanded to change", || {
            let current = page.attribute(toggle, "aria-expanded")?;
            if &current != previous {
                return Ok(Some(current));
            }
            last = current;
            Ok(None)
        });
        match outcome {
            Ok(v) => Ok(v),
            Err(E2eError::Timeout { .. }) => Ok(last),
            Err(e) => Err(e),
        }
    }

    pub fn toggle_first(&mut self) -> E2eResult<ToggleStates> {
        let toggle = loc::first_toggle();
        self.h.expect(&toggle).to_have_count(1)?;
        self.toggle_twice(&toggle)
    }

    /// Expand then collapse a section; it must end where it started.
    pub fn expand_collapse(&mut self, label: &str) -> E2eResult<ToggleStates> {
        let states = self.toggle_twice(&loc::section_toggle(label))?;
        if !states.round_trips() {
            return Err(E2eError::check(format!(
                "section {:?} did not expand and collapse: {:?}",
                label, states
            )));
        }
        Ok(states)
    }

    /// Whether the URL currently matches `pattern`.
    pub fn url_matches(&mut self, pattern: &str) -> E2eResult<bool> {
        let re = Regex::new(pattern)?;
        Ok(re.is_match(&self.h.current_url()?))
    }
}
