use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::browser::locator::Locator;
use crate::browser::page::{ElementProbe, LoadState, Page};
use crate::error::E2eResult;
use crate::wait::policy::WaitPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl ElementState {
    pub fn holds(&self, probe: &ElementProbe) -> bool {
        match self {
            ElementState::Visible => probe.visible,
            ElementState::Hidden => !probe.visible,
            ElementState::Attached => probe.attached(),
            ElementState::Detached => !probe.attached(),
        }
    }
}

/// Wait until `locator` reaches `state`; returns the probe that satisfied it.
pub fn wait_for(
    page: &mut dyn Page,
    locator: &Locator,
    state: ElementState,
    policy: &WaitPolicy,
) -> E2eResult<ElementProbe> {
    let what = format!("{} to be {:?}", locator, state);
    policy.poll(&what, || {
        let probe = page.probe(locator)?;
        Ok(state.holds(&probe).then_some(probe))
    })
}

/// Wait until the first of several acceptable after-effects becomes visible.
///
/// Returns the index of the winning candidate. Candidates are checked in
/// order on every poll, so on a tie the earlier one wins.
pub fn wait_for_any(
    page: &mut dyn Page,
    candidates: &[&Locator],
    policy: &WaitPolicy,
) -> E2eResult<usize> {
    let what = format!(
        "any of [{}] to be visible",
        candidates
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    );
    let index = policy.poll(&what, || {
        for (i, candidate) in candidates.iter().enumerate() {
            if page.probe(candidate)?.visible {
                return Ok(Some(i));
            }
        }
        Ok(None)
    })?;
    debug!(winner = %candidates[index], "after-effect observed");
    Ok(index)
}

pub fn wait_for_enabled(page: &mut dyn Page, locator: &Locator, policy: &WaitPolicy) -> E2eResult<ElementProbe> {
    let what = format!("{} to be visible and enabled", locator);
    policy.poll(&what, || {
        let probe = page.probe(locator)?;
        Ok((probe.visible && probe.enabled).then_some(probe))
    })
}

pub fn wait_for_url(page: &mut dyn Page, pattern: &Regex, policy: &WaitPolicy) -> E2eResult<String> {
    let what = format!("URL to match /{}/", pattern.as_str());
    policy.poll(&what, || {
        let url = page.current_url()?;
        Ok(pattern.is_match(&url).then_some(url))
    })
}

/// Wait until the number of matches stops changing for `quiet_polls`
/// consecutive polls. Grids render rows in batches, so a single count read
/// right after a filter or search is not trustworthy.
pub fn wait_for_stable_count(
    page: &mut dyn Page,
    locator: &Locator,
    quiet_polls: u32,
    policy: &WaitPolicy,
) -> E2eResult<u32> {
    let what = format!("{} count to settle", locator);
    let mut last: Option<u32> = None;
    let mut unchanged = 0u32;
    policy.poll(&what, || {
        let count = page.probe(locator)?.count;
        if last == Some(count) {
            unchanged += 1;
        } else {
            unchanged = 0;
            last = Some(count);
        }
        Ok((unchanged >= quiet_polls).then_some(count))
    })
}

/// Wait for a dynamic option list (autocomplete, combobox) to be populated
/// and identical on two consecutive reads; returns the non-empty option texts.
pub fn wait_for_options(page: &mut dyn Page, options: &Locator, policy: &WaitPolicy) -> E2eResult<Vec<String>> {
    let what = format!("options {} to load", options);
    let mut previous: Option<Vec<String>> = None;
    policy.poll(&what, || {
        let texts: Vec<String> = page
            .all_texts(options)?
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            previous = None;
            return Ok(None);
        }
        if previous.as_ref() == Some(&texts) {
            return Ok(Some(texts));
        }
        previous = Some(texts);
        Ok(None)
    })
}

/// Wait for the network to go idle.
pub fn settle(page: &mut dyn Page) -> E2eResult<()> {
    page.wait_for_load_state(LoadState::NetworkIdle)
}
