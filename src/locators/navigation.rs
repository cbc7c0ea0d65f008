//! Left navigation panel of the app shell.

use crate::browser::locator::{Locator, quote};

pub fn nav_labels() -> Locator {
    Locator::css(".mantine-AppShell-navbar span.mantine-NavLink-label")
}

pub fn nav_link(label: &str) -> Locator {
    Locator::css(format!(
        "a.mantine-NavLink-root:has(span.mantine-NavLink-label:has-text({}))",
        quote(label)
    ))
}

/// Expandable section header (a NavLink rendered as a button).
pub fn section_toggle(label: &str) -> Locator {
    Locator::css(format!(
        "button.mantine-NavLink-root:has(span.mantine-NavLink-label:has-text({}))",
        quote(label)
    ))
    .first()
}

pub fn first_toggle() -> Locator {
    Locator::css(".mantine-AppShell-navbar [aria-expanded]").first()
}
