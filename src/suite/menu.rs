use tracing::info;

use crate::error::E2eError;
use crate::pages::LeftPanel;
use crate::suite::{Case, Suite, open_dashboard};

/// Labels from `expected` that are missing in `actual`.
pub fn missing_labels(actual: &[String], expected: &[String]) -> Vec<String> {
    expected
        .iter()
        .filter(|label| !actual.contains(label))
        .cloned()
        .collect()
}

pub fn suite() -> Suite {
    let mut suite = Suite::new("menu")
        .before_all(open_dashboard)
        .case(
            Case::new("verify all menu options are available", |h| {
                let labels = LeftPanel::new(h).labels()?;
                if labels.is_empty() {
                    return Err(E2eError::check("left panel labels not found"));
                }
                let missing = missing_labels(&labels, &h.fixtures.left_panel.expected_labels);
                if !missing.is_empty() {
                    return Err(E2eError::check(format!(
                        "left panel is missing {:?}; found {:?}",
                        missing, labels
                    )));
                }
                info!(count = labels.len(), "all expected labels present");
                Ok(())
            })
            .tag("@sanity"),
        )
        .case(
            Case::new("verify all menu navigation", |h| {
                let items = h.fixtures.left_panel.menu_items.clone();
                let labels = LeftPanel::new(h).labels()?;
                for item in &items {
                    if !labels.contains(&item.label) {
                        return Err(E2eError::check(format!("menu item {:?} not in the left panel", item.label)));
                    }
                    LeftPanel::new(h).navigate(&item.label, &item.url)?;
                }
                info!("all sidebar navigation validated");
                Ok(())
            })
            .tag("@sanity"),
        )
        .case(
            Case::new("verify main menu toggle functionality", |h| {
                let states = LeftPanel::new(h).toggle_first()?;
                info!(
                    before = ?states.before,
                    after_first = ?states.after_first,
                    after_second = ?states.after_second,
                    "toggle aria-expanded"
                );
                Ok(())
            })
            .tag("@sanity"),
        );

    // Sections render collapsed-only in the current app build.
    for section in ["Financials", "Trackers", "Documents"] {
        suite = suite.case(
            Case::new(format!("verify {} expand/collapse", section), move |h| {
                LeftPanel::new(h).expand_collapse(section).map(|_| ())
            })
            .tag("@sanity")
            .skipped(),
        );
    }
    suite
}
