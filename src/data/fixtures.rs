use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{E2eError, E2eResult};

pub const ORGANIZATION_FIXTURE: &str = "organization.json";
pub const LEFT_PANEL_FIXTURE: &str = "left_panel.json";

/// Text the organization screens are expected to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationFixture {
    pub dashboard_url: String,
    pub organization_url: String,
    pub invite_button_text: String,
    pub invited_badge_text: String,
    pub revoke_dialog_title: String,
    /// Contains `{{email}}`
    pub revoke_dialog_message: String,
    pub revoke_confirm_button: String,
    pub no_results_text: String,
    pub resend_dialog_title: String,
    pub resend_dialog_message: String,
    pub resend_confirm_button: String,
    pub resend_success_title: String,
    pub resend_success_message: String,
    pub resend_success_close_button: String,
    pub edit_role_dialog_title: String,
    pub save_button_text: String,
    /// The two roles an edit toggles between
    pub roles: Vec<String>,
}

impl Default for OrganizationFixture {
    fn default() -> Self {
        OrganizationFixture {
            dashboard_url: "https://app.tailorbird.com/".into(),
            organization_url: "https://app.tailorbird.com/settings/organization".into(),
            invite_button_text: "Invite".into(),
            invited_badge_text: "Invited".into(),
            revoke_dialog_title: "Revoke invite".into(),
            revoke_dialog_message: "Are you sure you want to revoke the invitation sent to {{email}}?".into(),
            revoke_confirm_button: "Revoke".into(),
            no_results_text: "No results.".into(),
            resend_dialog_title: "Resend invite".into(),
            resend_dialog_message: "Are you sure you want to resend the invitation to {{email}}?".into(),
            resend_confirm_button: "Resend".into(),
            resend_success_title: "Invite sent".into(),
            resend_success_message: "An invitation has been sent to {{email}}.".into(),
            resend_success_close_button: "Close".into(),
            edit_role_dialog_title: "Edit role".into(),
            save_button_text: "Save".into(),
            roles: vec!["Admin".into(), "Member".into()],
        }
    }
}

impl OrganizationFixture {
    /// The role an edit switches to from `current`.
    pub fn toggled_role(&self, current: &str) -> String {
        match self.roles.as_slice() {
            [first, second, ..] if current == first => second.clone(),
            [first, ..] => first.clone(),
            [] => current.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    /// URL fragment the item navigates to
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeftPanelFixture {
    pub expected_labels: Vec<String>,
    pub menu_items: Vec<MenuItem>,
}

impl Default for LeftPanelFixture {
    fn default() -> Self {
        let items = [
            ("Dashboard", "/dashboard"),
            ("Properties", "/properties"),
            ("Projects & Jobs", "/projects"),
            ("Vendors", "/vendors"),
        ];
        LeftPanelFixture {
            expected_labels: items.iter().map(|(l, _)| l.to_string()).collect(),
            menu_items: items
                .iter()
                .map(|(label, url)| MenuItem {
                    label: label.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    pub organization: OrganizationFixture,
    pub left_panel: LeftPanelFixture,
}

impl Fixtures {
    /// Load fixtures from `dir`; a missing file falls back to the built-in defaults.
    pub fn load(dir: &Path) -> E2eResult<Self> {
        Ok(Fixtures {
            organization: load_or_default(&dir.join(ORGANIZATION_FIXTURE))?,
            left_panel: load_or_default(&dir.join(LEFT_PANEL_FIXTURE))?,
        })
    }
}

fn load_or_default<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> E2eResult<T> {
    if !path.exists() {
        debug!(path = %path.display(), "fixture not found, using defaults");
        return Ok(T::default());
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| E2eError::JsonParse {
        context: path.display().to_string(),
        source: e,
    })
}

/// Substitute the `{{email}}` placeholder of a fixture message.
pub fn fill_dynamic(template: &str, email: &str) -> String {
    template.replace("{{email}}", email)
}
