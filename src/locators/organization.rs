//! Organization members table and its dialogs (Radix Themes markup).

use crate::browser::locator::{Locator, TextMatch, quote};

pub fn invite_button() -> Locator {
    Locator::css("button:has-text(\"Invite\")").first()
}

pub fn dialog_root() -> Locator {
    Locator::css(".rt-DialogContent, [role=\"dialog\"]").first()
}

pub fn dialog_email_input() -> Locator {
    dialog_root().css_within("input[type=\"email\"], input[placeholder*=\"mail\"]")
}

pub fn dialog_role_select() -> Locator {
    dialog_root().css_within("button.rt-SelectTrigger, [role=\"combobox\"]")
}

pub fn dialog_button(text: &str) -> Locator {
    button_in(&dialog_root(), text)
}

pub fn button_in(container: &Locator, text: &str) -> Locator {
    container
        .clone()
        .css_within(format!("button:has-text({})", quote(text)))
}

pub fn role_menu() -> Locator {
    Locator::css(".rt-SelectContent, [role=\"listbox\"]")
}

pub fn role_menu_item(role: &str) -> Locator {
    role_menu().css_within(format!(".rt-SelectItem:has-text({})", quote(role)))
}

pub fn search_input() -> Locator {
    Locator::css("input[placeholder*=\"Search\"]")
}

pub fn rows() -> Locator {
    Locator::css("table tbody tr")
}

pub fn visible_rows() -> Locator {
    Locator::css("table tbody tr:visible")
}

pub fn row_with(text: &str) -> Locator {
    rows().has_text(text).first()
}

pub fn invited_badge(row: &Locator, badge: &str) -> Locator {
    row.clone()
        .css_within(format!("span.rt-Badge:has-text({})", quote(badge)))
}

pub fn user_actions_button(row: &Locator) -> Locator {
    row.clone()
        .css_within("button[aria-haspopup=\"menu\"], button.rt-IconButton")
        .first()
}

pub fn first_row_menu_button() -> Locator {
    user_actions_button(&rows().first())
}

pub fn menu_item_revoke() -> Locator {
    Locator::css("[role=\"menuitem\"]:has-text(\"Revoke\")")
}

pub fn menu_item_resend() -> Locator {
    Locator::css("[role=\"menuitem\"]:has-text(\"Resend\")")
}

pub fn menu_item(name: &str) -> Locator {
    Locator::role_matching("menuitem", TextMatch::contains(name))
}

pub fn modal() -> Locator {
    Locator::css(".rt-AlertDialogContent, [role=\"alertdialog\"]").first()
}

pub fn modal_title() -> Locator {
    modal().css_within("h1, h2, .rt-AlertDialogTitle").first()
}

pub fn modal_message() -> Locator {
    modal().css_within("p").first()
}

pub fn modal_button(text: &str) -> Locator {
    button_in(&modal(), text)
}

pub fn alert_dialog_titled(title: &str) -> Locator {
    Locator::role("alertdialog").has_text(title)
}

pub fn dialog_titled(title: &str) -> Locator {
    Locator::role("dialog").has_text(title)
}

pub fn any_dialog() -> Locator {
    Locator::role("dialog")
}

pub fn any_alert_dialog() -> Locator {
    Locator::role("alertdialog")
}

pub fn no_results_cell(text: &str) -> Locator {
    Locator::css(format!("tbody tr td >> text={}", text))
}

pub fn role_trigger(dialog: &Locator) -> Locator {
    dialog.clone().css_within("[role=\"combobox\"]")
}

pub fn role_option(role: &str) -> Locator {
    Locator::role_matching("option", TextMatch::contains(role))
}

pub fn role_cell(row: &Locator) -> Locator {
    row.clone().css_within("td").first().css_within("span").first()
}
