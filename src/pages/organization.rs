use tracing::{error, info};

use crate::browser::locator::Locator;
use crate::data::fixtures::fill_dynamic;
use crate::error::E2eResult;
use crate::harness::Harness;
use crate::locators::organization as loc;

/// Members table: invites, revocation, resends and role edits.
pub struct OrganizationPage<'h> {
    h: &'h mut Harness,
}

impl<'h> OrganizationPage<'h> {
    pub fn new(h: &'h mut Harness) -> Self {
        OrganizationPage { h }
    }

    pub fn goto(&mut self, url: &str) -> E2eResult<()> {
        info!(url, "navigating");
        self.h.goto(url).inspect_err(|e| error!(url, error = %e, "navigation failed"))
    }

    pub fn open_invite(&mut self) -> E2eResult<()> {
        info!("opening invite user dialog");
        self.h.click(&loc::invite_button())?;
        self.h.expect(&loc::dialog_root()).to_be_visible()?;
        info!("invite dialog opened");
        Ok(())
    }

    pub fn select_role(&mut self, trigger: &Locator, role: &str) -> E2eResult<()> {
        self.h.click(trigger)?;
        self.h.click(&loc::role_menu_item(role))
    }

    pub fn invite_user(&mut self, email: &str, role: &str) -> E2eResult<()> {
        info!(email, role, "inviting user");
        self.open_invite()?;
        self.h.fill(&loc::dialog_email_input(), email)?;
        self.select_role(&loc::dialog_role_select(), role)?;
        let invite_text = self.h.fixtures.organization.invite_button_text.clone();
        self.h.click(&loc::dialog_button(&invite_text))?;
        self.h.wait_hidden(&loc::dialog_root())?;
        info!(email, "user invited");
        Ok(())
    }

    /// Type into the search box and wait for the table to settle.
    pub fn search(&mut self, value: &str) -> E2eResult<()> {
        info!(value, "searching");
        self.h.fill(&loc::search_input(), value)?;
        self.h.settle()?;
        self.h.wait_stable_count(&loc::rows())?;
        Ok(())
    }

    pub fn validate_invited_badge(&mut self, row: &Locator, email: &str) -> E2eResult<()> {
        let badge_text = self.h.fixtures.organization.invited_badge_text.clone();
        self.h
            .expect(&loc::invited_badge(row, &badge_text))
            .with_timeout(4_000)
            .to_be_visible()?;
        info!(email, "invited badge visible");
        Ok(())
    }

    pub fn visible_row_count(&mut self) -> E2eResult<u32> {
        let count = self.h.count(&loc::visible_rows())?;
        info!(count, "visible rows");
        Ok(count)
    }

    /// First table row mentioning `text`, once visible.
    pub fn get_row(&mut self, text: &str) -> E2eResult<Locator> {
        let row = loc::row_with(text);
        self.h.wait_visible_within(&row, 15_000)?;
        Ok(row)
    }

    pub fn revoke(&mut self, email: &str) -> E2eResult<()> {
        info!(email, "revoking invitation");
        let row = self.get_row(email)?;
        self.h.click(&loc::user_actions_button(&row))?;
        self.h.click(&loc::menu_item_revoke())?;

        let fixture = self.h.fixtures.organization.clone();
        self.h.expect(&loc::modal()).to_be_visible()?;
        self.h
            .expect(&loc::modal_title())
            .to_have_text(&fixture.revoke_dialog_title)?;
        let message = fill_dynamic(&fixture.revoke_dialog_message, email);
        self.h.expect(&loc::modal_message()).to_have_text(&message)?;

        self.h.click(&loc::modal_button(&fixture.revoke_confirm_button))?;
        self.h.wait_hidden(&loc::modal())?;
        info!(email, "invitation revoked");
        Ok(())
    }

    pub fn verify_no_results(&mut self) -> E2eResult<()> {
        let text = self.h.fixtures.organization.no_results_text.clone();
        self.h.expect(&loc::no_results_cell(&text)).to_be_visible()?;
        info!("no results verified");
        Ok(())
    }

    pub fn open_first_menu(&mut self) -> E2eResult<()> {
        self.h.click(&loc::first_row_menu_button())
    }

    /// Confirm the resend dialog; the row menu must already be open.
    pub fn resend_invite(&mut self, email: &str) -> E2eResult<()> {
        info!(email, "resending invite");
        self.h.click(&loc::menu_item_resend())?;

        let fixture = self.h.fixtures.organization.clone();
        let dialog = loc::alert_dialog_titled(&fixture.resend_dialog_title);
        self.h.expect(&dialog).to_be_visible()?;
        self.h
            .expect(&dialog.clone().css_within("h1"))
            .to_have_text(&fixture.resend_dialog_title)?;
        let message = fill_dynamic(&fixture.resend_dialog_message, email);
        self.h
            .expect(&dialog.clone().css_within("p"))
            .to_have_text(&message)?;
        self.h
            .click(&loc::button_in(&dialog, &fixture.resend_confirm_button))?;
        Ok(())
    }

    pub fn verify_resend_success(&mut self, email: &str) -> E2eResult<()> {
        let fixture = self.h.fixtures.organization.clone();
        let dialog = loc::dialog_titled(&fixture.resend_success_title);
        self.h.expect(&dialog).to_be_visible()?;
        self.h
            .expect(&dialog.clone().css_within("h1"))
            .to_have_text(&fixture.resend_success_title)?;
        let message = fill_dynamic(&fixture.resend_success_message, email);
        self.h
            .expect(&dialog.clone().css_within("p"))
            .to_have_text(&message)?;
        self.h
            .click(&loc::button_in(&dialog, &fixture.resend_success_close_button))?;

        self.h.expect(&loc::any_dialog()).to_be_hidden()?;
        self.h.expect(&loc::any_alert_dialog()).to_be_hidden()?;
        info!(email, "resend confirmed and dialogs closed");
        Ok(())
    }

    /// Flip the member's role between the two fixture roles; returns the new role.
    pub fn toggle_role(&mut self, email: &str) -> E2eResult<String> {
        let row = self.get_row(email)?;
        let fixture = self.h.fixtures.organization.clone();

        self.h.click(&loc::user_actions_button(&row))?;
        self.h.click(&loc::menu_item(&fixture.edit_role_dialog_title))?;

        let dialog = loc::dialog_titled(&fixture.edit_role_dialog_title);
        let trigger = loc::role_trigger(&dialog);
        let current = self.h.text_of(&trigger)?;
        let next = fixture.toggled_role(&current);
        info!(%current, %next, "changing role");

        self.h.click(&trigger)?;
        self.h.click(&loc::role_option(&next))?;
        self.h.click(&dialog.clone().locator(Locator::role_named(
            "button",
            fixture.save_button_text.as_str(),
        )))?;
        self.h.wait_hidden(&dialog)?;
        info!(%current, %next, "role changed");
        Ok(next)
    }

    pub fn get_role(&mut self, email: &str) -> E2eResult<String> {
        let row = self.get_row(email)?;
        let role = self.h.text_of(&loc::role_cell(&row))?;
        info!(email, %role, "current role");
        Ok(role)
    }

    pub fn verify_updated_role(&mut self, email: &str, expected: &str) -> E2eResult<String> {
        let row = self.get_row(email)?;
        let cell = loc::role_cell(&row);
        self.h.settle()?;
        self.h.expect(&cell).to_have_text(expected)?;
        info!(email, role = expected, "role verified");
        Ok(expected.to_string())
    }
}
