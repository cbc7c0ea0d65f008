use tracing::info;

use crate::data::generate::timestamped_email;
use crate::error::{E2eError, E2eResult};
use crate::harness::Harness;
use crate::pages::OrganizationPage;
use crate::suite::{Case, Suite, dashboard_url, organization_url};

pub const INVITE_DOMAIN: &str = "yopmail.com";
/// Existing member whose role the edit case flips back and forth.
pub const EDIT_ROLE_EMAIL: &str = "tailorbird-admin@tailorbird.us";

fn invite_and_check(h: &mut Harness, prefix: &str, role: &str) -> E2eResult<()> {
    let email = timestamped_email(prefix, INVITE_DOMAIN);
    let mut org = OrganizationPage::new(h);
    org.invite_user(&email, role)?;
    org.search(&email)?;
    let row = org.get_row(&email)?;
    org.validate_invited_badge(&row, &email)?;
    let rows = org.visible_row_count()?;
    if rows == 0 {
        return Err(E2eError::check(format!("no rows visible after searching {}", email)));
    }
    info!(%email, role, rows, "invitation listed");
    Ok(())
}

pub fn suite() -> Suite {
    Suite::new("organization")
        .before_all(|h| {
            let dashboard = dashboard_url(h)?;
            let organization = organization_url(h)?;
            let mut org = OrganizationPage::new(h);
            org.goto(&dashboard)?;
            org.goto(&organization)?;
            h.expect_url("organization")?;
            Ok(())
        })
        .case(Case::new("invite new user with Member role", |h| {
            invite_and_check(h, "member", "Member")
        }))
        .case(Case::new("invite new user with Admin role", |h| {
            invite_and_check(h, "admin", "Admin")
        }))
        .case(Case::new("revoke user invitation", |h| {
            let email = timestamped_email("revoke", INVITE_DOMAIN);
            let mut org = OrganizationPage::new(h);
            org.invite_user(&email, "Admin")?;
            org.search(&email)?;
            org.get_row(&email)?;
            org.revoke(&email)?;
            org.search(&email)?;
            org.verify_no_results()
        }))
        .case(Case::new("resend user invitation", |h| {
            let organization = organization_url(h)?;
            let email = timestamped_email("resend", INVITE_DOMAIN);
            let mut org = OrganizationPage::new(h);
            org.goto(&organization)?;
            org.invite_user(&email, "Admin")?;
            org.search(&email)?;
            org.get_row(&email)?;
            org.open_first_menu()?;
            org.resend_invite(&email)?;
            org.verify_resend_success(&email)
        }))
        .case(Case::new("edit user role", |h| {
            let mut org = OrganizationPage::new(h);
            org.search(EDIT_ROLE_EMAIL)?;
            org.get_row(EDIT_ROLE_EMAIL)?;
            let new_role = org.toggle_role(EDIT_ROLE_EMAIL)?;
            org.search(EDIT_ROLE_EMAIL)?;
            org.verify_updated_role(EDIT_ROLE_EMAIL, &new_role)?;
            Ok(())
        }))
}
