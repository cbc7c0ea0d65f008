use tracing::info;

use crate::error::E2eResult;
use crate::harness::Harness;
use crate::pages::{ProjectJobPage, ProjectPage, PropertiesPage};
use crate::suite::{Case, Suite, open_dashboard};

pub const JOB_TITLE: &str = "mall in noida";
pub const JOB_TYPE: &str = "Capex";
pub const EXISTING_VENDOR: &str = "testsumit";
pub const SCOPE_MIX_PROJECT: &str = "Automation_project_for_scope_mix";
pub const VENDOR_BID_AMOUNT: &str = "1000";

/// Name of the project the project suite created last.
fn recorded_project(h: &Harness) -> E2eResult<String> {
    Ok(h.scratch.load_project()?.project_name)
}

/// Open `project`, its first job's summary, then the Bids tab.
pub(crate) fn open_job_bids(h: &mut Harness, project: &str) -> E2eResult<()> {
    open_job_summary(h, project)?;
    ProjectJobPage::new(h).navigate_to_bids_tab()
}

pub(crate) fn open_job_summary(h: &mut Harness, project: &str) -> E2eResult<()> {
    ProjectPage::new(h).open_project(project)?;
    let mut jobs = ProjectJobPage::new(h);
    jobs.navigate_to_jobs_tab()?;
    jobs.open_job_summary()
}

fn on_recorded_bids(h: &mut Harness) -> E2eResult<()> {
    let project = recorded_project(h)?;
    open_job_bids(h, &project)
}

pub fn suite() -> Suite {
    Suite::new("jobs")
        .before_all(|h| {
            let project = recorded_project(h)?;
            info!(%project, "using recorded project");
            open_dashboard(h)
        })
        .case(
            Case::new("navigate to the jobs tab", |h| {
                let project = recorded_project(h)?;
                ProjectPage::new(h).open_project(&project)?;
                ProjectJobPage::new(h).navigate_to_jobs_tab()
            })
            .tag("@regression"),
        )
        .case(
            Case::new("add job through the modal and check its overview", |h| {
                ProjectJobPage::new(h).create_job_via_modal(JOB_TITLE, JOB_TYPE)?;
                ProjectPage::new(h).assert_success_toaster("job created successfully")?;
                PropertiesPage::new(h).validate_job_details(&[
                    ("Job Name", JOB_TITLE),
                    ("Job Type", JOB_TYPE),
                    ("Description", "-"),
                ])?;
                ProjectJobPage::new(h).verify_job_overview()
            })
            .tag("@regression"),
        )
        .case(
            Case::new("create bid and invite existing vendor", |h| {
                let mut jobs = ProjectJobPage::new(h);
                jobs.create_bid_with_material()?;
                jobs.invite_vendors_to_bid()?;
                jobs.invite_existing_vendor(EXISTING_VENDOR)
            })
            .tag("@regression"),
        )
        .case(
            Case::new("apply and save bid template", |h| {
                let project = recorded_project(h)?;
                open_job_summary(h, &project)?;
                let template = ProjectJobPage::new(h).verify_bid_template()?;
                info!(%template, "bid template saved");
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("update bid rows", |h| {
                on_recorded_bids(h)?;
                let mut jobs = ProjectJobPage::new(h);
                jobs.update_bid_with_material()?;
                let edited = jobs.validate_and_update_first_row()?;
                info!(cells = edited.len(), "first row updated");
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("reset bid table", |h| {
                on_recorded_bids(h)?;
                ProjectJobPage::new(h).reset_bid_table().map(|_| ())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("scope mix modal fields", |h| {
                open_job_bids(h, SCOPE_MIX_PROJECT)?;
                let scope = ProjectJobPage::new(h).verify_scope_mix_modal()?;
                info!(%scope, "scope added");
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("edit bid on behalf of vendor and submit", |h| {
                on_recorded_bids(h)?;
                let url = ProjectJobPage::new(h).edit_bid_on_behalf_of_vendor(VENDOR_BID_AMOUNT)?;
                info!(%url, "last visited URL saved");
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("manage vendors and award bid", |h| {
                on_recorded_bids(h)?;
                ProjectJobPage::new(h).award_bid()
            })
            .tag("@regression"),
        )
        .case(
            Case::new("verify awarded status and finalize contract", |h| {
                on_recorded_bids(h)?;
                ProjectJobPage::new(h).verify_awarded_and_finalize_contract()
            })
            .tag("@regression"),
        )
}
