use std::time::{Duration, Instant};

use chrono::Utc;
use regex::Regex;
use tracing::info;

use crate::data::export::{CsvTable, check_export_name, read_csv};
use crate::data::generate::{self, DEFAULT_PROJECT_PREFIX};
use crate::data::scratch::ProjectRecord;
use crate::error::{E2eError, E2eResult};
use crate::harness::Harness;
use crate::locators::project as loc;

/// Longest acceptable time from clicking "Projects & Jobs" to a quiet network.
pub const PROJECTS_LOAD_BUDGET: Duration = Duration::from_millis(2_000);

/// Keystroke delay for masked date inputs.
const DATE_KEY_DELAY_MS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDetails {
    /// Base of the generated description
    pub description: Option<String>,
    /// `dd-mm-yyyy`
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    pub project_name: String,
    pub description: String,
    pub property: String,
}

pub struct ProjectPage<'h> {
    h: &'h mut Harness,
}

impl<'h> ProjectPage<'h> {
    pub fn new(h: &'h mut Harness) -> Self {
        ProjectPage { h }
    }

    /// Open the projects list; it must load within budget with no failed API calls.
    pub fn navigate_to_projects(&mut self) -> E2eResult<Duration> {
        self.navigate_to_projects_within(PROJECTS_LOAD_BUDGET)
    }

    pub fn navigate_to_projects_within(&mut self, budget: Duration) -> E2eResult<Duration> {
        info!("navigating to Projects & Jobs");
        self.h.track_responses()?;

        let tab = loc::projects_nav_label();
        self.h.wait_visible_within(&tab, 10_000)?;

        let start = Instant::now();
        self.h.click(&tab)?;
        self.h.settle()?;
        let elapsed = start.elapsed();
        info!(elapsed_ms = elapsed.as_millis() as u64, "projects list loaded");

        if elapsed > budget {
            return Err(E2eError::check(format!(
                "projects list took {} ms to load (budget {} ms)",
                elapsed.as_millis(),
                budget.as_millis()
            )));
        }
        self.h.assert_no_failed_responses()?;
        Ok(elapsed)
    }

    pub fn open_create_project_modal(&mut self) -> E2eResult<()> {
        info!("opening Create Project modal");
        self.h.settle()?;

        let start = Instant::now();
        self.h.wait_visible(&loc::search_input())?;
        info!(seconds = format!("{:.2}", start.elapsed().as_secs_f64()), "project page loaded");

        let create = loc::create_project_button();
        self.h.expect(&create).to_be_visible()?;
        self.h.click(&create)?;

        self.h.expect(&loc::modal()).to_be_visible()?;
        self.h.expect(&loc::modal_title()).to_be_visible()?;
        info!("Add project modal opened");
        Ok(())
    }

    pub fn verify_modal_fields(&mut self) -> E2eResult<()> {
        for field in [
            loc::name_input(),
            loc::property_dropdown(),
            loc::description_input(),
            loc::start_date_input(),
            loc::end_date_input(),
            loc::cancel_button(),
            loc::add_project_button(),
        ] {
            self.h.expect(&field).to_be_visible()?;
        }
        info!("all modal fields and buttons are visible");
        Ok(())
    }

    /// Open the property dropdown and return its options once they stop changing.
    pub fn property_dropdown_options(&mut self) -> E2eResult<Vec<String>> {
        self.h.click(&loc::property_dropdown())?;
        self.h.expect(&loc::dropdown()).to_be_visible()?;
        let options = self.h.wait_options(&loc::dropdown_options())?;
        info!(options = %options.join(", "), "property dropdown options");
        Ok(options)
    }

    /// Fill and submit the create-project form with a generated name and
    /// description, verify the result and record it for later suites.
    pub fn fill_project_details(&mut self, details: &ProjectDetails) -> E2eResult<CreatedProject> {
        info!("filling project details");
        let project_name = generate::project_name(DEFAULT_PROJECT_PREFIX);
        let description = generate::description(details.description.as_deref());

        self.h.fill(&loc::name_input(), &project_name)?;
        info!(%project_name, "entered project name");

        let options = self.property_dropdown_options()?;
        let preferred = self.h.settings.preferred_option.clone();
        let property = generate::choose_option(&options, preferred.as_deref())
            .cloned()
            .ok_or_else(|| E2eError::check("property dropdown has no options"))?;
        if preferred.as_deref() == Some(property.as_str()) {
            info!(%property, "using configured option");
        } else {
            info!(%property, "randomly selected option");
        }
        self.h.click(&loc::dropdown_option(&property))?;

        self.h.fill(&loc::description_input(), &description)?;
        info!(%description, "entered description");

        self.fill_date_field(&details.start_date, &details.end_date)?;

        let submit = loc::add_project_button();
        self.h.expect(&submit).to_be_visible()?;
        self.h.click(&submit)?;
        self.h.expect_url("projects")?;
        self.h.settle()?;

        self.assert_success_toaster("project created successfully")?;
        self.assert_project_created(&project_name, &description)?;

        self.h.scratch.save_project(&ProjectRecord {
            project_name: project_name.clone(),
            description: description.clone(),
            property: property.clone(),
            created_at: Utc::now().to_rfc3339(),
        })?;

        Ok(CreatedProject {
            project_name,
            description,
            property,
        })
    }

    pub fn fill_date_field(&mut self, start: &str, end: &str) -> E2eResult<()> {
        self.h
            .type_slowly(&loc::start_date_input(), start, DATE_KEY_DELAY_MS)?;
        self.h
            .type_slowly(&loc::end_date_input(), end, DATE_KEY_DELAY_MS)?;
        info!(start, end, "entered dates");
        Ok(())
    }

    /// The first row's name contains `partial`, case-insensitively.
    pub fn search_project(&mut self, partial: &str) -> E2eResult<()> {
        self.h.fill(&loc::search_input(), partial)?;
        self.h.settle()?;

        let first = loc::first_row_name_text();
        let text = self.h.text_of(&first)?;
        info!(%text, partial, "first row after search");

        let pattern = Regex::new(&format!("(?i){}", regex::escape(partial)))?;
        self.h.expect(&first).to_match_text(&pattern)?;
        info!(partial, "search matched");
        Ok(())
    }

    /// Cancel closes the modal without saving.
    pub fn verify_modal_closed(&mut self) -> E2eResult<()> {
        self.h.click(&loc::cancel_button())?;
        self.h.expect(&loc::modal()).to_be_hidden()?;
        info!("Add Project modal closed");
        Ok(())
    }

    /// Submitting the empty form flags exactly the two required inputs.
    pub fn validate_mandatory_fields(&mut self) -> E2eResult<()> {
        let submit = loc::add_project_button();
        self.h.expect(&submit).to_be_visible()?;
        self.h.click(&submit)?;
        self.h.expect(&loc::invalid_inputs()).to_have_count(2)?;
        info!("mandatory fields validated");
        Ok(())
    }

    pub fn assert_success_toaster(&mut self, message: &str) -> E2eResult<()> {
        let expected = format!("Success{}", message);
        self.h
            .expect(&loc::notification())
            .to_contain_text(&expected)?;
        info!(toaster = %expected, "toaster visible");
        Ok(())
    }

    pub fn assert_project_created(&mut self, name: &str, description: &str) -> E2eResult<()> {
        for (label, value) in [("Project Name", name), ("Description", description)] {
            let element = loc::dashboard_value(label, value);
            self.h.wait_visible(&element)?;
            self.h.expect(&element).to_contain_text(value)?;
            let actual = self.h.text_of(&element)?;
            if actual != value {
                return Err(E2eError::AssertionFailed {
                    locator: element.to_string(),
                    expectation: format!("to have text {:?}", value),
                    actual,
                });
            }
            info!(label, value, "visible on the dashboard");
        }
        Ok(())
    }

    /// Go to the projects list, search for `name` and open its card.
    pub fn open_project(&mut self, name: &str) -> E2eResult<()> {
        info!(name, "opening project");
        self.navigate_to_projects()?;

        let search = loc::search_input();
        self.h.wait_visible_within(&search, 30_000)?;
        self.h.click(&search)?;
        self.h.fill(&search, name)?;

        let card = loc::project_card(name);
        self.h.wait_visible_within(&card, 10_000)?;
        self.h.click(&card)
    }

    /// Export the projects table and parse it when it is a CSV.
    pub fn export_projects(&mut self) -> E2eResult<Option<CsvTable>> {
        let download = self
            .h
            .download(&crate::locators::property::visible_download_icon())?;
        check_export_name(&download.suggested_filename)?;
        info!(file = %download.suggested_filename, "projects exported");
        if download.suggested_filename.ends_with(".csv") {
            return read_csv(&download.path).map(Some);
        }
        Ok(None)
    }

    pub fn delete_first_row(&mut self) -> E2eResult<()> {
        self.h.click_with_delay(&loc::row_delete_button(), 200)?;
        self.h.click(&loc::delete_confirm_button())
    }
}
