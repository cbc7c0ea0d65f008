use regex::Regex;
use tracing::{info, warn};

use crate::browser::locator::Locator;
use crate::data::generate;
use crate::error::{E2eError, E2eResult};
use crate::harness::Harness;
use crate::locators::job as loc;

pub const BID_WITH_MATERIAL: &str = "Bid with material";
pub const BID_WITHOUT_MATERIAL: &str = "Bid without material";
pub const DEFAULT_JOB_TYPE: &str = "UNIT INTERIOR";
pub const BASELINE_TEMPLATE: &str = "Tailorbird Baseline Bid Book - Detailed";
pub const RESET_TABLE_MESSAGE: &str = "Are you sure you want to reset the bid table? This will delete all bid rows and cannot be undone. The table will be cleared and ready for new entries.";
pub const JOB_SESSION_STATE: &str = "jobsessionState.json";

/// Which editor took a first-row cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEditor {
    Input,
    Textarea,
    Keyboard,
}

/// A job inside a project: the jobs grid, the job summary and its bids.
pub struct ProjectJobPage<'h> {
    h: &'h mut Harness,
}

impl<'h> ProjectJobPage<'h> {
    pub fn new(h: &'h mut Harness) -> Self {
        ProjectJobPage { h }
    }

    pub fn navigate_to_jobs_tab(&mut self) -> E2eResult<()> {
        info!("navigating to Jobs tab");
        let tab = loc::jobs_tab();
        self.h.click(&tab)?;
        self.h.settle()?;
        // The first click sometimes only focuses the tab list.
        if !self.on_tab("jobs")? {
            self.h.click(&tab)?;
        }
        self.h.wait_url("tab=jobs")?;
        info!("on the Jobs tab");
        Ok(())
    }

    /// Add an empty job row through the grid's add menu.
    pub fn add_job(&mut self) -> E2eResult<()> {
        self.h.click(&loc::add_job_menu())?;
        self.h.wait_visible_within(&loc::menu_dropdown(), 5_000)?;
        self.h.click(&loc::add_job_menu_item())?;
        self.h.wait_attached(&loc::title_cells())?;

        self.h.expect(&loc::view_details_button()).with_timeout(10_000).to_be_visible()?;
        self.h.expect(&loc::delete_row_button()).with_timeout(10_000).to_be_visible()?;
        info!("new job row added");
        Ok(())
    }

    /// Create a job from the Create Job modal, picking `kind` from the type list.
    pub fn create_job_via_modal(&mut self, title: &str, kind: &str) -> E2eResult<()> {
        let create = loc::create_job_button();
        self.h.expect(&create).to_be_visible()?;
        self.h.expect(&create).to_be_enabled()?;
        self.h.click(&create)?;

        self.h.expect(&loc::modal()).to_be_visible()?;
        let title_input = loc::modal_title_input();
        let type_input = loc::modal_job_type_input();
        for field in [
            title_input.clone(),
            type_input.clone(),
            loc::modal_description_input(),
            loc::modal_cancel_button(),
            loc::modal_submit_button(),
        ] {
            self.h.expect(&field).to_be_visible()?;
        }

        self.h.fill(&title_input, title)?;
        self.h.click(&type_input)?;
        for offered in ["Capex", "Unit Interior"] {
            self.h.expect(&loc::job_type_option(offered)).to_be_visible()?;
        }
        self.h.click(&loc::job_type_option(kind))?;
        self.h.expect(&type_input).to_have_value(kind)?;

        self.h.click(&loc::modal_submit_button())?;
        info!(title, kind, "job submitted");
        Ok(())
    }

    /// The overview header and its enabled Edit button are shown.
    pub fn verify_job_overview(&mut self) -> E2eResult<()> {
        self.h.expect(&loc::job_overview_title()).to_be_visible()?;
        let edit = loc::edit_button();
        self.h.expect(&edit).to_be_visible()?;
        self.h.expect(&edit).to_be_enabled()
    }

    pub fn edit_job_title(&mut self, new_title: &str) -> E2eResult<()> {
        self.h.dblclick(&loc::empty_title_cell())?;
        self.h.fill(&loc::title_input(), new_title)?;
        self.h.settle()?;
        self.h.press_key("Enter")?;
        info!(new_title, "job title updated");
        Ok(())
    }

    pub fn select_job_type(&mut self, kind: &str) -> E2eResult<()> {
        info!(kind, "selecting job type");
        self.h.settle()?;
        let cell = loc::job_type_cell(DEFAULT_JOB_TYPE);
        self.h.wait_visible_within(&cell, 10_000)?;
        self.h.dblclick(&cell)?;
        self.h.settle()?;
        self.h.click(&loc::job_type_dropdown_option(kind))
    }

    pub fn open_job_summary(&mut self) -> E2eResult<()> {
        info!("opening job summary");
        self.h.settle()?;
        self.h.click(&loc::view_details_button())?;
        self.h.settle()
    }

    pub fn fill_job_description(&mut self, description: &str) -> E2eResult<()> {
        self.h.fill(&loc::description_input(), description)
    }

    /// Pick today and tomorrow in the summary date pickers; returns their labels.
    pub fn select_start_end_dates(&mut self) -> E2eResult<(String, String)> {
        let today = generate::today();
        let start = generate::picker_label(today);
        let end = generate::picker_label(generate::days_after(today, 1));

        info!(%start, "selecting start date");
        self.h.click(&loc::select_start_date_button())?;
        self.h.click(&loc::picker_day(&start))?;

        info!(%end, "selecting end date");
        self.h.click(&loc::select_end_date_button())?;
        self.h.click(&loc::picker_day(&end))?;

        self.h.expect_url("tab=summary")?;
        info!("job summary verified");
        Ok((start, end))
    }

    fn search_and_pick_scope(&mut self, cell: &Locator, scope: &str) -> E2eResult<()> {
        self.h.dblclick(cell)?;
        let search = loc::bid_search_input();
        self.h.fill(&search, scope)?;
        self.h.press(&search, "Enter")?;
        self.h.settle()
    }

    pub fn create_bid_with_material(&mut self) -> E2eResult<()> {
        let tab = loc::bids_tab();
        self.h.expect(&tab).to_be_visible()?;
        self.h.expect(&tab).to_be_enabled()?;
        info!("bids tab is visible and enabled");

        self.h.click(&tab)?;
        self.h.click(&loc::bids_panel_add_row())?;
        self.h.click(&loc::add_row_button().first())?;
        self.search_and_pick_scope(&loc::scope_cells().first(), BID_WITH_MATERIAL)?;
        info!("created bid with material");
        Ok(())
    }

    pub fn create_bid_without_material(&mut self) -> E2eResult<()> {
        self.h.click(&loc::bids_tab())?;
        self.h.click(&loc::bids_panel_add_row_menu())?;
        self.h.click(&loc::add_row_button())?;
        self.h.wait_stable_count(&loc::scope_cells())?;
        self.search_and_pick_scope(&loc::scope_cells().last(), BID_WITHOUT_MATERIAL)?;
        info!("created bid without material");
        Ok(())
    }

    /// The invite button only shows on the vendors view; switch to it first when hidden.
    fn ensure_vendor_view(&mut self) -> E2eResult<()> {
        if !self.h.is_visible(&loc::invite_vendors_to_bid_button())? {
            info!("invite button hidden, opening Manage Vendors");
            self.h.click(&loc::manage_vendors_link())?;
        }
        Ok(())
    }

    pub fn invite_vendors_to_bid(&mut self) -> E2eResult<()> {
        info!("inviting vendors to bid");
        self.ensure_vendor_view()?;
        self.h.click(&loc::invite_vendors_to_bid_button())?;
        self.h.wait_visible(&loc::vendor_drawer_search())?;
        Ok(())
    }

    pub fn invite_existing_vendor(&mut self, vendor: &str) -> E2eResult<()> {
        self.h.fill(&loc::vendor_drawer_search(), vendor)?;
        self.h.click(&loc::vendor_row_checkbox(vendor))?;
        self.h.click(&loc::invite_selected_vendors_button())?;
        self.h.settle()?;
        self.h
            .expect(&loc::vendor_name_cell(vendor))
            .to_contain_text(vendor)?;
        info!(vendor, "vendor invited");
        Ok(())
    }

    /// Apply the baseline template, then save the bid book as a new
    /// template. Returns the saved template's name.
    pub fn verify_bid_template(&mut self) -> E2eResult<String> {
        self.h.click(&loc::bids_tab())?;
        self.h.settle()?;

        info!("verifying bid template menu");
        self.h.click(&loc::template_menu_button())?;
        let apply_option = loc::template_menu_option(BASELINE_TEMPLATE);
        let save_option = loc::template_menu_option("Save as Template");
        self.h.expect(&loc::template_menu()).to_be_visible()?;
        self.h.expect(&apply_option).to_be_visible()?;
        self.h.expect(&loc::template_menu_globe()).to_be_visible()?;
        self.h.expect(&loc::template_menu_divider()).to_be_visible()?;
        self.h.expect(&save_option).to_be_visible()?;

        self.h.click(&apply_option)?;
        self.h.expect(&loc::dialog()).to_be_visible()?;
        let title = self.h.text_of(&loc::dialog_part("h2"))?;
        let message = self.h.text_of(&loc::dialog_part("p"))?;
        info!(%title, %message, "apply template dialog");
        self.h.expect(&loc::dialog_button("Cancel")).to_be_visible()?;
        let apply = loc::dialog_button("Apply Template");
        self.h.expect(&apply).to_be_visible()?;
        self.h.click(&apply)?;

        self.expect_notification(&["Template Applied", "has been applied successfully"])?;

        self.h.click(&loc::template_menu_button())?;
        self.h.expect(&loc::template_menu()).to_be_visible()?;
        self.h.click(&save_option)?;

        self.h.expect(&loc::dialog()).to_be_visible()?;
        self.h
            .expect(&loc::dialog_part("h2"))
            .to_have_text("Save as Template")?;
        let name_input = loc::dialog_part("input[placeholder=\"Enter template name\"]");
        let description_input = loc::dialog_part("textarea[placeholder*=\"template description\"]");
        for part in [
            loc::dialog_part("label:has-text(\"Template Name\")"),
            name_input.clone(),
            loc::dialog_part("label:has-text(\"Description\")"),
            description_input.clone(),
            loc::dialog_button("Cancel"),
            loc::dialog_button("Save Template"),
        ] {
            self.h.expect(&part).to_be_visible()?;
        }

        let template_name = generate::timestamped("Automation Template");
        self.h.fill(&name_input, &template_name)?;
        self.h
            .fill(&description_input, "This is an automation-generated template.")?;
        self.h.click(&loc::dialog_button("Save Template"))?;

        self.expect_notification(&["Template Saved", "has been saved successfully"])?;
        info!(%template_name, "save as template validated");
        Ok(template_name)
    }

    fn expect_notification(&mut self, fragments: &[&str]) -> E2eResult<()> {
        let notification = loc::notification();
        self.h
            .expect(&notification)
            .with_timeout(15_000)
            .to_be_visible()?;
        for fragment in fragments {
            self.h.expect(&notification).to_contain_text(fragment)?;
        }
        Ok(())
    }

    /// Write a value into every cell of the first bid row. Returns the
    /// values written and which editor accepted each.
    pub fn validate_and_update_first_row(&mut self) -> E2eResult<Vec<(String, CellEditor)>> {
        info!("updating first row of the bid grid");
        self.h.expect(&loc::first_grid_row()).to_be_visible()?;

        let cell_count = self.h.count(&loc::first_row_cells())?;
        info!(cell_count, "cells in the first row");

        let mut written = Vec::with_capacity(cell_count as usize);
        for i in 0..cell_count {
            let cell = loc::first_row_cell(i as i32);
            self.h.scroll_into_view(&cell)?;
            let value = generate::bid_cell_value(i as usize);

            self.h.click_forced(&cell)?;
            let input = loc::cell_input_editor();
            let textarea = loc::cell_textarea_editor();
            let editor = if self.h.is_visible_within(&input, 300)? {
                self.h.fill(&input, &value)?;
                CellEditor::Input
            } else if self.h.is_visible_within(&textarea, 300)? {
                self.h.fill(&textarea, &value)?;
                CellEditor::Textarea
            } else {
                warn!(cell = i, "no editor found, typing into the cell");
                self.h.page().type_text(&cell, &value, None)?;
                CellEditor::Keyboard
            };
            info!(cell = i, %value, ?editor, "cell updated");

            self.h.press_key("Enter")?;
            written.push((value, editor));
        }
        Ok(written)
    }

    /// Create a bid with material, then set quantity and unit cost to 100.
    pub fn update_bid_with_material(&mut self) -> E2eResult<()> {
        self.create_bid_with_material()?;

        for column in ["quantity", "unit_cost"] {
            info!(column, "filling with 100");
            let cell = loc::row_zero_cell(column);
            self.h.expect(&cell).to_be_visible()?;
            self.h.dblclick_forced(&cell)?;
            let input = loc::row_zero_cell_input(column);
            self.h.fill(&input, "100")?;
            self.h.settle()?;
            self.h.press(&input, "Enter")?;
            self.h.settle()?;
        }
        info!("bid with material row completed");
        Ok(())
    }

    pub fn navigate_to_bids_tab(&mut self) -> E2eResult<()> {
        let tab = loc::bids_tab();
        self.h.expect(&tab).to_be_enabled()?;
        self.h.click(&tab)?;
        self.h.settle()?;
        info!("on the Bids tab");
        Ok(())
    }

    /// Reset the bid table through its confirmation modal; returns the rows left.
    pub fn reset_bid_table(&mut self) -> E2eResult<u32> {
        self.h.click(&loc::reset_icon_button())?;

        let modal = loc::section_dialog();
        self.h.expect(&modal).to_be_visible()?;
        self.h
            .expect(&loc::section_dialog_part("h2.mantine-Modal-title"))
            .to_have_text("Reset Bid Table")?;
        self.h
            .expect(&loc::section_dialog_part("div.mantine-Modal-body p"))
            .to_have_text(RESET_TABLE_MESSAGE)?;

        for (selector, text) in [
            ("button:has-text(\"Cancel\")", "Cancel"),
            ("button:has-text(\"Reset Table\")", "Reset Table"),
        ] {
            let button = loc::section_dialog_part(selector);
            self.h.expect(&button).to_be_visible()?;
            self.h.expect(&button).to_have_text(text)?;
        }

        self.h
            .click(&loc::section_dialog_part("button:has-text(\"Reset Table\")").first())?;
        self.h.expect(&modal).to_be_hidden()?;

        let rows = self.h.count(&loc::reset_rows())?;
        if rows > 2 {
            return Err(E2eError::check(format!(
                "{} rows remain after resetting the bid table",
                rows
            )));
        }
        info!(rows, "bid table reset");
        Ok(rows)
    }

    /// Structural checks of the scope mix modal, then add a scope through
    /// its inline editor. Returns the new scope's name.
    pub fn verify_scope_mix_modal(&mut self) -> E2eResult<String> {
        self.h.click(&loc::scope_mix_button())?;
        let modal = loc::section_dialog();
        self.h.expect(&modal).to_be_visible()?;

        let texts = self.h.texts_of(&modal)?;
        if texts.concat().is_empty() {
            return Err(E2eError::check("scope mix modal renders no text"));
        }

        let close = loc::section_dialog_part("button:has(svg[viewBox=\"0 0 15 15\"])");
        self.h.expect(&close).to_be_visible()?;

        let search = loc::section_dialog_part("input.mantine-Input-input");
        self.h.expect(&search).to_be_visible()?;
        self.non_empty_attribute(&search, "placeholder")?;

        let plus = loc::section_dialog_part("button:has(svg.lucide-plus)");
        self.h.expect(&plus).to_be_visible()?;
        self.h
            .expect(&loc::section_dialog_part("button:has(svg.lucide-repeat-2)"))
            .to_be_visible()?;

        let grid = loc::section_dialog_part(".ag-root");
        self.h.expect(&grid).to_be_visible()?;
        if self.h.text_of(&grid)?.is_empty() {
            return Err(E2eError::check("scope mix grid is empty"));
        }

        for button in ["button:has-text(\"Clear All\")", "button:has-text(\"Submit\")"] {
            let button = loc::section_dialog_part(button);
            self.h.expect(&button).to_be_visible()?;
            self.h.expect(&button).to_be_disabled()?;
        }

        let buttons = self.h.texts_of(&loc::section_dialog_part("button"))?;
        info!(labels = %buttons.join(" | "), "scope mix buttons");
        if self.h.count(&loc::section_dialog_part("svg"))? == 0 {
            return Err(E2eError::check("scope mix modal renders no icons"));
        }

        for region in [
            loc::section_dialog_part(".mantine-Modal-body"),
            loc::section_dialog_part(".mantine-Stack-root"),
            loc::section_dialog_part(".mantine-InputWrapper-root"),
            loc::section_dialog_part(".mantine-Group-root").first(),
        ] {
            self.h.expect(&region).to_be_visible()?;
        }

        self.h.click(&plus)?;
        let editor = loc::scope_editor();
        self.h.expect(&editor).to_be_visible()?;
        let input = loc::scope_editor_part("input.mantine-Input-input");
        self.h.expect(&input).to_be_visible()?;
        self.non_empty_attribute(&input, "placeholder")?;

        let check = loc::scope_editor_part("button:has(svg.lucide-check)");
        self.h.expect(&check).to_be_visible()?;
        self.h
            .expect(&loc::scope_editor_part("button:has(svg.lucide-x)"))
            .to_be_visible()?;
        self.h.expect(&check).to_be_disabled()?;

        let scope = generate::timestamped("Scope");
        self.h.fill(&input, &scope)?;
        self.h.expect(&check).to_be_enabled()?;
        self.h.click(&check)?;
        self.h.expect(&editor).to_be_hidden()?;

        self.h.click(&close)?;
        self.h.expect(&modal).to_be_hidden()?;
        info!(%scope, "scope mix modal verified");
        Ok(scope)
    }

    fn non_empty_attribute(&mut self, locator: &Locator, name: &str) -> E2eResult<String> {
        match self.h.attribute(locator, name)? {
            Some(value) if !value.trim().is_empty() => Ok(value),
            other => Err(E2eError::AssertionFailed {
                locator: locator.to_string(),
                expectation: format!("to have a non-empty {}", name),
                actual: format!("{:?}", other),
            }),
        }
    }

    /// Edit the first vendor's total price and submit the bid for them.
    /// Returns the URL the bid was submitted from, which is saved for the
    /// invoice suite.
    pub fn edit_bid_on_behalf_of_vendor(&mut self, amount: &str) -> E2eResult<String> {
        info!(amount, "editing bid on behalf of vendor");
        self.h.click(&loc::row_action_button())?;
        self.h.click(&loc::menu_item("Edit On Behalf of Vendor"))?;
        self.h.wait_visible(&loc::modal_heading())?;

        self.h.dblclick(&loc::total_price_cell())?;
        let input = loc::currency_input();
        self.h.wait_visible_within(&input, 10_000)?;
        self.h.fill(&input, amount)?;

        self.h.accept_next_dialog()?;
        self.h.click_forced(&loc::submit_bid_button())?;

        let close = loc::modal_close_button();
        self.h.wait_visible_within(&close, 10_000)?;
        if let Some(message) = self.h.take_dialog_message()? {
            info!(%message, "dialog accepted");
        }
        self.h.click(&close)?;

        let url = self.h.current_url()?;
        self.h.scratch.save_last_url(&url)?;
        let state = self.h.scratch.path_of(JOB_SESSION_STATE);
        self.h.save_storage_state(&state)?;
        Ok(url)
    }

    pub fn award_bid(&mut self) -> E2eResult<()> {
        self.ensure_vendor_view()?;
        self.h.settle()?;

        let action = loc::row_action_button();
        self.h.wait_visible(&action)?;
        self.h.click(&action)?;
        self.h.settle()?;
        self.h.click(&loc::menu_item("Award Bid"))?;

        self.h.wait_visible(&loc::section_dialog())?;
        self.h
            .expect(&loc::section_dialog_part("button:has-text(\"Cancel\")"))
            .to_be_visible()?;
        let award = loc::section_dialog_part("button:has-text(\"Award\")").first();
        self.h.expect(&award).to_be_visible()?;
        self.h.click(&award)?;
        info!("bid awarded");
        Ok(())
    }

    pub fn verify_awarded_and_finalize_contract(&mut self) -> E2eResult<()> {
        let status = loc::awarded_status();
        self.h.wait_visible_within(&status, 10_000)?;
        self.h.expect(&status).to_have_text("Awarded")?;
        info!("vendor has been awarded");

        self.h.click(&loc::contracts_tab())?;
        self.h.click(&loc::finalize_contract_button())?;
        let confirm = loc::finalize_contract_confirm();
        self.h.click(&confirm)?;
        self.h.wait_hidden(&confirm)?;

        self.h.wait_attached(&loc::bulk_update_status_button())?;
        info!("contract finalized");
        Ok(())
    }

    /// Whether the current URL is on the given job tab.
    pub fn on_tab(&mut self, tab: &str) -> E2eResult<bool> {
        let re = Regex::new(&format!("tab={}", regex::escape(tab)))?;
        Ok(re.is_match(&self.h.current_url()?))
    }
}
