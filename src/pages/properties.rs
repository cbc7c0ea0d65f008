use tracing::info;

use crate::browser::page::Download;
use crate::data::export::check_export_name;
use crate::data::generate::normalize_filter_value;
use crate::error::{E2eError, E2eResult};
use crate::harness::Harness;
use crate::locators::property as loc;

pub struct PropertiesPage<'h> {
    h: &'h mut Harness,
}

impl<'h> PropertiesPage<'h> {
    pub fn new(h: &'h mut Harness) -> Self {
        PropertiesPage { h }
    }

    pub fn goto(&mut self, url: &str) -> E2eResult<()> {
        info!(url, "navigating");
        self.h.goto(url)?;
        info!(url, "navigation successful");
        Ok(())
    }

    pub fn go_to_properties(&mut self) -> E2eResult<()> {
        self.h.click(&loc::properties_nav_link())?;
        self.h.wait_visible(&loc::breadcrumbs_properties())?;
        self.h.expect_url(r".*/properties")?;
        Ok(())
    }

    /// Create a property through the modal and check it lands in the card grid.
    pub fn create_property(&mut self, name: &str, address: &str, kind: &str) -> E2eResult<()> {
        info!(name, address, kind, "creating property");
        self.h.settle()?;
        self.h.wait_visible(&loc::create_property_button())?;
        self.h.click_forced(&loc::create_property_button())?;

        self.h.wait_visible(&loc::add_property_modal_header())?;
        self.verify_modal_fields()?;

        self.h.fill(&loc::name_input(), name)?;
        self.h.fill(&loc::address_input(), address)?;
        self.h.click(&loc::address_suggestion(address))?;
        self.h.fill(&loc::type_input(), kind)?;
        self.h.click(&loc::property_type_option(kind))?;
        self.h.settle()?;
        self.h.click(&loc::add_property_button())?;

        self.h.wait_visible(&loc::breadcrumb_by_name(name))?;
        self.h.click(&loc::properties_nav_link())?;
        self.h.wait_visible(&loc::grid_card_by_name(name))?;

        self.h.scratch.save_property(name)?;
        info!(name, "property created");
        Ok(())
    }

    pub fn verify_modal_fields(&mut self) -> E2eResult<()> {
        for field in [
            loc::name_input(),
            loc::address_input(),
            loc::city_input(),
            loc::state_input(),
            loc::zip_input(),
            loc::type_input(),
            loc::cancel_button(),
            loc::add_property_button(),
        ] {
            self.h.expect(&field).to_be_visible()?;
        }
        Ok(())
    }

    /// Switch between `Table View` and `Grid View`.
    pub fn change_view(&mut self, view: &str) -> E2eResult<()> {
        self.h.settle()?;
        self.h.click(&loc::layout_list_icon())?;
        self.h.click(&loc::view_menu_item(view))?;
        self.h.wait_visible(&loc::grid_root_wrapper())?;
        self.h.settle()?;
        info!(view, "view changed");
        Ok(())
    }

    pub fn open_filter_panel(&mut self) -> E2eResult<()> {
        self.h.click(&loc::filter_icon())?;
        self.h.wait_visible(&loc::filter_panel_title())?;
        Ok(())
    }

    /// Tick the filter for `kind` and check the grid only shows that type.
    /// Returns the number of badges shown; the filter is cleared either way.
    pub fn filter_property(&mut self, kind: &str) -> E2eResult<u32> {
        self.h.wait_visible(&loc::filter_panel_title())?;

        let value = normalize_filter_value(kind);
        self.h.click(&loc::filter_checkbox(&value))?;
        self.h.settle()?;

        let badges = loc::filter_badges();
        let count = self.h.wait_stable_count(&badges)?;

        if count == 0 {
            info!(kind, "filter has no data in the table");
            self.h.click(&loc::clear_all_filters_link())?;
            return Ok(0);
        }

        let first = badges.first();
        self.h.wait_visible_within(&first, 5_000)?;
        let text = self.h.text_of(&first)?;
        if text != kind {
            return Err(E2eError::AssertionFailed {
                locator: first.to_string(),
                expectation: format!("to have text {:?}", kind),
                actual: text,
            });
        }
        info!(kind, count, "filter shows only matching rows");

        self.h.click(&loc::clear_all_filters_link())?;
        Ok(count)
    }

    /// Tick a filter by its visible label; returns the settled row count.
    pub fn filter_property_by_label(&mut self, label: &str) -> E2eResult<u32> {
        self.h.click_forced(&loc::filter_checkbox_by_label(label))?;
        self.h.settle()?;
        let rows = self.h.wait_stable_count(&loc::grid_rows())?;
        info!(label, rows, "filter applied");
        Ok(rows)
    }

    pub fn close_filter_panel(&mut self) -> E2eResult<()> {
        self.h.click(&loc::filter_panel_close())
    }

    /// Export the grid; the file must be a spreadsheet, CSV or PDF.
    pub fn export(&mut self) -> E2eResult<Download> {
        let download = self.h.download(&loc::download_icon())?;
        info!(file = %download.suggested_filename, "downloaded");
        check_export_name(&download.suggested_filename)?;
        Ok(download)
    }

    pub fn search_property(&mut self, name: &str) -> E2eResult<()> {
        let search = loc::search_input();
        self.h.fill(&search, name)?;
        self.h.settle()?;
        self.h.expect(&loc::first_row_name_cell()).to_have_text(name)?;
        info!(name, "search successful");
        self.h.clear(&search)?;
        Ok(())
    }

    pub fn delete_property(&mut self, name: &str) -> E2eResult<()> {
        let row = loc::row_of_property(name);
        self.h.wait_attached(&row)?;
        let row_index = self
            .h
            .attribute(&row, "row-index")?
            .ok_or_else(|| E2eError::ElementNotFound {
                element: row.to_string(),
                context: format!("row of property {:?} has no row-index", name),
            })?;

        self.h.settle()?;
        self.h.click(&loc::row_delete_icon(&row_index))?;
        self.h.click(&loc::popover_delete_button())?;

        let cell = loc::property_name_paragraph(name);
        self.h.wait_hidden(&cell)?;
        self.h.expect(&cell).to_be_hidden()?;
        info!(name, "property deleted");
        Ok(())
    }

    /// Each overview label shows the expected value.
    pub fn validate_job_details(&mut self, expected: &[(&str, &str)]) -> E2eResult<()> {
        for (label, value) in expected {
            self.h.expect(&loc::overview_field_label(label)).to_be_visible()?;
            self.h
                .expect(&loc::overview_field_value(label))
                .to_have_text(value)?;
            info!(label, value, "overview field verified");
        }
        Ok(())
    }
}
