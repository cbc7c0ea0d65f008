//! Properties list, property modal and property grid.

use crate::browser::locator::{Locator, TextMatch, quote, xpath_literal};

pub fn properties_nav_link() -> Locator {
    Locator::css(".mantine-NavLink-root:has-text('Properties')")
}

pub fn breadcrumbs_properties() -> Locator {
    Locator::css(".mantine-Breadcrumbs-root:has-text('Properties')")
}

pub fn breadcrumb_by_name(name: &str) -> Locator {
    Locator::css(format!(".mantine-Breadcrumbs-root:has-text({})", quote(name)))
}

pub fn create_property_button() -> Locator {
    Locator::css("button:has-text('Create Property')")
}

pub fn add_property_modal_header() -> Locator {
    Locator::css(".mantine-Modal-header:has-text('Add property')")
}

// Add property modal

pub fn name_input() -> Locator {
    Locator::label("Name")
}

pub fn address_input() -> Locator {
    Locator::role_matching("textbox", TextMatch::exact("Address"))
}

pub fn city_input() -> Locator {
    Locator::label("City")
}

pub fn state_input() -> Locator {
    Locator::label("State")
}

pub fn zip_input() -> Locator {
    Locator::label("Zipcode")
}

pub fn type_input() -> Locator {
    Locator::css("input[placeholder=\"Select type\"]")
}

pub fn cancel_button() -> Locator {
    Locator::role_matching("button", TextMatch::exact("Cancel"))
}

pub fn add_property_button() -> Locator {
    Locator::role_matching("button", TextMatch::pattern_ci("add property"))
}

pub fn address_suggestion(address: &str) -> Locator {
    Locator::css(format!(".mantine-Autocomplete-option:has-text({})", quote(address)))
}

pub fn property_type_option(kind: &str) -> Locator {
    Locator::css(format!(".mantine-Select-option:has-text({})", quote(kind)))
}

pub fn grid_card_by_name(name: &str) -> Locator {
    Locator::css(format!(".mantine-SimpleGrid-root p:has-text({})", quote(name)))
}

// View switching

pub fn layout_list_icon() -> Locator {
    Locator::css(".lucide.lucide-layout-list")
}

pub fn view_menu_item(view: &str) -> Locator {
    Locator::css(format!(".mantine-Menu-itemLabel:has-text({})", quote(view)))
}

pub fn grid_root_wrapper() -> Locator {
    Locator::css(".ag-root-wrapper")
}

// Filters

pub fn filter_icon() -> Locator {
    Locator::css(".lucide.lucide-funnel")
}

/// Funnel icon button, by role, for grids with several icon buttons.
pub fn filter_button() -> Locator {
    Locator::role("button").has(Locator::css("svg.lucide-funnel"))
}

pub fn filter_panel_title() -> Locator {
    Locator::css(".mantine-Paper-root p:has-text('Filter')")
}

pub fn filter_checkbox(value: &str) -> Locator {
    Locator::css(format!("input[value={}]", quote(value)))
}

/// Checkbox found by its visible label rather than its value.
pub fn filter_checkbox_by_label(label: &str) -> Locator {
    Locator::css(".mantine-Paper-root .mantine-Checkbox-root").has_text(label).css_within("input")
}

pub fn filter_badges() -> Locator {
    Locator::css(".ag-center-cols-container .mantine-Badge-label")
}

pub fn clear_all_filters_link() -> Locator {
    Locator::css(".mantine-Paper-root a:has-text(\"Clear All Filters\")")
}

pub fn filter_panel_close() -> Locator {
    Locator::css(".mantine-Paper-root .mantine-CloseButton-root")
}

// Export, search, delete

pub fn download_icon() -> Locator {
    Locator::css(".lucide-download")
}

pub fn visible_download_icon() -> Locator {
    Locator::css(".lucide-download:visible")
}

pub fn search_input() -> Locator {
    Locator::css("input[placeholder=\"Search...\"]")
}

pub fn grid_rows() -> Locator {
    Locator::css(".ag-center-cols-container div[role=\"row\"]")
}

pub fn first_row_name_cell() -> Locator {
    Locator::css(".ag-center-cols-container div[role=\"row\"] div[col-id=\"name\"]").first()
}

pub fn property_name_cell(name: &str) -> Locator {
    Locator::css(format!(
        ".ag-center-cols-container p[title={q}], span:has-text({q})",
        q = quote(name)
    ))
}

pub fn property_name_paragraph(name: &str) -> Locator {
    Locator::css(format!(".ag-center-cols-container p[title={}]", quote(name)))
}

/// The grid row containing the cell for `name`.
pub fn row_of_property(name: &str) -> Locator {
    property_name_cell(name).css_within("xpath=ancestor::div[@role='row']").first()
}

pub fn row_delete_icon(row_index: &str) -> Locator {
    Locator::css(format!(
        ".ag-pinned-right-cols-container div[row-index={}] .lucide-trash-2",
        quote(row_index)
    ))
}

pub fn popover_delete_button() -> Locator {
    Locator::css(".mantine-Popover-dropdown button:has-text(\"Delete\")")
}

// Detail view

pub fn view_details_button() -> Locator {
    Locator::css("button[title=\"View Details\"]")
}

pub fn tab(name: &str) -> Locator {
    Locator::role_matching("tab", TextMatch::exact(name))
}

pub fn overview_field_label(label: &str) -> Locator {
    Locator::text_exact(label)
}

pub fn overview_field_value(label: &str) -> Locator {
    Locator::xpath(format!(
        "//p[text()={}]/./following-sibling::div//p",
        xpath_literal(label)
    ))
    .first()
}

// Add data (custom column) modal

pub fn add_data_button() -> Locator {
    Locator::css("button[data-testid=\"bt-add-column\"]")
}

pub fn column_name_input() -> Locator {
    Locator::css("input[placeholder^=\"Enter column name\"]")
}

pub fn column_description_input() -> Locator {
    Locator::css("input[placeholder^=\"Enter column description\"]")
}

pub fn column_type_buttons() -> Locator {
    Locator::css("div[style*=\"grid-template-columns\"] button")
}

pub fn submit_add_column() -> Locator {
    Locator::css("button:has-text(\"Add column\"):not([disabled])")
}
