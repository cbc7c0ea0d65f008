//! Jobs tab, job summary and bid grid.

use crate::browser::locator::{Locator, TextMatch, quote};

pub fn jobs_tab() -> Locator {
    Locator::text_exact("Jobs")
}

pub fn jobs_tab_panel() -> Locator {
    Locator::role_matching("tabpanel", TextMatch::exact("Jobs"))
}

pub fn add_job_menu() -> Locator {
    jobs_tab_panel().locator(Locator::test_id("bt-add-row-menu"))
}

pub fn menu_dropdown() -> Locator {
    Locator::css("div[role=\"menu\"], .mantine-Menu-dropdown")
}

pub fn add_job_menu_item() -> Locator {
    Locator::role_matching("menuitem", TextMatch::exact("Add Job"))
}

pub fn title_cells() -> Locator {
    Locator::css("div[role=\"gridcell\"][col-id=\"title\"]")
}

pub fn empty_title_cell() -> Locator {
    Locator::css("div[role=\"gridcell\"][col-id=\"title\"]:has-text('—')").first()
}

pub fn title_input() -> Locator {
    Locator::css("div[role=\"gridcell\"][col-id=\"title\"] input").first()
}

pub fn view_details_button() -> Locator {
    Locator::css("button[title=\"View Details\"]").first()
}

pub fn delete_row_button() -> Locator {
    Locator::css("button[aria-label=\"Delete Row\"]").first()
}

pub fn job_type_cell(current: &str) -> Locator {
    Locator::css(format!("span:has-text({})", quote(current)))
}

pub fn job_type_dropdown_option(kind: &str) -> Locator {
    Locator::css(format!(
        "[data-testid=\"bird-table-select-dropdown\"] p:has-text({})",
        quote(kind)
    ))
}

// Create job modal

pub fn create_job_button() -> Locator {
    Locator::css("button").has_text("Create Job")
}

pub fn modal() -> Locator {
    Locator::css("[data-modal-content=\"true\"]")
}

pub fn modal_title_input() -> Locator {
    Locator::placeholder("Enter title")
}

pub fn modal_job_type_input() -> Locator {
    Locator::placeholder("Select job type")
}

pub fn modal_description_input() -> Locator {
    Locator::placeholder("Enter description")
}

pub fn modal_cancel_button() -> Locator {
    Locator::role_matching("button", TextMatch::exact("Cancel"))
}

pub fn modal_submit_button() -> Locator {
    Locator::role_matching("button", TextMatch::pattern_ci("add job"))
}

pub fn job_type_option(kind: &str) -> Locator {
    Locator::role_matching("option", TextMatch::pattern_ci(kind))
}

pub fn job_overview_title() -> Locator {
    Locator::text("Job Overview")
}

pub fn edit_button() -> Locator {
    Locator::role_matching("button", TextMatch::exact("Edit"))
}

// Job summary

pub fn job_summary_tab() -> Locator {
    Locator::css(".mantine-Tabs-tabLabel:has-text(\"Job Summary\")")
}

pub fn description_input() -> Locator {
    Locator::css("input[placeholder=\"Enter job description\"]")
}

pub fn select_start_date_button() -> Locator {
    Locator::role_matching("button", TextMatch::exact("Select start date"))
}

pub fn select_end_date_button() -> Locator {
    Locator::role_matching("button", TextMatch::exact("Select end date"))
}

pub fn picker_day(aria_label: &str) -> Locator {
    Locator::css(format!("button[aria-label={}]", quote(aria_label)))
}

// Bids

pub fn bids_tab() -> Locator {
    Locator::css(".mantine-Tabs-tabLabel:has-text(\"Bids\")")
}

pub fn bids_tab_panel() -> Locator {
    Locator::role_matching("tabpanel", TextMatch::exact("Bids"))
}

pub fn bids_panel_add_row() -> Locator {
    bids_tab_panel().locator(Locator::test_id("bt-add-row")).first()
}

pub fn bids_panel_add_row_menu() -> Locator {
    bids_tab_panel().locator(Locator::test_id("bt-add-row-menu"))
}

pub fn add_row_button() -> Locator {
    Locator::test_id("bt-add-row")
}

pub fn bid_search_input() -> Locator {
    Locator::test_id("bird-table-select-search")
}

pub fn scope_cells() -> Locator {
    Locator::css("div[role=\"gridcell\"][col-id=\"scope\"]")
}

pub fn invite_vendors_to_bid_button() -> Locator {
    Locator::css("button:has-text('Invite Vendors To Bid')")
}

pub fn manage_vendors_link() -> Locator {
    Locator::css("p:has-text(\"Manage Vendors\")")
}

pub fn vendor_drawer_search() -> Locator {
    Locator::css(".mantine-Drawer-body input[placeholder=\"Search...\"]")
}

pub fn vendor_row_checkbox(vendor: &str) -> Locator {
    Locator::css(format!(
        ".ag-pinned-left-cols-container div[role=\"row\"]:has-text({}) .ag-checkbox",
        quote(vendor)
    ))
}

pub fn invite_selected_vendors_button() -> Locator {
    Locator::css("button:has-text('Invite Selected Vendors to Bid')")
}

pub fn vendor_name_cell(vendor: &str) -> Locator {
    Locator::css(format!("div[col-id=\"vendor_name\"]:has-text({})", quote(vendor)))
}

// Bid templates

pub fn template_menu_button() -> Locator {
    Locator::css("button:has(svg.lucide-file-text)").nth(2)
}

pub fn template_menu() -> Locator {
    Locator::css("[data-menu-dropdown=\"true\"]")
}

pub fn template_menu_option(text: &str) -> Locator {
    template_menu().css_within("button").locator(Locator::css(format!("text={}", text)))
}

pub fn template_menu_globe() -> Locator {
    template_menu().css_within("button svg.lucide-globe")
}

pub fn template_menu_divider() -> Locator {
    template_menu().css_within(".mantine-Menu-divider").first()
}

pub fn dialog() -> Locator {
    Locator::css("[data-modal-content=\"true\"]")
}

pub fn dialog_part(selector: &str) -> Locator {
    dialog().css_within(selector)
}

pub fn dialog_button(text: &str) -> Locator {
    dialog().css_within(format!("button:has-text({})", quote(text)))
}

pub fn notification() -> Locator {
    Locator::css(".mantine-Notification-root").first()
}

// First-row editing

pub fn first_grid_row() -> Locator {
    Locator::css(".ag-center-cols-container .ag-row").first()
}

pub fn first_row_cells() -> Locator {
    first_grid_row().css_within(".ag-cell")
}

pub fn first_row_cell(index: i32) -> Locator {
    first_row_cells().nth(index)
}

pub fn cell_input_editor() -> Locator {
    Locator::css(".ag-cell-edit-input, input.ag-input-field-input, input").first()
}

pub fn cell_textarea_editor() -> Locator {
    Locator::css("textarea").first()
}

pub fn row_zero_cell(column: &str) -> Locator {
    Locator::css(format!("div[row-index=\"0\"] div[col-id={}]", quote(column))).first()
}

pub fn row_zero_cell_input(column: &str) -> Locator {
    row_zero_cell(column).css_within("input")
}

// Reset table

pub fn reset_icon_button() -> Locator {
    Locator::css("button[data-variant=\"subtle\"][data-size=\"md\"] svg.lucide-rotate-ccw").first()
}

pub fn section_dialog() -> Locator {
    Locator::css("section[role=\"dialog\"]")
}

pub fn section_dialog_part(selector: &str) -> Locator {
    section_dialog().css_within(selector)
}

pub fn reset_rows() -> Locator {
    Locator::css("div[role=\"row\"][row-index=\"t-0\"]")
}

// Scope mix

pub fn scope_mix_button() -> Locator {
    Locator::css("button:has(svg.lucide-folder-tree)").first()
}

pub fn scope_editor() -> Locator {
    Locator::css("[data-scope-portal-editor=\"true\"]")
}

pub fn scope_editor_part(selector: &str) -> Locator {
    scope_editor().css_within(selector)
}

// Vendor bid actions

pub fn row_action_button() -> Locator {
    Locator::css("button:has(svg.lucide-ellipsis-vertical)").first()
}

pub fn menu_item(label: &str) -> Locator {
    Locator::css(format!(
        ".mantine-Menu-dropdown .mantine-Menu-itemLabel:has-text({})",
        quote(label)
    ))
}

pub fn modal_heading() -> Locator {
    Locator::css("h2.mantine-Modal-title").first()
}

pub fn total_price_cell() -> Locator {
    Locator::css("div[row-index=\"0\"] [role=\"gridcell\"][col-id=\"total_price\"]").last()
}

pub fn currency_input() -> Locator {
    Locator::css("input[data-testid=\"bird-table-currency-input\"]").first()
}

pub fn submit_bid_button() -> Locator {
    Locator::css("button:has-text(\"Submit Bid\")")
}

pub fn modal_close_button() -> Locator {
    Locator::css("header.mantine-Modal-header button.mantine-Modal-close")
}

pub fn awarded_status() -> Locator {
    Locator::css("div[role=\"row\"]:has-text(\"Awarded\") div[col-id=\"status\"] p").first()
}

pub fn contracts_tab() -> Locator {
    Locator::css(".mantine-Tabs-tabLabel:has-text(\"Contracts\")")
}

pub fn finalize_contract_button() -> Locator {
    Locator::css("button:has-text(\"Finalize Contract\")").first()
}

pub fn finalize_contract_confirm() -> Locator {
    Locator::css(".mantine-Modal-content button:has-text(\"Finalize Contract\")")
}

pub fn bulk_update_status_button() -> Locator {
    Locator::css("button:has-text(\"Bulk Update Status\")")
}
