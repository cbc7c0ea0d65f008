use crate::browser::locator::{Locator, TextMatch, quote};

pub fn projects_nav_label() -> Locator {
    Locator::css("span.mantine-NavLink-label").has_text("Projects & Jobs")
}

pub fn search_input() -> Locator {
    Locator::css("input[placeholder=\"Search...\"]")
}

pub fn create_project_button() -> Locator {
    Locator::css("button:has-text('Create Project')")
}

pub fn modal() -> Locator {
    Locator::css("section[role=\"dialog\"][data-modal-content=\"true\"]")
}

pub fn modal_title() -> Locator {
    Locator::role_matching("heading", TextMatch::pattern_ci("Add project"))
}

pub fn name_input() -> Locator {
    Locator::label("Name")
}

pub fn property_dropdown() -> Locator {
    Locator::role_matching("textbox", TextMatch::exact("Property"))
}

pub fn description_input() -> Locator {
    Locator::label("Description")
}

pub fn start_date_input() -> Locator {
    Locator::label("Start Date")
}

pub fn end_date_input() -> Locator {
    Locator::label("End Date")
}

pub fn cancel_button() -> Locator {
    Locator::role_matching("button", TextMatch::exact("Cancel"))
}

pub fn add_project_button() -> Locator {
    Locator::role_matching("button", TextMatch::pattern_ci("add project"))
}

pub fn dropdown() -> Locator {
    Locator::css("[data-composed=\"true\"][role=\"presentation\"]")
}

pub fn dropdown_options() -> Locator {
    dropdown().css_within("[data-combobox-option=\"true\"]")
}

pub fn dropdown_option(name: &str) -> Locator {
    dropdown().locator(Locator::role_matching("option", TextMatch::exact(name)))
}

pub fn invalid_inputs() -> Locator {
    Locator::css("input:invalid, select:invalid")
}

pub fn notification() -> Locator {
    Locator::css(".mantine-Notification-root")
}

/// The dashboard grid block holding `label` (`Project Name`, `Description`).
pub fn dashboard_field(label: &str) -> Locator {
    Locator::css(format!(".mantine-Grid-inner:has-text({})", quote(label)))
}

pub fn dashboard_value(label: &str, value: &str) -> Locator {
    dashboard_field(label)
        .css_within(format!("p:has-text({})", quote(value)))
        .last()
}

pub fn project_card(name: &str) -> Locator {
    Locator::css(".mantine-SimpleGrid-root .mantine-Group-root").has_text(name)
}

pub fn first_row_name_text() -> Locator {
    Locator::css(".ag-center-cols-container div[role=\"row\"] div[col-id=\"name\"] p").first()
}

pub fn row_delete_button() -> Locator {
    Locator::css("button[title=\"Delete Row\"]:visible").first()
}

pub fn delete_confirm_button() -> Locator {
    Locator::css(".mantine-Popover-dropdown button:has-text('Delete')")
}
