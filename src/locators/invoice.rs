use crate::browser::locator::Locator;

pub fn invoice_tab() -> Locator {
    Locator::css(".mantine-Tabs-tabLabel:has-text(\"Invoice\")")
}

pub fn change_order_tab() -> Locator {
    Locator::css(".mantine-Tabs-tabLabel:has-text(\"Change Orders\")")
}

pub fn add_invoice_button() -> Locator {
    Locator::css("button:has-text(\"Invoice\")").last()
}

pub fn add_change_order_button() -> Locator {
    Locator::css("button:has-text(\"Change Order\")").last()
}

pub fn grid() -> Locator {
    Locator::css("[role=\"grid\"]")
}

pub fn rows() -> Locator {
    Locator::css("[role=\"row\"]")
}

pub fn title_input() -> Locator {
    Locator::css("input[placeholder*=\"Title\"], input[placeholder*=\"title\"], input[name*=\"title\"]").first()
}

pub fn amount_input() -> Locator {
    Locator::css("input[placeholder*=\"Amount\"], input[placeholder*=\"amount\"], input[name*=\"amount\"]").first()
}

pub fn description_input() -> Locator {
    Locator::css("textarea, input[placeholder*=\"Description\"], input[placeholder*=\"description\"]").first()
}

pub fn file_input() -> Locator {
    Locator::css("input[type=\"file\"]")
}

pub fn save_button() -> Locator {
    Locator::css("button:has-text(\"Save\"), button:has-text(\"Confirm\"), button:has-text(\"Submit\")").first()
}

pub fn cancel_button() -> Locator {
    Locator::css("button:has-text(\"Cancel\")").first()
}

pub fn modal() -> Locator {
    Locator::css("dialog, [role=\"dialog\"], .mantine-Modal-root").first()
}

pub fn export_button() -> Locator {
    Locator::css("button:has-text(\"Export\"), button:has-text(\"Download\")").first()
}

pub fn body() -> Locator {
    Locator::css("body")
}

/// The amount shown next to a stats caption such as `Current Contract`.
pub fn stat_value(caption: &str) -> Locator {
    Locator::css(format!("text={}", caption))
        .css_within("..")
        .css_within("p")
        .first()
}

pub const CURRENT_CONTRACT: &str = "Current Contract";
pub const APPROVED_INVOICES: &str = "Approved Invoices";
pub const CONTRACT_REMAINING: &str = "Contract Remaining";
pub const PENDING_INVOICES: &str = "Pending Invoices";
