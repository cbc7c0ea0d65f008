use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::browser::locator::Locator;
use crate::error::E2eResult;
use crate::harness::Harness;
use crate::locators::invoice as loc;

/// How long optional form fields get to show up before they are skipped.
const OPTIONAL_FIELD_TIMEOUT_MS: u64 = 5_000;
const MODAL_PROBE_TIMEOUT_MS: u64 = 3_000;

/// Contract amounts shown above the invoice grid; `None` when not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceStats {
    pub current_contract: Option<String>,
    pub approved_invoices: Option<String>,
    pub remaining: Option<String>,
    pub pending: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeOrderFields {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
}

/// Invoices and change orders of a job. The forms differ between
/// deployments, so most fields are optional: a missing one is logged and skipped.
pub struct InvoicePage<'h> {
    h: &'h mut Harness,
}

impl<'h> InvoicePage<'h> {
    pub fn new(h: &'h mut Harness) -> Self {
        InvoicePage { h }
    }

    pub fn navigate_to_invoices(&mut self, job_url: &str) -> E2eResult<()> {
        info!(job_url, "navigating to invoices");
        self.h.goto(job_url)?;
        self.h.expect_url("tab=invoices")?;
        Ok(())
    }

    pub fn navigate_to_invoice_tab(&mut self) -> E2eResult<()> {
        self.open_tab(&loc::invoice_tab())
    }

    pub fn navigate_to_change_order_tab(&mut self) -> E2eResult<()> {
        self.open_tab(&loc::change_order_tab())
    }

    fn open_tab(&mut self, tab: &Locator) -> E2eResult<()> {
        info!(tab = %tab, "opening tab");
        self.h.expect(tab).to_be_enabled()?;
        self.h.click(tab)?;
        self.h.settle()
    }

    pub fn click_add_invoice(&mut self) -> E2eResult<()> {
        self.click_add(&loc::add_invoice_button())
    }

    pub fn click_add_change_order(&mut self) -> E2eResult<()> {
        self.click_add(&loc::add_change_order_button())
    }

    fn click_add(&mut self, button: &Locator) -> E2eResult<()> {
        self.h.wait_visible_within(button, 10_000)?;
        self.h.click(button)?;
        self.h.settle()
    }

    /// Fill `field` when it shows up in time; returns whether it was filled.
    fn fill_optional(&mut self, field: &Locator, what: &str, value: &str) -> E2eResult<bool> {
        if self.h.is_visible_within(field, OPTIONAL_FIELD_TIMEOUT_MS)? {
            self.h.fill(field, value)?;
            info!(what, value, "filled");
            Ok(true)
        } else {
            info!(what, "input not found, skipping");
            Ok(false)
        }
    }

    pub fn fill_title(&mut self, title: &str) -> E2eResult<bool> {
        self.fill_optional(&loc::title_input(), "title", title)
    }

    pub fn fill_amount(&mut self, amount: &str) -> E2eResult<bool> {
        self.fill_optional(&loc::amount_input(), "amount", amount)
    }

    pub fn fill_description(&mut self, description: &str) -> E2eResult<bool> {
        self.fill_optional(&loc::description_input(), "description", description)
    }

    pub fn upload_image(&mut self, path: &Path) -> E2eResult<bool> {
        let input = loc::file_input();
        if !self.h.is_visible_within(&input, OPTIONAL_FIELD_TIMEOUT_MS)? {
            info!("file upload input not found, skipping");
            return Ok(false);
        }
        self.h.upload(&input, &[path.to_path_buf()])?;
        self.h.settle()?;
        info!(path = %path.display(), "image uploaded");
        Ok(true)
    }

    /// Click the first of Save / Confirm / Submit; false when none is shown.
    pub fn save(&mut self) -> E2eResult<bool> {
        let button = loc::save_button();
        if !self.h.is_visible_within(&button, OPTIONAL_FIELD_TIMEOUT_MS)? {
            info!("save button not found");
            return Ok(false);
        }
        self.h.click(&button)?;
        self.h.settle()?;
        info!("saved");
        Ok(true)
    }

    pub fn is_modal_open(&mut self) -> E2eResult<bool> {
        self.h.is_visible_within(&loc::modal(), MODAL_PROBE_TIMEOUT_MS)
    }

    /// Cancel when offered, Escape otherwise.
    pub fn close_modal(&mut self) -> E2eResult<()> {
        let cancel = loc::cancel_button();
        if self.h.is_visible_within(&cancel, MODAL_PROBE_TIMEOUT_MS)? {
            self.h.click(&cancel)?;
            info!("modal closed");
        } else {
            self.h.press_key("Escape")?;
            info!("closed modal with Escape");
        }
        Ok(())
    }

    /// Whether the grid has at least one row.
    pub fn verify_rows_added(&mut self) -> E2eResult<bool> {
        let rows = self.h.count(&loc::rows())?;
        if rows > 0 {
            info!(rows, "rows present");
        } else {
            info!("no rows found");
        }
        Ok(rows > 0)
    }

    pub fn invoice_stats(&mut self) -> E2eResult<InvoiceStats> {
        let mut read = |caption: &str| -> E2eResult<Option<String>> {
            Ok(self.h.page().probe(&loc::stat_value(caption))?.display_text())
        };
        Ok(InvoiceStats {
            current_contract: read(loc::CURRENT_CONTRACT)?,
            approved_invoices: read(loc::APPROVED_INVOICES)?,
            remaining: read(loc::CONTRACT_REMAINING)?,
            pending: read(loc::PENDING_INVOICES)?,
        })
    }

    pub fn export_change_orders(&mut self) -> E2eResult<bool> {
        let button = loc::export_button();
        if !self.h.is_visible_within(&button, OPTIONAL_FIELD_TIMEOUT_MS)? {
            info!("export button not found");
            return Ok(false);
        }
        self.h.click(&button)?;
        self.h.settle()?;
        info!("change order data exported");
        Ok(true)
    }

    pub fn add_data_to_change_order(&mut self, fields: &ChangeOrderFields) -> E2eResult<()> {
        if let Some(title) = &fields.title {
            self.fill_title(title)?;
        }
        if let Some(amount) = &fields.amount {
            self.fill_amount(amount)?;
        }
        if let Some(description) = &fields.description {
            self.fill_description(description)?;
        }
        info!("change order data added");
        Ok(())
    }

    /// The page body rendered something.
    pub fn has_content(&mut self) -> E2eResult<bool> {
        let probe = self.h.page().probe(&loc::body())?;
        Ok(probe.text.is_some_and(|t| !t.trim().is_empty()))
    }
}
