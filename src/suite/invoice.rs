use tracing::info;

use crate::data::generate::timestamped;
use crate::data::upload::ensure_test_image;
use crate::error::{E2eError, E2eResult};
use crate::harness::Harness;
use crate::locators::invoice as loc;
use crate::pages::{ChangeOrderFields, InvoicePage};
use crate::suite::jobs::open_job_summary;
use crate::suite::{Case, Suite, open_dashboard};

/// Dashboard, recorded project, its job summary, then the Invoices tab.
fn open_invoices(h: &mut Harness) -> E2eResult<()> {
    let project = h.scratch.load_project()?.project_name;
    open_dashboard(h)?;
    open_job_summary(h, &project)?;
    InvoicePage::new(h).navigate_to_invoice_tab()?;
    h.settle()
}

fn fill_invoice(h: &mut Harness, amount: &str, description: &str) -> E2eResult<()> {
    let mut invoices = InvoicePage::new(h);
    invoices.click_add_invoice()?;
    invoices.fill_title(&timestamped("Invoice"))?;
    invoices.fill_amount(amount)?;
    invoices.fill_description(description)?;
    Ok(())
}

pub fn suite() -> Suite {
    Suite::new("invoice")
        .before_each(open_invoices)
        .case(
            Case::new("invoice page URL and content", |h| {
                h.expect_url("tab=invoices")?;
                if !InvoicePage::new(h).has_content()? {
                    return Err(E2eError::check("invoice page rendered no content"));
                }
                info!("invoice page content is loaded");
                h.expect(&loc::add_invoice_button()).to_be_visible()
            })
            .tag("@regression"),
        )
        .case(
            Case::new("add invoice opens its details", |h| {
                let mut invoices = InvoicePage::new(h);
                invoices.click_add_invoice()?;
                if invoices.is_modal_open()? {
                    info!("invoice details modal opened");
                    h.expect(&loc::modal()).to_be_visible()?;
                } else {
                    info!("invoice details page opened");
                }
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("enter invoice title and details", |h| {
                fill_invoice(h, "1000", "Test Invoice Description")
            })
            .tag("@regression"),
        )
        .case(
            Case::new("upload PNG image for invoice", |h| {
                let image = ensure_test_image(&h.settings.files_dir)?;
                let mut invoices = InvoicePage::new(h);
                invoices.click_add_invoice()?;
                invoices.upload_image(&image)?;
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("save invoice", |h| {
                fill_invoice(h, "500", "Test Invoice for Save")?;
                let mut invoices = InvoicePage::new(h);
                if !invoices.save()? {
                    info!("could not save invoice, no save button");
                    return Ok(());
                }
                if !invoices.verify_rows_added()? {
                    return Err(E2eError::check("saved invoice is not listed"));
                }
                let stats = invoices.invoice_stats()?;
                info!(?stats, "invoice stats");
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("add and save change order", |h| {
                let mut invoices = InvoicePage::new(h);
                invoices.navigate_to_change_order_tab()?;
                invoices.click_add_change_order()?;
                invoices.add_data_to_change_order(&ChangeOrderFields {
                    title: Some(timestamped("ChangeOrder")),
                    amount: Some("250".into()),
                    description: Some("Test Change Order".into()),
                })?;
                if invoices.save()? {
                    invoices.verify_rows_added()?;
                } else {
                    invoices.close_modal()?;
                }
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("export change orders", |h| {
                let mut invoices = InvoicePage::new(h);
                invoices.navigate_to_change_order_tab()?;
                let exported = invoices.export_change_orders()?;
                info!(exported, "change order export");
                Ok(())
            })
            .tag("@regression"),
        )
}
