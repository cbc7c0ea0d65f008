use tracing::info;

use crate::data::generate::timestamped;
use crate::pages::PropertiesPage;
use crate::suite::{Case, Suite, dashboard_url};

pub const PROPERTY_ADDRESS: &str = "Domestic Terminal";
pub const PROPERTY_TYPES: [&str; 4] = ["Garden Style", "Mid Rise", "High Rise", "Military Housing"];

pub fn suite() -> Suite {
    // One property lives through all four cases.
    let name = timestamped("name");
    let created = name.clone();
    let searched = name.clone();
    let deleted = name;

    Suite::new("properties")
        .before_all(|h| {
            let dashboard = dashboard_url(h)?;
            let mut props = PropertiesPage::new(h);
            props.goto(&dashboard)?;
            props.go_to_properties()
        })
        .case(Case::new("export and create property", move |h| {
            let mut props = PropertiesPage::new(h);
            let export = props.export()?;
            info!(file = %export.suggested_filename, "properties exported");
            props.create_property(&created, PROPERTY_ADDRESS, PROPERTY_TYPES[0])
        }))
        .case(Case::new("change view and search property", move |h| {
            let mut props = PropertiesPage::new(h);
            props.change_view("Table View")?;
            props.search_property(&searched)
        }))
        .case(Case::new("filter property", |h| {
            let mut props = PropertiesPage::new(h);
            props.open_filter_panel()?;
            for kind in PROPERTY_TYPES {
                props.filter_property(kind)?;
            }
            props.close_filter_panel()
        }))
        .case(Case::new("delete property", move |h| {
            PropertiesPage::new(h).delete_property(&deleted)
        }))
}
