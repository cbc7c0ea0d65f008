use tracing::{info, warn};

use crate::data::export::CsvTable;
use crate::data::generate;
use crate::data::scratch::ProjectRecord;
use crate::error::{E2eError, E2eResult};
use crate::locators::property as property_loc;
use crate::pages::{ProjectDetails, ProjectPage, PropertiesPage};
use crate::suite::{Case, Suite, open_dashboard};

/// Property the export case filters on.
pub const EXPORT_FILTER_VALUE: &str = "Sumit_automation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportCounts {
    pub by_property: usize,
    pub by_name: usize,
}

/// Count the exported rows carrying the filtered property and the project
/// created earlier in the run. When that project was created on the filtered
/// property and the filtered grid is not empty, it must be exported exactly once.
pub fn check_export(
    table: &CsvTable,
    ui_rows: u32,
    created: Option<&ProjectRecord>,
) -> E2eResult<ExportCounts> {
    let name_col = table
        .find_column("name")
        .ok_or_else(|| E2eError::check("export has no name column"))?;
    let property_col = table
        .find_column("property")
        .ok_or_else(|| E2eError::check("export has no property column"))?;

    let counts = ExportCounts {
        by_property: table.rows_where(property_col, EXPORT_FILTER_VALUE).len(),
        by_name: created
            .map(|c| table.rows_where(name_col, &c.project_name).len())
            .unwrap_or(0),
    };
    info!(ui_rows, by_property = counts.by_property, by_name = counts.by_name, "export contents");

    if let Some(created) = created {
        if ui_rows > 0 && created.property == EXPORT_FILTER_VALUE && counts.by_name != 1 {
            return Err(E2eError::check(format!(
                "expected one exported row named {}, found {}",
                created.project_name, counts.by_name
            )));
        }
    }
    Ok(counts)
}

pub fn suite() -> Suite {
    Suite::new("project")
        .before_all(open_dashboard)
        .case(
            Case::new("navigate to Projects & Jobs within budget with no failed requests", |h| {
                ProjectPage::new(h).navigate_to_projects().map(|_| ())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("open Create Project modal and verify all fields", |h| {
                let mut project = ProjectPage::new(h);
                project.open_create_project_modal()?;
                project.verify_modal_fields()
            })
            .tag("@regression"),
        )
        .case(
            Case::new("create project and verify details on dashboard", |h| {
                let created = ProjectPage::new(h).fill_project_details(&ProjectDetails {
                    description: None,
                    start_date: generate::start_date(),
                    end_date: generate::end_date(),
                })?;
                info!(project = %created.project_name, property = %created.property, "project created");
                Ok(())
            })
            .tag("@regression"),
        )
        .case(
            Case::new("search project by partial name", |h| {
                ProjectPage::new(h).navigate_to_projects()?;
                PropertiesPage::new(h).change_view("Table View")?;
                ProjectPage::new(h).search_project("Test")
            })
            .tag("@regression"),
        )
        .case(
            Case::new("apply filter and export projects", |h| {
                ProjectPage::new(h).navigate_to_projects()?;
                PropertiesPage::new(h).change_view("Table View")?;

                h.click(&property_loc::filter_button())?;
                let ui_rows = PropertiesPage::new(h).filter_property_by_label(EXPORT_FILTER_VALUE)?;

                let created = match h.scratch.load_project() {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(error = %e, "no created project to look for in the export");
                        None
                    }
                };

                let mut project = ProjectPage::new(h);
                if let Some(table) = project.export_projects()? {
                    check_export(&table, ui_rows, created.as_ref())?;
                }
                project.delete_first_row()
            })
            .tag("@regression"),
        )
        .case(
            Case::new("cancel closes the modal without saving", |h| {
                ProjectPage::new(h).navigate_to_projects()?;
                PropertiesPage::new(h).change_view("Table View")?;
                let mut project = ProjectPage::new(h);
                project.open_create_project_modal()?;
                project.verify_modal_closed()
            })
            .tag("@regression"),
        )
        .case(
            Case::new("mandatory fields, property options and typed dates", |h| {
                let mut project = ProjectPage::new(h);
                project.navigate_to_projects()?;
                project.open_create_project_modal()?;
                project.validate_mandatory_fields()?;
                let options = project.property_dropdown_options()?;
                if options.is_empty() {
                    return Err(E2eError::check("property dropdown has no options"));
                }
                project.fill_date_field("2024-07-01", "2024-12-31")
            })
            .tag("@regression"),
        )
}
