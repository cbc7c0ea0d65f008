//! Page objects. Each borrows the harness for as long as it is used, so
//! several can be created one after another in the same case.

pub mod invoice;
pub mod job;
pub mod modal;
pub mod navigation;
pub mod organization;
pub mod project;
pub mod properties;

pub use invoice::{ChangeOrderFields, InvoicePage, InvoiceStats};
pub use job::ProjectJobPage;
pub use modal::{AddDataForm, ModalHandler};
pub use navigation::LeftPanel;
pub use organization::OrganizationPage;
pub use project::{CreatedProject, ProjectDetails, ProjectPage};
pub use properties::PropertiesPage;
