use tracing::info;

use crate::browser::locator::Locator;
use crate::data::generate::random_index;
use crate::error::{E2eError, E2eResult};
use crate::harness::Harness;
use crate::locators::property as loc;

/// The pieces of an "add data" style modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDataForm {
    pub name_input: Locator,
    pub description_input: Locator,
    pub type_buttons: Locator,
    pub submit_button: Locator,
    pub name: String,
    pub description: String,
}

impl AddDataForm {
    /// The custom column modal of the property grid.
    pub fn custom_column(name: &str, description: &str) -> Self {
        AddDataForm {
            name_input: loc::column_name_input(),
            description_input: loc::column_description_input(),
            type_buttons: loc::column_type_buttons(),
            submit_button: loc::submit_add_column(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

pub struct ModalHandler<'h> {
    h: &'h mut Harness,
}

impl<'h> ModalHandler<'h> {
    pub fn new(h: &'h mut Harness) -> Self {
        ModalHandler { h }
    }

    /// Fill the form, pick a random type and submit. Returns the chosen type index.
    pub fn add_data(&mut self, form: &AddDataForm) -> E2eResult<usize> {
        self.h.fill(&form.name_input, &form.name)?;
        self.h.fill(&form.description_input, &form.description)?;

        let types = self.h.wait_stable_count(&form.type_buttons)?;
        if types == 0 {
            return Err(E2eError::ElementNotFound {
                element: form.type_buttons.to_string(),
                context: "no type buttons in the modal".into(),
            });
        }
        let pick = random_index(types as usize);
        self.h.click(&form.type_buttons.clone().nth(pick as i32))?;

        self.h.wait_visible(&form.submit_button)?;
        self.h.click(&form.submit_button)?;
        self.h.settle()?;
        info!(name = %form.name, type_index = pick, "data added");
        Ok(pick)
    }
}
