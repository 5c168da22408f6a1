use tracing::debug;

use crate::document::{Form, Item};

/// Pristine copies of the first field and the first choice of a page,
/// taken once when the page is loaded and never changed afterwards. They
/// seed a group that has no item left to clone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCache {
    field: Option<Item>,
    choice: Option<Item>,
}

impl TemplateCache {
    pub fn capture(form: &Form) -> TemplateCache {
        let field = form
            .fields
            .items
            .first()
            .map(pristine);

        let choice = form
            .fields
            .items
            .iter()
            .filter_map(|item| item.nested.as_ref())
            .find_map(|group| {
                group
                    .items
                    .first()
            })
            .map(pristine);

        debug!(
            field = field.is_some(),
            choice = choice.is_some(),
            "captured templates"
        );

        TemplateCache { field, choice }
    }

    pub fn field(&self) -> Option<&Item> {
        self.field
            .as_ref()
    }

    pub fn choice(&self) -> Option<&Item> {
        self.choice
            .as_ref()
    }
}

// a template is re-rendered form output and may still hold values
fn pristine(item: &Item) -> Item {
    let mut item = item.clone();
    item.clear_values();
    item
}
