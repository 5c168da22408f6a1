//! Conventions of the page being edited. The defaults match the form
//! creator's markup; the command line can override each one.

use crate::naming::Prefix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prefix of the top level group of fields.
    pub field_prefix: String,
    /// Base of each field's nested choices prefix, before `_<index>`.
    pub choices_base: String,
    /// Field name of the control selecting a field's type.
    pub type_field: String,
    /// The type for which a field keeps and shows its choices.
    pub select_kind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            field_prefix: "fields_formset".to_string(),
            choices_base: "choices_formset".to_string(),
            type_field: "type".to_string(),
            select_kind: "select".to_string(),
        }
    }
}

impl Settings {
    /// Rendered prefix of the choices group owned by field `index`.
    pub fn choices_prefix(&self, index: usize) -> String {
        Prefix::nested(self.choices_base.as_str(), index).to_string()
    }
}
