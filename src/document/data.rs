//! Serializing a form into the name/value pairs a browser would submit

use super::types::{Form, Group, Item};
use crate::naming::{Management, Name};

impl Form {
    /// Ordered `(name, value)` pairs in document order. Hidden groups are
    /// still submitted; only unchecked boxes and unselected options are
    /// left out.
    pub fn form_data(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        append_group(&self.fields, &mut pairs);
        pairs
    }
}

fn append_group(group: &Group, pairs: &mut Vec<(String, String)>) {
    for kind in Management::ALL {
        let name = Name::management(group.prefix.clone(), kind);
        pairs.push((
            name.to_string(),
            group
                .management
                .get(kind)
                .to_string(),
        ));
    }
    for item in &group.items {
        append_item(item, pairs);
    }
}

fn append_item(item: &Item, pairs: &mut Vec<(String, String)>) {
    for control in &item.controls {
        for value in control.submitted() {
            pairs.push((
                control
                    .name()
                    .to_string(),
                value.to_string(),
            ));
        }
    }
    if let Some(nested) = &item.nested {
        append_group(nested, pairs);
    }
}
