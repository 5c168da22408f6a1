//! Types representing a form made of repeated, possibly nested, groups

use serde::{Deserialize, Serialize};

use crate::error::FormsetError;
use crate::naming::{Management, Name, Prefix};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Hidden,
    Checkbox,
    Number,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default)]
    pub selected: bool,
}

/// One element carrying a naming attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Input {
        name: Name,
        input_type: InputType,
        value: String,
        checked: bool,
    },
    Textarea {
        name: Name,
        value: String,
    },
    Select {
        name: Name,
        options: Vec<SelectOption>,
    },
    /// Refers to another control through that control's identity.
    Label {
        target: Name,
        text: String,
    },
}

impl Control {
    pub fn name(&self) -> &Name {
        match self {
            Control::Input { name, .. } => name,
            Control::Textarea { name, .. } => name,
            Control::Select { name, .. } => name,
            Control::Label { target, .. } => target,
        }
    }

    pub fn name_mut(&mut self) -> &mut Name {
        match self {
            Control::Input { name, .. } => name,
            Control::Textarea { name, .. } => name,
            Control::Select { name, .. } => name,
            Control::Label { target, .. } => target,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Control::Label { .. })
    }

    /// Empty whatever the user can see and edit. Hidden inputs keep their
    /// values.
    pub fn clear(&mut self) {
        match self {
            Control::Input {
                input_type: InputType::Hidden,
                ..
            } => {}
            Control::Input { value, checked, .. } => {
                value.clear();
                *checked = false;
            }
            Control::Textarea { value, .. } => value.clear(),
            Control::Select { options, .. } => {
                for option in options.iter_mut() {
                    option.selected = false;
                }
            }
            Control::Label { .. } => {}
        }
    }

    /// Empty text inputs only.
    pub fn clear_text(&mut self) {
        if let Control::Input {
            input_type: InputType::Text,
            value,
            ..
        } = self
        {
            value.clear();
        }
    }

    /// Make `value` the single selected option of a select control.
    pub fn choose(&mut self, value: &str) -> Result<(), FormsetError> {
        match self {
            Control::Select { name, options } => {
                if !options
                    .iter()
                    .any(|option| option.value == value)
                {
                    return Err(FormsetError::NotFound {
                        what: "option",
                        key: format!("{}={}", name, value),
                    });
                }
                for option in options.iter_mut() {
                    option.selected = option.value == value;
                }
                Ok(())
            }
            _ => Err(FormsetError::NotFound {
                what: "select control",
                key: self
                    .name()
                    .to_string(),
            }),
        }
    }

    /// The value a browser would submit for this control, if any.
    pub fn submitted(&self) -> Vec<&str> {
        match self {
            Control::Input {
                input_type: InputType::Checkbox,
                checked,
                ..
            } => {
                if *checked {
                    vec!["on"]
                } else {
                    vec![]
                }
            }
            Control::Input { value, .. } => vec![value.as_str()],
            Control::Textarea { value, .. } => vec![value.as_str()],
            Control::Select { options, .. } => options
                .iter()
                .filter(|option| option.selected)
                .map(|option| option.value.as_str())
                .collect(),
            Control::Label { .. } => vec![],
        }
    }
}

/// One instance of a group's repeated content: a field, or a choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub controls: Vec<Control>,
    pub nested: Option<Group>,
}

impl Item {
    /// Find the control (not a label) whose name ends in `field`.
    pub fn control(&self, field: &str) -> Option<&Control> {
        self.controls
            .iter()
            .find(|control| {
                !control.is_label()
                    && control
                        .name()
                        .field()
                        == Some(field)
            })
    }

    pub fn control_mut(&mut self, field: &str) -> Option<&mut Control> {
        self.controls
            .iter_mut()
            .find(|control| {
                !control.is_label()
                    && control
                        .name()
                        .field()
                        == Some(field)
            })
    }

    /// The first submitted value of the control named by `field`.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.control(field)
            .and_then(|control| {
                control
                    .submitted()
                    .first()
                    .copied()
            })
    }

    /// Clear every visible value in this item and in any nested group.
    pub fn clear_values(&mut self) {
        for control in self
            .controls
            .iter_mut()
        {
            control.clear();
        }
        if let Some(group) = &mut self.nested {
            for item in group
                .items
                .iter_mut()
            {
                item.clear_values();
            }
        }
    }

    pub fn clear_text(&mut self) {
        for control in self
            .controls
            .iter_mut()
        {
            control.clear_text();
        }
    }

    /// Check that every control of this item (not of nested groups) is
    /// named for the group with `prefix`.
    pub fn conforms(&self, prefix: &Prefix) -> Result<(), FormsetError> {
        match self
            .controls
            .iter()
            .find(|control| &control.name().prefix != prefix)
        {
            Some(control) => Err(FormsetError::PatternMismatch {
                name: control
                    .name()
                    .to_string(),
                expected: prefix.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// The management counters of a group. `total` is the group's counter
/// proper; the remainder are carried through so the submission is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagementForm {
    pub total: i64,
    pub initial: i64,
    pub min_num: i64,
    pub max_num: i64,
}

impl ManagementForm {
    pub const DEFAULT_MAX_NUM: i64 = 1000;

    pub fn new(total: i64) -> ManagementForm {
        ManagementForm {
            total,
            initial: 0,
            min_num: 0,
            max_num: ManagementForm::DEFAULT_MAX_NUM,
        }
    }

    pub fn get(&self, kind: Management) -> i64 {
        match kind {
            Management::Total => self.total,
            Management::Initial => self.initial,
            Management::MinNum => self.min_num,
            Management::MaxNum => self.max_num,
        }
    }
}

/// A named repeated collection with its counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub prefix: Prefix,
    pub management: ManagementForm,
    pub hidden: bool,
    pub items: Vec<Item>,
}

impl Group {
    pub fn new(prefix: Prefix) -> Group {
        Group {
            prefix,
            management: ManagementForm::new(0),
            hidden: false,
            items: Vec::new(),
        }
    }

    pub fn counter_name(&self) -> Name {
        Name::management(self.prefix.clone(), Management::Total)
    }

    pub fn total(&self) -> i64 {
        self.management
            .total
    }

    fn collect<'a>(&'a self, groups: &mut Vec<&'a Group>) {
        groups.push(self);
        for item in &self.items {
            if let Some(nested) = &item.nested {
                nested.collect(groups);
            }
        }
    }

    fn find_mut(&mut self, prefix: &str) -> Option<&mut Group> {
        if self
            .prefix
            .to_string()
            == prefix
        {
            return Some(self);
        }
        self.items
            .iter_mut()
            .filter_map(|item| item.nested.as_mut())
            .find_map(|nested| nested.find_mut(prefix))
    }
}

/// A whole page: the top level group of fields, which in turn owns every
/// nested group. Groups are addressed by their rendered prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Group,
}

impl Form {
    pub fn new(fields: Group) -> Form {
        Form { fields }
    }

    /// Every group in document order, the field group first.
    pub fn groups(&self) -> Vec<&Group> {
        let mut groups = Vec::new();
        self.fields
            .collect(&mut groups);
        groups
    }

    pub fn group(&self, prefix: &str) -> Option<&Group> {
        self.groups()
            .into_iter()
            .find(|group| {
                group
                    .prefix
                    .to_string()
                    == prefix
            })
    }

    pub fn group_mut(&mut self, prefix: &str) -> Option<&mut Group> {
        self.fields
            .find_mut(prefix)
    }
}
