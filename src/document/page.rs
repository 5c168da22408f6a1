//! Page snapshots: the rendered formset as plain strings, the way a
//! browser sees it. Names are parsed into the structured model here, once,
//! and rendered back only when a snapshot is written out again.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::*;
use crate::error::{FormsetError, LoadingError};
use crate::naming::{counter_prefix, Name, Prefix};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub fields: RawGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCounter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGroup {
    pub counter: RawCounter,
    #[serde(default)]
    pub initial_forms: i64,
    #[serde(default)]
    pub min_num_forms: i64,
    #[serde(default = "default_max_num")]
    pub max_num_forms: i64,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

fn default_max_num() -> i64 {
    ManagementForm::DEFAULT_MAX_NUM
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub controls: Vec<RawControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<RawGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawControl {
    Input {
        #[serde(rename = "type", default)]
        input_type: InputType,
        name: String,
        #[serde(default)]
        value: String,
        #[serde(default)]
        checked: bool,
    },
    Textarea {
        name: String,
        #[serde(default)]
        value: String,
    },
    Select {
        name: String,
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    Label {
        #[serde(rename = "for")]
        target: String,
        #[serde(default)]
        text: String,
    },
}

/// Read a file and return an owned String, so that the caller decides how
/// long the snapshot text lives.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                    line: None,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                    line: None,
                }),
            }
        }
    }
}

/// Decode snapshot text into a [`Page`].
pub fn read<'i>(filename: &'i Path, content: &str) -> Result<Page, LoadingError<'i>> {
    serde_json::from_str(content).map_err(|error| LoadingError {
        problem: "Invalid page".to_string(),
        details: error.to_string(),
        filename,
        line: Some(error.line()),
    })
}

impl Page {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Form {
    /// Parse every naming attribute of the snapshot into structured names.
    pub fn from_page(page: &Page) -> Result<Form, FormsetError> {
        let fields = parse_group(&page.fields, false)?;
        debug!(
            "Loaded {} field{} under '{}'",
            fields
                .items
                .len(),
            if fields
                .items
                .len()
                == 1
            {
                ""
            } else {
                "s"
            },
            fields.prefix
        );
        Ok(Form::new(fields))
    }

    pub fn to_page(&self) -> Page {
        Page {
            fields: render_group(&self.fields),
        }
    }
}

fn parse_count(prefix: &str, text: &str) -> Result<i64, FormsetError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| FormsetError::InvalidCount {
            prefix: prefix.to_string(),
            value: text.to_string(),
        })
}

fn parse_group(raw: &RawGroup, nested: bool) -> Result<Group, FormsetError> {
    let text = counter_prefix(&raw.counter.name)?;
    let prefix = Prefix::parse(text, nested)?;
    let total = parse_count(text, &raw.counter.value)?;

    let mut items = Vec::with_capacity(raw.items.len());
    for (position, item) in raw
        .items
        .iter()
        .enumerate()
    {
        items.push(parse_item(item, &prefix, position)?);
    }

    if total != items.len() as i64 {
        warn!(
            prefix = %prefix,
            total,
            present = items.len(),
            "counter does not match the items present"
        );
    }

    Ok(Group {
        prefix,
        management: ManagementForm {
            total,
            initial: raw.initial_forms,
            min_num: raw.min_num_forms,
            max_num: raw.max_num_forms,
        },
        hidden: raw.hidden,
        items,
    })
}

fn parse_item(raw: &RawItem, prefix: &Prefix, position: usize) -> Result<Item, FormsetError> {
    let mut controls = Vec::with_capacity(raw.controls.len());
    for control in &raw.controls {
        let control = parse_control(control, prefix)?;
        if let Some(index) = control
            .name()
            .index()
        {
            if index != position {
                debug!(name = %control.name(), position, "item index differs from its position");
            }
        }
        controls.push(control);
    }

    let nested = match &raw.choices {
        Some(choices) => {
            let group = parse_group(choices, true)?;
            if group
                .prefix
                .owner
                != Some(position)
            {
                debug!(prefix = %group.prefix, position, "nested group owned by another index");
            }
            Some(group)
        }
        None => None,
    };

    Ok(Item { controls, nested })
}

fn parse_control(raw: &RawControl, prefix: &Prefix) -> Result<Control, FormsetError> {
    Ok(match raw {
        RawControl::Input {
            input_type,
            name,
            value,
            checked,
        } => Control::Input {
            name: Name::parse(name, prefix)?,
            input_type: *input_type,
            value: value.clone(),
            checked: *checked,
        },
        RawControl::Textarea { name, value } => Control::Textarea {
            name: Name::parse(name, prefix)?,
            value: value.clone(),
        },
        RawControl::Select { name, options } => Control::Select {
            name: Name::parse(name, prefix)?,
            options: options.clone(),
        },
        RawControl::Label { target, text } => Control::Label {
            target: Name::parse_id(target, prefix)?,
            text: text.clone(),
        },
    })
}

fn render_group(group: &Group) -> RawGroup {
    RawGroup {
        counter: RawCounter {
            name: group
                .counter_name()
                .to_string(),
            value: group
                .management
                .total
                .to_string(),
        },
        initial_forms: group
            .management
            .initial,
        min_num_forms: group
            .management
            .min_num,
        max_num_forms: group
            .management
            .max_num,
        hidden: group.hidden,
        items: group
            .items
            .iter()
            .map(render_item)
            .collect(),
    }
}

fn render_item(item: &Item) -> RawItem {
    RawItem {
        controls: item
            .controls
            .iter()
            .map(render_control)
            .collect(),
        choices: item
            .nested
            .as_ref()
            .map(render_group),
    }
}

fn render_control(control: &Control) -> RawControl {
    match control {
        Control::Input {
            name,
            input_type,
            value,
            checked,
        } => RawControl::Input {
            input_type: *input_type,
            name: name.to_string(),
            value: value.clone(),
            checked: *checked,
        },
        Control::Textarea { name, value } => RawControl::Textarea {
            name: name.to_string(),
            value: value.clone(),
        },
        Control::Select { name, options } => RawControl::Select {
            name: name.to_string(),
            options: options.clone(),
        },
        Control::Label { target, text } => RawControl::Label {
            target: target.id(),
            text: text.clone(),
        },
    }
}
