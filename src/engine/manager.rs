//! Adding fields and choices, and reacting to a field's type changing.
//!
//! Every command works on a clone of the item it is about to insert and on
//! staged counter values. Nothing in the form changes until the last step,
//! so a command that fails leaves the form exactly as it found it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::counter::{index_for, CounterStore};
use super::resolver::{enclosing_group, resolve_group_prefix, Address};
use super::rewriter::{rewrite, RewriteKey};
use super::template::TemplateCache;
use crate::document::{Form, Item};
use crate::error::FormsetError;
use crate::settings::Settings;

/// An interaction with the page, expressed without reference to any UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddField { source: Address },
    AddChoice { source: Address },
    TypeChanged { field: usize, kind: String },
}

impl FromStr for Command {
    type Err = FormsetError;

    /// `add-field`, `add-choice:<field>`, or `type:<field>=<kind>`.
    fn from_str(text: &str) -> Result<Command, FormsetError> {
        let unknown = || FormsetError::UnknownCommand(text.to_string());

        if text == "add-field" {
            return Ok(Command::AddField {
                source: Address::Fields,
            });
        }

        let re = regex!(r"^add-choice:([0-9]+)$");
        if let Some(cap) = re.captures(text) {
            let field = cap[1]
                .parse::<usize>()
                .map_err(|_| unknown())?;
            return Ok(Command::AddChoice {
                source: Address::Choices(field),
            });
        }

        let re = regex!(r"^type:([0-9]+)=(.+)$");
        if let Some(cap) = re.captures(text) {
            let field = cap[1]
                .parse::<usize>()
                .map_err(|_| unknown())?;
            return Ok(Command::TypeChanged {
                field,
                kind: cap[2].to_string(),
            });
        }

        Err(unknown())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    AddField,
    AddChoice,
    TypeChanged,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddField => write!(f, "add-field"),
            Action::AddChoice => write!(f, "add-choice"),
            Action::TypeChanged => write!(f, "type-changed"),
        }
    }
}

/// Steps an add passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    TemplateSelected,
    Cloned,
    CounterAdvanced,
    NestedReset,
    Reindexed,
    ValuesCleared,
    Inserted,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub action: Action,
    /// Rendered prefix of the group that changed.
    pub group: String,
    /// Index of the added item, or of the field whose type changed.
    pub index: usize,
    /// Position the new item was inserted at within its group.
    pub position: Option<usize>,
    /// The group's counter afterwards.
    pub count: i64,
    /// Items thrown away without adjusting the counter.
    pub discarded: usize,
    pub stages: Vec<Stage>,
}

/// Owns a form for one editing session and applies commands to it.
#[derive(Debug, Clone)]
pub struct GroupManager {
    form: Form,
    templates: TemplateCache,
    settings: Settings,
}

impl GroupManager {
    pub fn new(form: Form, settings: Settings) -> GroupManager {
        let templates = TemplateCache::capture(&form);
        info!(prefix = %form.fields.prefix, "editing session started");
        GroupManager {
            form,
            templates,
            settings,
        }
    }

    /// Start a session with templates taken elsewhere, such as from the
    /// page as it was first rendered.
    pub fn with_templates(form: Form, templates: TemplateCache, settings: Settings) -> GroupManager {
        GroupManager {
            form,
            templates,
            settings,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn into_form(self) -> Form {
        self.form
    }

    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    pub fn apply(&mut self, command: &Command) -> Result<Outcome, FormsetError> {
        debug!(?command);
        match command {
            Command::AddField { source } => self.add_field(*source),
            Command::AddChoice { source } => self.add_choice(*source),
            Command::TypeChanged { field, kind } => self.change_type(*field, kind),
        }
    }

    /// Apply a command; on failure log it and leave the form untouched.
    pub fn dispatch(&mut self, command: &Command) -> Option<Outcome> {
        match self.apply(command) {
            Ok(outcome) => Some(outcome),
            Err(error) => {
                warn!(?command, %error, "command aborted");
                None
            }
        }
    }

    fn add_field(&mut self, source: Address) -> Result<Outcome, FormsetError> {
        // the clicked control only has to exist; fields always grow at the end
        enclosing_group(&self.form, source)?;
        let prefix = resolve_group_prefix(&self.form, Address::Fields)?;
        let group = &self.form.fields;

        let mut stages = Vec::with_capacity(7);
        let (position, template) = match group
            .items
            .last()
        {
            Some(last) => (
                Some(
                    group
                        .items
                        .len()
                        - 1,
                ),
                last,
            ),
            None => (
                None,
                self.templates
                    .field()
                    .ok_or_else(|| FormsetError::NotFound {
                        what: "field template",
                        key: prefix.clone(),
                    })?,
            ),
        };
        stages.push(Stage::TemplateSelected);

        let mut item = template.clone();
        stages.push(Stage::Cloned);

        let count = self.form.get(&prefix)? + 1;
        let index = index_for(&prefix, count)?;
        stages.push(Stage::CounterAdvanced);

        let mut keys = vec![RewriteKey::Group(
            self.form
                .fields
                .prefix
                .clone(),
        )];
        if let Some(nested) = &mut item.nested {
            // a new field starts with exactly one empty choice
            nested
                .items
                .truncate(1);
            if nested
                .items
                .is_empty()
            {
                let choice = self
                    .templates
                    .choice()
                    .ok_or_else(|| FormsetError::NotFound {
                        what: "choice template",
                        key: nested
                            .prefix
                            .to_string(),
                    })?;
                nested
                    .items
                    .push(choice.clone());
            }
            nested
                .management
                .total = 1;
            nested
                .management
                .initial = 0;
            keys.push(RewriteKey::Owner(
                nested
                    .prefix
                    .base
                    .clone(),
            ));
            stages.push(Stage::NestedReset);
        }

        for key in &keys {
            rewrite(&mut item, key, index)?;
        }
        item.conforms(&self.form.fields.prefix)?;
        stages.push(Stage::Reindexed);

        item.clear_values();
        stages.push(Stage::ValuesCleared);

        let at = position.map_or(0, |p| p + 1);
        self.form
            .set(&prefix, count)?;
        self.form
            .fields
            .items
            .insert(at, item);
        stages.push(Stage::Inserted);

        info!(prefix = %prefix, index, count, "added field");
        Ok(Outcome {
            action: Action::AddField,
            group: prefix,
            index,
            position: Some(at),
            count,
            discarded: 0,
            stages,
        })
    }

    fn add_choice(&mut self, source: Address) -> Result<Outcome, FormsetError> {
        let field = match source {
            Address::Field(n) | Address::Choices(n) | Address::Choice(n, _) => n,
            Address::Fields => {
                return Err(FormsetError::NotFound {
                    what: "choice group",
                    key: self
                        .form
                        .fields
                        .prefix
                        .to_string(),
                })
            }
        };
        enclosing_group(&self.form, source)?;
        let prefix = resolve_group_prefix(&self.form, Address::Choices(field))?;
        let group = self
            .form
            .group(&prefix)
            .ok_or_else(|| FormsetError::NotFound {
                what: "choice group",
                key: prefix.clone(),
            })?;

        let mut stages = Vec::with_capacity(6);
        let (position, mut item, seeded) = match group
            .items
            .last()
        {
            Some(last) => (
                Some(
                    group
                        .items
                        .len()
                        - 1,
                ),
                last.clone(),
                false,
            ),
            None => (
                None,
                self.templates
                    .choice()
                    .cloned()
                    .ok_or_else(|| FormsetError::NotFound {
                        what: "choice template",
                        key: prefix.clone(),
                    })?,
                true,
            ),
        };
        stages.push(Stage::TemplateSelected);
        stages.push(Stage::Cloned);

        let count = group.total() + 1;
        let index = index_for(&prefix, count)?;
        stages.push(Stage::CounterAdvanced);

        if seeded {
            // the template was taken from another field's choices
            if let Some(owner) = group
                .prefix
                .owner
            {
                let key = RewriteKey::Owner(
                    group
                        .prefix
                        .base
                        .clone(),
                );
                rewrite(&mut item, &key, owner)?;
            }
        }
        rewrite(
            &mut item,
            &RewriteKey::Group(
                group
                    .prefix
                    .clone(),
            ),
            index,
        )?;
        item.conforms(&group.prefix)?;
        stages.push(Stage::Reindexed);

        item.clear_values();
        stages.push(Stage::ValuesCleared);

        let at = position.map_or(0, |p| p + 1);
        self.form
            .set(&prefix, count)?;
        let group = self
            .form
            .group_mut(&prefix)
            .ok_or_else(|| FormsetError::NotFound {
                what: "choice group",
                key: prefix.clone(),
            })?;
        group
            .items
            .insert(at, item);
        stages.push(Stage::Inserted);

        info!(prefix = %prefix, index, count, "added choice");
        Ok(Outcome {
            action: Action::AddChoice,
            group: prefix,
            index,
            position: Some(at),
            count,
            discarded: 0,
            stages,
        })
    }

    fn change_type(&mut self, field: usize, kind: &str) -> Result<Outcome, FormsetError> {
        let prefix = resolve_group_prefix(&self.form, Address::Field(field))?;
        let mut item: Item = self
            .form
            .fields
            .items
            .get(field)
            .cloned()
            .ok_or_else(|| FormsetError::NotFound {
                what: "field",
                key: format!("{}[{}]", prefix, field),
            })?;

        let type_field = &self
            .settings
            .type_field;
        item.control_mut(type_field)
            .ok_or_else(|| FormsetError::NotFound {
                what: "type selector",
                key: format!("{}-{}-{}", prefix, field, type_field),
            })?
            .choose(kind)?;

        let mut group = prefix;
        let mut count = self
            .form
            .fields
            .total();
        let mut discarded = 0;

        if let Some(nested) = &mut item.nested {
            group = nested
                .prefix
                .to_string();
            count = nested.total();
            if kind
                == self
                    .settings
                    .select_kind
            {
                nested.hidden = false;
            } else {
                nested.hidden = true;
                if let Some(first) = nested
                    .items
                    .first_mut()
                {
                    first.clear_text();
                }
                discarded = nested
                    .items
                    .len()
                    .saturating_sub(1);
                nested
                    .items
                    .truncate(1);
            }
        }

        if discarded > 0 {
            // the counter keeps counting the discarded choices
            warn!(
                group = %group,
                discarded, count, "choices discarded without adjusting the counter"
            );
        }

        if let Some(slot) = self
            .form
            .fields
            .items
            .get_mut(field)
        {
            *slot = item;
        }
        info!(field, kind, "field type changed");

        Ok(Outcome {
            action: Action::TypeChanged,
            group,
            index: field,
            position: None,
            count,
            discarded,
            stages: Vec::new(),
        })
    }
}
