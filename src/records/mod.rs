//! Reading submitted form data back into ordered records, as the server
//! side of the naming convention does.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::document::ManagementForm;
use crate::error::FormsetError;
use crate::naming::{Management, Name, Prefix, SEPARATOR};
use crate::settings::Settings;

/// Field name to submitted value for one item.
pub type Record = BTreeMap<String, String>;

/// A field together with the choices submitted under its nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRecord {
    pub index: usize,
    pub values: Record,
    pub choices: Vec<Record>,
}

impl FieldRecord {
    pub fn kind<'a>(&'a self, settings: &Settings) -> Option<&'a str> {
        self.values
            .get(&settings.type_field)
            .map(String::as_str)
    }
}

/// Submitted `(name, value)` pairs, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> FormData {
        FormData { pairs }
    }

    /// The first value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// How many items the group with `prefix` declares. Counts above the
    /// group's `MAX_NUM_FORMS` plus [`ManagementForm::DEFAULT_MAX_NUM`] are
    /// refused; the submitted maximum itself is capped at the default.
    pub fn total(&self, prefix: &str) -> Result<usize, FormsetError> {
        let prefix_name = |kind| Name::management(Prefix::new(prefix), kind).to_string();

        let name = prefix_name(Management::Total);
        let value = self
            .get(&name)
            .ok_or_else(|| FormsetError::NotFound {
                what: "counter",
                key: name.clone(),
            })?;
        let invalid = || FormsetError::InvalidCount {
            prefix: prefix.to_string(),
            value: value.to_string(),
        };
        let total = value
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid())?;

        let limit = self.absolute_max(&prefix_name(Management::MaxNum));
        if total > limit {
            warn!(prefix, total, limit, "counter above the absolute maximum");
            return Err(invalid());
        }
        Ok(total)
    }

    fn absolute_max(&self, name: &str) -> usize {
        let default = ManagementForm::DEFAULT_MAX_NUM as usize;
        let max_num = self
            .get(name)
            .and_then(|value| {
                value
                    .trim()
                    .parse::<usize>()
                    .ok()
            })
            .map_or(default, |max_num| max_num.min(default));
        max_num + default
    }

    /// One record per declared item of the group with `prefix`. Items the
    /// counter declares but nothing was submitted for come back empty;
    /// values beyond the counter are ignored.
    pub fn records(&self, prefix: &str) -> Result<Vec<Record>, FormsetError> {
        let total = self.total(prefix)?;
        let mut records = vec![Record::new(); total];

        let re = regex!(r"^([0-9]+)-([^-]+)$");
        for (key, value) in &self.pairs {
            let rest = match key
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix(SEPARATOR))
            {
                Some(rest) => rest,
                None => continue,
            };
            let cap = match re.captures(rest) {
                Some(cap) => cap,
                None => continue,
            };
            let index = match cap[1].parse::<usize>() {
                Ok(index) => index,
                Err(_) => continue,
            };
            match records.get_mut(index) {
                Some(record) => {
                    record
                        .entry(cap[2].to_string())
                        .or_insert_with(|| value.clone());
                }
                None => debug!(key = %key, total, "value beyond the declared count"),
            }
        }

        Ok(records)
    }

    /// Fields with their choices. Every field is expected to have submitted
    /// the counter of its choices group.
    pub fn field_records(&self, settings: &Settings) -> Result<Vec<FieldRecord>, FormsetError> {
        let fields = self.records(&settings.field_prefix)?;
        let mut result = Vec::with_capacity(fields.len());
        for (index, values) in fields
            .into_iter()
            .enumerate()
        {
            let choices = self.records(&settings.choices_prefix(index))?;
            result.push(FieldRecord {
                index,
                values,
                choices,
            });
        }
        Ok(result)
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> FormData {
        FormData::new(pairs)
    }
}
