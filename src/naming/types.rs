//! Structured form of the positional naming convention

use std::fmt;

use tracing::warn;

use super::prefix::strip_trailing_index;
use crate::error::FormsetError;

/// Separates prefix, index, and field name: `fields_formset-2-name`.
pub const SEPARATOR: char = '-';

/// Joins a nested group's base to the index of the item owning it:
/// `choices_formset_2`.
pub const OWNER_SEPARATOR: char = '_';

/// Identities are the name with this in front: `id_fields_formset-2-name`.
pub const ID_PREFIX: &str = "id_";

/// The identifier of a group. Nested groups carry the index of the item
/// they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix {
    pub base: String,
    pub owner: Option<usize>,
}

impl Prefix {
    pub fn new(base: impl Into<String>) -> Prefix {
        Prefix {
            base: base.into(),
            owner: None,
        }
    }

    pub fn nested(base: impl Into<String>, owner: usize) -> Prefix {
        Prefix {
            base: base.into(),
            owner: Some(owner),
        }
    }

    /// Read a prefix out of its rendered form. A nested prefix must end in
    /// `_<owner>`; a top level one is taken verbatim.
    pub fn parse(text: &str, nested: bool) -> Result<Prefix, FormsetError> {
        if text.is_empty() || text.contains(SEPARATOR) {
            return Err(FormsetError::PatternMismatch {
                name: text.to_string(),
                expected: "a prefix without '-'".to_string(),
            });
        }

        if !nested {
            return Ok(Prefix::new(text));
        }

        let re = regex!(r"^(.+)_([0-9]+)$");
        let cap = re
            .captures(text)
            .ok_or_else(|| FormsetError::PrefixAmbiguity {
                prefix: text.to_string(),
            })?;

        let base = &cap[1];
        let owner = cap[2]
            .parse::<usize>()
            .map_err(|_| FormsetError::PrefixAmbiguity {
                prefix: text.to_string(),
            })?;

        // the separator-counting rule only holds for bases that themselves
        // contain an underscore
        match strip_trailing_index(text) {
            Ok(stripped) if stripped == base => {}
            Ok(stripped) => warn!(
                prefix = text,
                stripped, base, "separator heuristic disagrees with owner index"
            ),
            Err(error) => warn!(prefix = text, %error, "separator heuristic failed"),
        }

        Ok(Prefix::nested(base, owner))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Some(owner) => write!(f, "{}{}{}", self.base, OWNER_SEPARATOR, owner),
            None => write!(f, "{}", self.base),
        }
    }
}

/// The hidden counters every group submits alongside its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Management {
    Total,
    Initial,
    MinNum,
    MaxNum,
}

impl Management {
    pub const ALL: [Management; 4] = [
        Management::Total,
        Management::Initial,
        Management::MinNum,
        Management::MaxNum,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            Management::Total => "TOTAL_FORMS",
            Management::Initial => "INITIAL_FORMS",
            Management::MinNum => "MIN_NUM_FORMS",
            Management::MaxNum => "MAX_NUM_FORMS",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Management> {
        Management::ALL
            .into_iter()
            .find(|kind| kind.suffix() == suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Item { index: usize, field: String },
    Management(Management),
}

/// A naming attribute: `<prefix>-<index>-<field>` for controls of an item,
/// `<prefix>-TOTAL_FORMS` and friends for counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub prefix: Prefix,
    pub slot: Slot,
}

impl Name {
    pub fn item(prefix: Prefix, index: usize, field: impl Into<String>) -> Name {
        Name {
            prefix,
            slot: Slot::Item {
                index,
                field: field.into(),
            },
        }
    }

    pub fn management(prefix: Prefix, kind: Management) -> Name {
        Name {
            prefix,
            slot: Slot::Management(kind),
        }
    }

    pub fn index(&self) -> Option<usize> {
        match &self.slot {
            Slot::Item { index, .. } => Some(*index),
            Slot::Management(_) => None,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match &self.slot {
            Slot::Item { field, .. } => Some(field),
            Slot::Management(_) => None,
        }
    }

    /// The identity attribute, always derived from the name.
    pub fn id(&self) -> String {
        format!("{}{}", ID_PREFIX, self)
    }

    /// Parse a rendered name that must belong to the group with `prefix`.
    pub fn parse(text: &str, prefix: &Prefix) -> Result<Name, FormsetError> {
        let mismatch = || FormsetError::PatternMismatch {
            name: text.to_string(),
            expected: prefix.to_string(),
        };

        let head = prefix.to_string();
        let rest = text
            .strip_prefix(head.as_str())
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .ok_or_else(mismatch)?;

        if let Some(kind) = Management::from_suffix(rest) {
            return Ok(Name::management(prefix.clone(), kind));
        }

        let re = regex!(r"^([0-9]+)-([^-]+)$");
        let cap = re
            .captures(rest)
            .ok_or_else(mismatch)?;

        let index = cap[1]
            .parse::<usize>()
            .map_err(|_| mismatch())?;

        Ok(Name::item(prefix.clone(), index, &cap[2]))
    }

    /// Parse an identity (`id_` followed by a name), as found in a label's
    /// `for` attribute.
    pub fn parse_id(text: &str, prefix: &Prefix) -> Result<Name, FormsetError> {
        let name = text
            .strip_prefix(ID_PREFIX)
            .ok_or_else(|| FormsetError::PatternMismatch {
                name: text.to_string(),
                expected: format!("{}{}", ID_PREFIX, prefix),
            })?;
        Name::parse(name, prefix)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Slot::Item { index, field } => write!(
                f,
                "{}{}{}{}{}",
                self.prefix, SEPARATOR, index, SEPARATOR, field
            ),
            Slot::Management(kind) => write!(f, "{}{}{}", self.prefix, SEPARATOR, kind.suffix()),
        }
    }
}

/// Extract the group prefix from a rendered counter name such as
/// `choices_formset_0-TOTAL_FORMS`.
pub fn counter_prefix(text: &str) -> Result<&str, FormsetError> {
    let re = regex!(r"^([^-]+)-TOTAL_FORMS$");
    let cap = re
        .captures(text)
        .ok_or_else(|| FormsetError::PatternMismatch {
            name: text.to_string(),
            expected: "<prefix>-TOTAL_FORMS".to_string(),
        })?;
    match cap.get(1) {
        Some(found) => Ok(found.as_str()),
        None => Err(FormsetError::PatternMismatch {
            name: text.to_string(),
            expected: "<prefix>-TOTAL_FORMS".to_string(),
        }),
    }
}
