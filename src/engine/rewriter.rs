//! Renumbering the naming attributes of a cloned item.
//!
//! Names are structured, so rewriting replaces a number inside a [`Name`]
//! rather than substituting text. The caller picks which number through a
//! [`RewriteKey`] and calls [`rewrite()`] once per group present in the
//! item; nested groups are not discovered here.

use std::fmt;

use tracing::debug;

use crate::document::{Group, Item};
use crate::error::FormsetError;
use crate::naming::{Name, Prefix, Slot, OWNER_SEPARATOR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteKey {
    /// Items of the group with this prefix get a new item index:
    /// `fields_formset-1-name` becomes `fields_formset-2-name`.
    Group(Prefix),
    /// Nested groups with this base get a new owner index:
    /// `choices_formset_1-0-name` becomes `choices_formset_2-0-name`.
    Owner(String),
}

impl fmt::Display for RewriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteKey::Group(prefix) => write!(f, "{}", prefix),
            RewriteKey::Owner(base) => write!(f, "{}{}*", base, OWNER_SEPARATOR),
        }
    }
}

/// Set the index selected by `key` to `index` on every matching name in
/// `item`, its labels and nested groups included. Returns how many names
/// were changed. Applying the same rewrite twice changes nothing further.
///
/// On error the item may be partially rewritten; callers work on a clone
/// and discard it.
pub fn rewrite(item: &mut Item, key: &RewriteKey, index: usize) -> Result<usize, FormsetError> {
    let mut count = 0;
    rewrite_item(item, key, index, &mut count)?;
    debug!(%key, index, count, "rewrote names");
    Ok(count)
}

fn rewrite_item(
    item: &mut Item,
    key: &RewriteKey,
    index: usize,
    count: &mut usize,
) -> Result<(), FormsetError> {
    for control in item
        .controls
        .iter_mut()
    {
        if rewrite_name(control.name_mut(), key, index)? {
            *count += 1;
        }
    }
    if let Some(nested) = &mut item.nested {
        rewrite_group(nested, key, index, count)?;
    }
    Ok(())
}

fn rewrite_group(
    group: &mut Group,
    key: &RewriteKey,
    index: usize,
    count: &mut usize,
) -> Result<(), FormsetError> {
    // the group's own prefix determines its counter names
    if let RewriteKey::Owner(base) = key {
        if group
            .prefix
            .base
            == *base
        {
            if group
                .prefix
                .owner
                .is_none()
            {
                return Err(FormsetError::PatternMismatch {
                    name: group
                        .counter_name()
                        .to_string(),
                    expected: key.to_string(),
                });
            }
            group
                .prefix
                .owner = Some(index);
            *count += 1;
        }
    }

    for item in group
        .items
        .iter_mut()
    {
        rewrite_item(item, key, index, count)?;
    }
    Ok(())
}

fn rewrite_name(name: &mut Name, key: &RewriteKey, index: usize) -> Result<bool, FormsetError> {
    let mismatch = |name: &Name| FormsetError::PatternMismatch {
        name: name.to_string(),
        expected: key.to_string(),
    };

    match key {
        RewriteKey::Group(prefix) => {
            if name.prefix == *prefix {
                match &mut name.slot {
                    Slot::Item { index: current, .. } => {
                        *current = index;
                        Ok(true)
                    }
                    Slot::Management(_) => Ok(false),
                }
            } else if name
                .prefix
                .base
                == prefix.base
            {
                // same group base, another owner: a stray from a sibling
                Err(mismatch(name))
            } else {
                Ok(false)
            }
        }
        RewriteKey::Owner(base) => {
            if name
                .prefix
                .base
                != *base
            {
                return Ok(false);
            }
            if name
                .prefix
                .owner
                .is_none()
            {
                return Err(mismatch(name));
            }
            name.prefix
                .owner = Some(index);
            Ok(true)
        }
    }
}
