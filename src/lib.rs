//! Index management for dynamically grown, nested formsets.
//!
//! A page holds a group of fields, and each field a group of choices. The
//! [`engine::GroupManager`] adds fields and choices by cloning the last item
//! of a group and renumbering every naming attribute in the clone so that
//! the submitted data still parses as an ordered list of records.

#[macro_use]
mod regex;

pub mod document;
pub mod engine;
pub mod error;
pub mod naming;
pub mod records;
pub mod report;
pub mod settings;
