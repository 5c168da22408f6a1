//! Error handling for formset loading and index management

mod display;

// Re-export all public symbols
pub use display::*;

use std::fmt;

/// Failures of a single engine operation. Each one aborts only the
/// operation that raised it; the form is left as it was before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormsetError {
    /// A required counter, group, item, or template is absent.
    NotFound { what: &'static str, key: String },
    /// A naming attribute does not follow the convention of the group it
    /// was expected to belong to.
    PatternMismatch { name: String, expected: String },
    /// An identifier has more than one `_` but no trailing numeric index,
    /// so the index segment cannot be told apart from the prefix.
    PrefixAmbiguity { prefix: String },
    /// A counter holds something other than an integer, or a count that
    /// cannot yield a valid index.
    InvalidCount { prefix: String, value: String },
    /// Command text that does not describe a known command.
    UnknownCommand(String),
}

impl FormsetError {
    pub fn message(&self) -> String {
        match self {
            FormsetError::NotFound { what, .. } => format!("{} not found", what),
            FormsetError::PatternMismatch { .. } => "name does not match group".to_string(),
            FormsetError::PrefixAmbiguity { .. } => "ambiguous prefix".to_string(),
            FormsetError::InvalidCount { .. } => "invalid counter value".to_string(),
            FormsetError::UnknownCommand(_) => "unknown command".to_string(),
        }
    }

    pub fn details(&self) -> String {
        match self {
            FormsetError::NotFound { key, .. } => format!("nothing is addressed by '{}'", key),
            FormsetError::PatternMismatch { name, expected } => {
                format!("'{}' was expected to be named with prefix '{}'", name, expected)
            }
            FormsetError::PrefixAmbiguity { prefix } => format!(
                "'{}' has several '_' separators but does not end in an index",
                prefix
            ),
            FormsetError::InvalidCount { prefix, value } => {
                format!("counter of '{}' holds '{}'", prefix, value)
            }
            FormsetError::UnknownCommand(text) => format!(
                "'{}' is not one of add-field, add-choice:<field>, type:<field>=<kind>",
                text
            ),
        }
    }
}

impl fmt::Display for FormsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message(), self.details())
    }
}

impl std::error::Error for FormsetError {}
