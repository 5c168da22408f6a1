use std::{fmt, path::Path};

use owo_colors::OwoColorize;

use super::FormsetError;

/// Problems reading or decoding a page snapshot from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
    pub line: Option<usize>,
}

// Verbose detailed explanation
impl<'i> LoadingError<'i> {
    pub fn full_details(&self) -> String {
        let location = match self.line {
            Some(line) => format!(
                "{}:{}",
                self.filename
                    .to_string_lossy(),
                line
            ),
            None => self
                .filename
                .to_string_lossy()
                .to_string(),
        };

        format!(
            r#"
{}: {}
{}

{}
            "#,
            "error".bright_red(),
            self.problem
                .bold(),
            location.bright_blue(),
            self.details
        )
        .trim_ascii()
        .to_string()
    }
}

// Concise version for internal use
impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error: {} {}: {}",
            self.filename
                .to_string_lossy(),
            self.problem,
            self.details
        )
    }
}

impl FormsetError {
    pub fn full_details(&self) -> String {
        format!(
            "{}: {}\n{} {}",
            "error".bright_red(),
            self.message()
                .bold(),
            '|'.bright_blue(),
            self.details()
        )
    }
}
