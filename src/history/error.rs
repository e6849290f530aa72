//! Configuration errors for history instances.

use thiserror::Error;

/// A single problem found while validating a history configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("The paths parameter should be an array: create_history([])")]
    NotASequence,

    #[error("Path at index {index} should be a string, found {found}")]
    NonStringPath { index: usize, found: &'static str },

    #[error("Path at index {index} is an empty string")]
    EmptyPath { index: usize },

    #[error("Path '{path}' is listed more than once")]
    DuplicatePath { path: String },

    #[error("The key option should be a non-empty string")]
    EmptyKey,

    #[error("The limit option should be at least 1")]
    ZeroLimit,
}

/// Errors returned when creating a history instance.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Eager validation found one or more violations
    #[error("{}", render(.0))]
    Invalid(Vec<Violation>),

    /// Deferred validation hit a malformed value while converting it
    #[error("Malformed history paths: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ConfigError {
    /// Violations found by eager validation. Empty for [`ConfigError::Malformed`].
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid(violations) => violations.as_slice(),
            Self::Malformed(_) => &[],
        }
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
