//! Eager configuration checks using Validation.
//!
//! Every check runs and every violation is reported together, so a caller
//! fixing a bad configuration sees all of its problems at once.

use super::config::HistoryConfig;
use super::error::{ConfigError, Violation};
use crate::core::Paths;
use serde_json::Value;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single check.
pub(crate) type Check = Validation<(), NonEmptyVec<Violation>>;

fn pass() -> Check {
    Validation::success(())
}

fn fail(violation: Violation) -> Check {
    Validation::fail(violation)
}

/// Checks on the tracked path list.
pub(crate) fn check_paths(paths: &Paths) -> Vec<Check> {
    let mut checks = Vec::new();
    let mut seen = HashSet::new();

    for (index, path) in paths.iter().enumerate() {
        checks.push(if path.is_empty() {
            fail(Violation::EmptyPath { index })
        } else {
            pass()
        });
        if !path.is_empty() && !seen.insert(path) {
            checks.push(fail(Violation::DuplicatePath {
                path: path.to_string(),
            }));
        }
    }
    checks
}

/// Checks on the configuration options.
pub(crate) fn check_config(config: &HistoryConfig) -> Vec<Check> {
    let key = match config.key.as_deref() {
        Some("") => fail(Violation::EmptyKey),
        _ => pass(),
    };
    let limit = match config.limit {
        Some(0) => fail(Violation::ZeroLimit),
        _ => pass(),
    };
    vec![key, limit]
}

/// Read a dynamically-typed path list, checking each entry.
///
/// String entries are kept even when others fail, so the remaining checks
/// can still run on them.
pub(crate) fn check_value(value: &Value) -> (Paths, Vec<Check>) {
    let Some(items) = value.as_array() else {
        return (Paths::all(), vec![fail(Violation::NotASequence)]);
    };

    let mut keys = Vec::with_capacity(items.len());
    let mut checks = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(key) => {
                keys.push(key.to_string());
                checks.push(pass());
            }
            None => checks.push(fail(Violation::NonStringPath {
                index,
                found: kind(item),
            })),
        }
    }
    (Paths::keys(keys), checks)
}

/// Accumulate every check into a single result.
pub(crate) fn collect(checks: Vec<Check>) -> Result<(), ConfigError> {
    if checks.is_empty() {
        return Ok(());
    }
    match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::Invalid(errors.iter().cloned().collect())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
