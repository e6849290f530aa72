//! Store error types.

use thiserror::Error;

/// Errors raised while assembling a store from modules.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// Two modules tried to own the same top-level state key
    #[error("State key '{key}' is already owned by another module")]
    KeyConflict { key: String },
}
