//! Configuration for history instances.

use crate::core::Paths;
use serde::{Deserialize, Serialize};

/// When configuration is checked.
///
/// `Eager` validates everything up front and reports every problem with a
/// descriptive message. `Deferred` skips that pass; malformed input then
/// fails during conversion with a terser error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    Eager,
    Deferred,
}

impl ValidationMode {
    /// `Eager` in debug builds, `Deferred` in release builds.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Eager
        } else {
            Self::Deferred
        }
    }
}

impl Default for ValidationMode {
    fn default() -> Self {
        Self::for_build()
    }
}

/// Options for [`create_history`](crate::history::create_history).
///
/// # Example
///
/// ```rust
/// use undoable::history::HistoryConfig;
///
/// let config = HistoryConfig::new().key("editor").limit(100);
/// assert_eq!(config.key.as_deref(), Some("editor"));
///
/// let from_json: HistoryConfig = serde_json::from_str(r#"{"key": "editor"}"#).unwrap();
/// assert_eq!(from_json.limit, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Storage key; overrides the key derived from paths
    pub key: Option<String>,

    /// Maximum number of `past` checkpoints kept; unbounded when `None`
    pub limit: Option<usize>,

    /// When to validate the configuration
    #[serde(skip)]
    pub mode: ValidationMode,
}

impl HistoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the history under `key`.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Keep at most `limit` past checkpoints.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Override the build-dependent validation mode.
    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Resolve the storage key: explicit key first, then derived from paths.
    pub fn storage_key(&self, paths: &Paths) -> String {
        self.key.clone().unwrap_or_else(|| paths.derived_key())
    }
}
