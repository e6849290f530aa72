//! History instances and their store module.
//!
//! [`create_history`] turns a list of tracked paths and a [`HistoryConfig`]
//! into a [`History`]: a store module plus the action ids that drive it.
//!
//! # Example
//!
//! ```rust
//! use undoable::history::{create_history, HistoryConfig};
//! use undoable::paths;
//! use undoable::store::{Registry, StoreBuilder, Update};
//! use serde_json::json;
//!
//! let counter = |registry: &mut Registry| {
//!     registry.on_init(|_| Update::patch([("a", json!(0)), ("b", json!(0))]));
//!     registry.on("counter/add", |state, _| {
//!         let a = state["a"].as_i64().unwrap_or(0);
//!         let b = state["b"].as_i64().unwrap_or(0);
//!         Update::patch([("a", json!(a + 1)), ("b", json!(b + 1))])
//!     });
//! };
//!
//! let history = create_history(paths!["a"], HistoryConfig::default()).unwrap();
//! let mut store = StoreBuilder::new()
//!     .module(counter)
//!     .module(history.module())
//!     .build()
//!     .unwrap();
//!
//! store.dispatch("counter/add");
//! store.dispatch(history.undo());
//!
//! assert_eq!(store.get()["a"], json!(0));
//! assert_eq!(store.get()["b"], json!(1));
//! ```

mod action;
mod config;
mod error;
mod tracker;
mod validate;

pub use action::{HistoryAction, HistoryActionId, Scope};
pub use config::{HistoryConfig, ValidationMode};
pub use error::{ConfigError, Violation};

use crate::core::{FullState, HistoryRecord, Paths};
use crate::store::{ActionId, Module, Registry, StoreError};
use serde_json::Value;
use std::sync::Arc;
use tracker::{Instance, Tracker};
use tracing::debug;

/// One history instance: its module and the actions that drive it.
///
/// Cloning shares the same instance and action ids.
#[derive(Clone, Debug)]
pub struct History {
    instance: Arc<Instance>,
}

impl History {
    fn assemble(paths: Paths, config: &HistoryConfig) -> Self {
        let key = config.storage_key(&paths);
        let instance = Instance {
            paths,
            limit: config.limit,
            scope: Scope::new(&key),
        };
        debug!(
            key = %key,
            paths = instance.paths.len(),
            limit = ?instance.limit,
            "history created"
        );
        Self {
            instance: Arc::new(instance),
        }
    }

    /// History over the whole state under the `"undoable"` key.
    ///
    /// Every call mints fresh action ids, so two of these never answer
    /// each other's undo or redo.
    pub fn full() -> Self {
        Self::assemble(Paths::all(), &HistoryConfig::default())
    }

    /// Module to add to a store.
    pub fn module(&self) -> HistoryModule {
        HistoryModule {
            instance: Arc::clone(&self.instance),
        }
    }

    pub fn undo(&self) -> ActionId {
        self.action(HistoryAction::Undo)
    }

    pub fn redo(&self) -> ActionId {
        self.action(HistoryAction::Redo)
    }

    /// Drop `past` and `future`, keeping the current checkpoint.
    pub fn clear(&self) -> ActionId {
        self.action(HistoryAction::Clear)
    }

    fn action(&self, kind: HistoryAction) -> ActionId {
        ActionId::History(HistoryActionId::new(kind, self.instance.scope.clone()))
    }

    /// Storage key of the record inside the full state.
    pub fn key(&self) -> &str {
        self.instance.key()
    }

    pub fn paths(&self) -> &Paths {
        &self.instance.paths
    }

    pub fn limit(&self) -> Option<usize> {
        self.instance.limit
    }

    pub fn scope(&self) -> &Scope {
        &self.instance.scope
    }

    /// This instance's record in `state`, if present.
    pub fn record(&self, state: &FullState) -> Option<HistoryRecord> {
        HistoryRecord::from_state(state, self.key())
    }
}

/// Create a history instance tracking `paths`.
///
/// With [`ValidationMode::Eager`] every violation in `paths` and `config`
/// is reported together. With [`ValidationMode::Deferred`] the checks are
/// skipped.
pub fn create_history(paths: Paths, config: HistoryConfig) -> Result<History, ConfigError> {
    if config.mode == ValidationMode::Eager {
        let mut checks = validate::check_paths(&paths);
        checks.extend(validate::check_config(&config));
        validate::collect(checks)?;
    }
    Ok(History::assemble(paths, &config))
}

/// Create a history instance from a dynamically-typed path list.
///
/// In eager mode a non-array fails with
/// `The paths parameter should be an array: create_history([])` and every
/// other violation is reported alongside. In deferred mode the value is
/// converted directly and a non-array surfaces as a conversion error.
///
/// # Example
///
/// ```rust
/// use undoable::history::{create_history_from_value, HistoryConfig, ValidationMode};
/// use serde_json::json;
///
/// let eager = HistoryConfig::new().mode(ValidationMode::Eager);
/// let err = create_history_from_value(&json!(null), eager).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "The paths parameter should be an array: create_history([])"
/// );
///
/// let history = create_history_from_value(&json!(["a"]), HistoryConfig::default()).unwrap();
/// assert_eq!(history.key(), "undoable_a");
/// ```
pub fn create_history_from_value(
    paths: &Value,
    config: HistoryConfig,
) -> Result<History, ConfigError> {
    match config.mode {
        ValidationMode::Eager => {
            let (paths, mut checks) = validate::check_value(paths);
            checks.extend(validate::check_paths(&paths));
            checks.extend(validate::check_config(&config));
            validate::collect(checks)?;
            Ok(History::assemble(paths, &config))
        }
        ValidationMode::Deferred => {
            let paths: Paths = serde_json::from_value(paths.clone())?;
            Ok(History::assemble(paths, &config))
        }
    }
}

/// Store module for one [`History`].
pub struct HistoryModule {
    instance: Arc<Instance>,
}

impl Module for HistoryModule {
    fn register(&self, registry: &mut Registry) -> Result<(), StoreError> {
        registry.claim(self.instance.key())?;

        let tracker = Arc::new(Tracker::new(
            Arc::clone(&self.instance),
            registry.reserved_keys(),
        ));
        let scope = self.instance.scope.clone();

        let t = Arc::clone(&tracker);
        registry.on_init(move |state| t.init(state));

        let t = Arc::clone(&tracker);
        registry.on(
            HistoryActionId::new(HistoryAction::Undo, scope.clone()),
            move |state, _| t.undo(state),
        );

        let t = Arc::clone(&tracker);
        registry.on(
            HistoryActionId::new(HistoryAction::Redo, scope.clone()),
            move |state, _| t.redo(state),
        );

        let t = Arc::clone(&tracker);
        registry.on(
            HistoryActionId::new(HistoryAction::Clear, scope),
            move |state, _| t.clear(state),
        );

        registry.on_dispatch(move |state, action| tracker.observe(state, action));
        Ok(())
    }
}
