//! Minimal synchronous event store.
//!
//! This is the "imperative shell" the history core plugs into. A store
//! holds one immutable top-level state object and replaces it wholesale on
//! every action that changes something.
//!
//! # Dispatch order
//!
//! For each dispatched action:
//! 1. handlers registered for that action run in registration order
//! 2. dispatch hooks run in registration order
//! 3. if the state changed, change observers see the settled state
//!
//! # Example
//!
//! ```rust
//! use undoable::store::{Registry, StoreBuilder, Update};
//! use serde_json::json;
//!
//! let counter = |registry: &mut Registry| {
//!     registry.on_init(|_| Update::patch([("count", json!(0))]));
//!     registry.on("inc", |state, _| {
//!         let count = state["count"].as_i64().unwrap_or(0);
//!         Update::patch([("count", json!(count + 1))])
//!     });
//! };
//!
//! let mut store = StoreBuilder::new().module(counter).build().unwrap();
//! store.dispatch("inc");
//! assert_eq!(store.to_value(), json!({"count": 1}));
//! ```

mod action;
mod error;
mod registry;

pub use action::ActionId;
pub use error::StoreError;
pub use registry::{
    ActionHandler, ChangeObserver, DispatchHook, InitHandler, Module, Patch, Registry,
    ReservedKeys, Update,
};

use crate::core::FullState;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// Collects modules and builds a [`Store`].
#[derive(Default)]
pub struct StoreBuilder {
    modules: Vec<Box<dyn Module>>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. Modules register in the order they are added.
    pub fn module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Register every module and run init handlers.
    pub fn build(self) -> Result<Store, StoreError> {
        let mut registry = Registry::new();
        for module in &self.modules {
            module.register(&mut registry)?;
        }
        registry.seal();

        let mut state = FullState::new();
        for handler in &registry.init {
            handler(&state).apply(&mut state);
        }
        debug!(keys = state.len(), "store initialized");

        Ok(Store {
            registry,
            state: Arc::new(state),
        })
    }
}

/// An event-driven state container.
pub struct Store {
    registry: Registry,
    state: Arc<FullState>,
}

impl Store {
    /// Current state. Earlier snapshots stay valid after later dispatches.
    pub fn get(&self) -> Arc<FullState> {
        Arc::clone(&self.state)
    }

    /// Current state as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.state.as_ref().clone())
    }

    /// Dispatch an action without payload.
    pub fn dispatch(&mut self, action: impl Into<ActionId>) {
        self.dispatch_with(action, Value::Null);
    }

    /// Dispatch an action, handing `payload` to its handlers.
    pub fn dispatch_with(&mut self, action: impl Into<ActionId>, payload: Value) {
        let action = action.into();
        trace!(%action, "dispatch");

        let mut next = self.state.as_ref().clone();
        let mut touched = false;

        if let Some(handlers) = self.registry.actions.get(&action) {
            for handler in handlers {
                touched |= handler(&next, &payload).apply(&mut next);
            }
        }
        for hook in &self.registry.dispatch {
            touched |= hook(&next, &action).apply(&mut next);
        }

        if !touched || next == *self.state {
            return;
        }
        let diff = diff(&self.state, &next);

        debug!(%action, changed = diff.len(), "state changed");
        self.state = Arc::new(next);
        for observer in &self.registry.changed {
            observer(&self.state, &diff);
        }
    }
}

/// Top-level entries of `after` that differ from `before`.
///
/// Removed keys do not appear.
fn diff(before: &FullState, after: &FullState) -> Patch {
    after
        .iter()
        .filter(|(key, value)| before.get(key.as_str()) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn counter(registry: &mut Registry) {
        registry.on_init(|_| Update::patch([("a", json!(0)), ("b", json!(0))]));
        registry.on("counter/add", |state, _| {
            let a = state["a"].as_i64().unwrap_or(0);
            let b = state["b"].as_i64().unwrap_or(0);
            Update::patch([("a", json!(a + 1)), ("b", json!(b + 1))])
        });
        registry.on("counter/set", |_, payload| {
            Update::patch([("a", payload.clone())])
        });
        registry.on("counter/noop", |_, _| Update::NoChange);
        registry.on("counter/drop-b", |_, _| Update::Edit {
            set: Patch::new(),
            remove: vec!["b".to_string()],
        });
    }

    #[test]
    fn init_handlers_seed_state() {
        let store = StoreBuilder::new().module(counter).build().unwrap();
        assert_eq!(store.to_value(), json!({"a": 0, "b": 0}));
    }

    #[test]
    fn init_handlers_see_earlier_modules() {
        let mirror = |registry: &mut Registry| {
            registry.on_init(|state| Update::patch([("seen", json!(state.len()))]));
        };
        let store = StoreBuilder::new()
            .module(counter)
            .module(mirror)
            .build()
            .unwrap();
        assert_eq!(store.get()["seen"], json!(2));
    }

    #[test]
    fn dispatch_replaces_state_object() {
        let mut store = StoreBuilder::new().module(counter).build().unwrap();
        let before = store.get();
        store.dispatch("counter/add");
        let after = store.get();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before["a"], json!(0));
        assert_eq!(after["a"], json!(1));
    }

    #[test]
    fn payload_reaches_handler() {
        let mut store = StoreBuilder::new().module(counter).build().unwrap();
        store.dispatch_with("counter/set", json!(42));
        assert_eq!(store.get()["a"], json!(42));
    }

    #[test]
    fn unknown_action_keeps_state() {
        let mut store = StoreBuilder::new().module(counter).build().unwrap();
        let before = store.get();
        store.dispatch("nobody/listens");
        assert!(Arc::ptr_eq(&before, &store.get()));
    }

    #[test]
    fn observers_see_only_real_changes() {
        let seen: Arc<Mutex<Vec<Patch>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let observer = move |registry: &mut Registry| {
            let sink = Arc::clone(&sink);
            registry.on_changed(move |_, diff| sink.lock().unwrap().push(diff.clone()));
        };

        let mut store = StoreBuilder::new()
            .module(counter)
            .module(observer)
            .build()
            .unwrap();
        store.dispatch("counter/noop");
        store.dispatch_with("counter/set", json!(0));
        store.dispatch("counter/add");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(Value::Object(seen[0].clone()), json!({"a": 1, "b": 1}));
    }

    #[test]
    fn removal_alone_replaces_state() {
        let mut store = StoreBuilder::new().module(counter).build().unwrap();
        let before = store.get();
        store.dispatch("counter/drop-b");
        assert!(!Arc::ptr_eq(&before, &store.get()));
        assert_eq!(store.to_value(), json!({"a": 0}));
    }

    #[test]
    fn dispatch_hooks_run_after_handlers() {
        let tally = |registry: &mut Registry| {
            registry.on_init(|_| Update::patch([("dispatches", json!(0))]));
            registry.on_dispatch(|state, _| {
                let n = state["dispatches"].as_i64().unwrap_or(0);
                Update::patch([("dispatches", json!(n + 1)), ("a_seen", state["a"].clone())])
            });
        };
        let mut store = StoreBuilder::new()
            .module(counter)
            .module(tally)
            .build()
            .unwrap();
        store.dispatch("counter/add");
        assert_eq!(store.get()["dispatches"], json!(1));
        assert_eq!(store.get()["a_seen"], json!(1));
    }

    struct Owner(&'static str);

    impl Module for Owner {
        fn register(&self, registry: &mut Registry) -> Result<(), StoreError> {
            registry.claim(self.0)
        }
    }

    #[test]
    fn conflicting_keys_fail_the_build() {
        let result = StoreBuilder::new()
            .module(Owner("shared"))
            .module(Owner("shared"))
            .build();
        assert_eq!(
            result.err(),
            Some(StoreError::KeyConflict {
                key: "shared".to_string()
            })
        );
    }

    #[test]
    fn distinct_keys_coexist() {
        let result = StoreBuilder::new()
            .module(Owner("left"))
            .module(Owner("right"))
            .build();
        assert!(result.is_ok());
    }
}
