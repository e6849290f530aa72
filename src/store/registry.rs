//! Handler registration for store modules.
//!
//! Modules register closures against typed events. The store runs them in
//! registration order; every handler sees the state left by the previous one.

use super::action::ActionId;
use super::error::StoreError;
use crate::core::FullState;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

/// Top-level entries to shallow-merge into the state.
pub type Patch = Map<String, Value>;

/// What a handler wants done to the state.
///
/// Keeps "nothing to do" distinct from "merge an empty patch".
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Update {
    /// Leave the state as it is
    #[default]
    NoChange,

    /// Shallow-merge these entries into the state
    Patch(Patch),

    /// Remove the `remove` keys, then shallow-merge `set`
    Edit { set: Patch, remove: Vec<String> },
}

impl Update {
    /// Build a patch from key/value pairs.
    pub fn patch<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Patch(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self, Self::NoChange)
    }

    /// Apply to `state`. Returns false for [`Update::NoChange`].
    pub(crate) fn apply(self, state: &mut FullState) -> bool {
        match self {
            Self::NoChange => false,
            Self::Patch(patch) => {
                state.extend(patch);
                true
            }
            Self::Edit { set, remove } => {
                for key in &remove {
                    state.remove(key);
                }
                state.extend(set);
                true
            }
        }
    }
}

impl From<Option<Patch>> for Update {
    fn from(patch: Option<Patch>) -> Self {
        patch.map_or(Self::NoChange, Self::Patch)
    }
}

/// Seeds state when the store is built.
pub type InitHandler = Box<dyn Fn(&FullState) -> Update + Send + Sync>;

/// Reacts to one action with its payload.
pub type ActionHandler = Box<dyn Fn(&FullState, &Value) -> Update + Send + Sync>;

/// Runs after the handlers of every action.
pub type DispatchHook = Box<dyn Fn(&FullState, &ActionId) -> Update + Send + Sync>;

/// Observes settled state together with the changed top-level entries.
pub type ChangeObserver = Box<dyn Fn(&FullState, &Patch) + Send + Sync>;

/// Read-only view of every claimed state key.
///
/// Empty until the store finishes registering modules.
#[derive(Clone, Debug, Default)]
pub struct ReservedKeys(Arc<OnceLock<HashSet<String>>>);

impl ReservedKeys {
    pub fn contains(&self, key: &str) -> bool {
        self.0.get().is_some_and(|keys| keys.contains(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.get().into_iter().flatten().map(String::as_str)
    }
}

/// Table of handlers, filled by [`Module::register`].
#[derive(Default)]
pub struct Registry {
    pub(crate) init: Vec<InitHandler>,
    pub(crate) actions: HashMap<ActionId, Vec<ActionHandler>>,
    pub(crate) dispatch: Vec<DispatchHook>,
    pub(crate) changed: Vec<ChangeObserver>,
    claimed: HashSet<String>,
    reserved: ReservedKeys,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contribute initial state.
    pub fn on_init<F>(&mut self, handler: F)
    where
        F: Fn(&FullState) -> Update + Send + Sync + 'static,
    {
        self.init.push(Box::new(handler));
    }

    /// Handle a specific action.
    pub fn on<F>(&mut self, action: impl Into<ActionId>, handler: F)
    where
        F: Fn(&FullState, &Value) -> Update + Send + Sync + 'static,
    {
        self.actions
            .entry(action.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Run after every dispatched action, seeing the action's result.
    pub fn on_dispatch<F>(&mut self, hook: F)
    where
        F: Fn(&FullState, &ActionId) -> Update + Send + Sync + 'static,
    {
        self.dispatch.push(Box::new(hook));
    }

    /// Observe settled state. Observers cannot request further changes.
    pub fn on_changed<F>(&mut self, observer: F)
    where
        F: Fn(&FullState, &Patch) + Send + Sync + 'static,
    {
        self.changed.push(Box::new(observer));
    }

    /// Reserve a top-level state key for exclusive use by one module.
    pub fn claim(&mut self, key: &str) -> Result<(), StoreError> {
        if self.claimed.insert(key.to_string()) {
            Ok(())
        } else {
            Err(StoreError::KeyConflict {
                key: key.to_string(),
            })
        }
    }

    /// Handle on the final set of claimed keys, readable once the store is built.
    pub fn reserved_keys(&self) -> ReservedKeys {
        self.reserved.clone()
    }

    /// Publish the claimed keys to every [`ReservedKeys`] handle.
    ///
    /// A registry is sealed once; a second call keeps the first set.
    pub(crate) fn seal(&mut self) {
        let first = self.reserved.0.set(std::mem::take(&mut self.claimed)).is_ok();
        debug_assert!(first, "registry sealed twice");
    }

    /// Whether any handler is registered for `action`.
    pub fn handles(&self, action: &ActionId) -> bool {
        self.actions.contains_key(action)
    }
}

/// A unit of store behaviour that registers its handlers.
pub trait Module {
    fn register(&self, registry: &mut Registry) -> Result<(), StoreError>;
}

impl<F> Module for F
where
    F: Fn(&mut Registry),
{
    fn register(&self, registry: &mut Registry) -> Result<(), StoreError> {
        self(registry);
        Ok(())
    }
}
