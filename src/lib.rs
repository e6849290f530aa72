//! Undoable: undo/redo history for event-driven state stores
//!
//! Undoable keeps a linear `{past, present, future}` history over a chosen
//! projection of a store's state. The history logic is a pure core; the
//! store integration is a thin shell around it.
//!
//! # Core Concepts
//!
//! - **Paths**: the top-level keys a history follows (empty means all)
//! - **Projection**: the state restricted to those keys
//! - **HistoryRecord**: checkpoints of past and undone projections
//! - **History**: one configured instance with its store module and
//!   scoped undo/redo actions
//!
//! # Example
//!
//! ```rust
//! use undoable::history::History;
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
//! let history = History::full();
//! let mut store = StoreBuilder::new()
//!     .module(counter)
//!     .module(history.module())
//!     .build()
//!     .unwrap();
//!
//! store.dispatch("inc");
//! store.dispatch("inc");
//! store.dispatch(history.undo());
//!
//! assert_eq!(
//!     store.to_value(),
//!     json!({
//!         "count": 1,
//!         "undoable": {
//!             "past": [{"count": 0}],
//!             "present": {"count": 1},
//!             "future": [{"count": 2}]
//!         }
//!     })
//! );
//! ```

pub mod core;
pub mod history;
pub mod store;

// Re-export commonly used types
pub use crate::core::{HistoryRecord, Paths};
pub use history::{create_history, ConfigError, History, HistoryConfig};
pub use store::{ActionId, Store, StoreBuilder, Update};
