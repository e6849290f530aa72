//! Pure history core.
//!
//! This module contains the side-effect free part of the middleware:
//! - Projection of full state onto tracked paths
//! - The `{past, present, future}` history record and its transitions
//!
//! Nothing here touches a store. The `history` module wires these
//! functions into one.

mod macros;
mod projection;
mod record;

pub use projection::{equal, project, Checkpoint, FullState, Paths, Projection, DEFAULT_KEY};
pub use record::HistoryRecord;
