//! Binds a history record to one storage key inside the full state.
//!
//! The tracker reads the record from state, runs the pure transition and
//! turns the result into a store [`Update`].

use super::action::Scope;
use crate::core::{project, FullState, HistoryRecord, Paths, Projection};
use crate::store::{ActionId, ReservedKeys, Update};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Fixed settings of one history instance.
#[derive(Debug)]
pub(crate) struct Instance {
    pub(crate) paths: Paths,
    pub(crate) limit: Option<usize>,
    pub(crate) scope: Scope,
}

impl Instance {
    pub(crate) fn key(&self) -> &str {
        self.scope.key()
    }
}

/// An instance registered on a store.
pub(crate) struct Tracker {
    instance: Arc<Instance>,
    reserved: ReservedKeys,
}

impl Tracker {
    pub(crate) fn new(instance: Arc<Instance>, reserved: ReservedKeys) -> Self {
        Self { instance, reserved }
    }

    fn key(&self) -> &str {
        self.instance.key()
    }

    /// Tracked projection of `state`.
    ///
    /// When tracking the whole state, history records of every instance are
    /// left out so undo never rewrites another instance's record.
    pub(crate) fn project(&self, state: &FullState) -> Projection {
        let mut projection = project(state, &self.instance.paths);
        if self.instance.paths.is_all() {
            projection.remove(self.key());
            for key in self.reserved.iter() {
                projection.remove(key);
            }
        }
        projection
    }

    fn load(&self, state: &FullState) -> Result<HistoryRecord, HistoryRecord> {
        HistoryRecord::from_state(state, self.key()).ok_or_else(|| {
            warn!(key = %self.key(), "history record missing or malformed, reseeding");
            HistoryRecord::init(self.project(state))
        })
    }

    fn store(&self, record: &HistoryRecord) -> Update {
        Update::patch([(self.key(), record.to_value())])
    }

    /// Restore `checkpoint` and store `record`.
    ///
    /// Tracked keys live now but absent from `checkpoint` are removed, so
    /// the tracked projection afterwards equals `checkpoint` exactly.
    fn replay(
        &self,
        state: &FullState,
        record: &HistoryRecord,
        checkpoint: Projection,
    ) -> Update {
        let remove: Vec<String> = self
            .project(state)
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| !checkpoint.contains_key(key))
            .collect();
        let mut set = checkpoint;
        set.insert(self.key().to_string(), record.to_value());
        if remove.is_empty() {
            Update::Patch(set)
        } else {
            trace!(
                key = %self.key(),
                removed = remove.len(),
                "dropping keys absent from checkpoint"
            );
            Update::Edit { set, remove }
        }
    }

    /// Seed the record when the store initializes.
    pub(crate) fn init(&self, state: &FullState) -> Update {
        let record = HistoryRecord::init(self.project(state));
        debug!(key = %self.key(), tracked = record.present().len(), "history initialized");
        self.store(&record)
    }

    /// Record a checkpoint after any action other than this instance's own.
    pub(crate) fn observe(&self, state: &FullState, action: &ActionId) -> Update {
        if action
            .as_history()
            .is_some_and(|id| id.scope() == &self.instance.scope)
        {
            return Update::NoChange;
        }
        let record = match self.load(state) {
            Ok(record) => record,
            Err(seeded) => return self.store(&seeded),
        };

        let (record, changed) = record.on_change(self.project(state), self.instance.limit);
        if !changed {
            trace!(key = %self.key(), %action, "tracked state unchanged");
            return Update::NoChange;
        }
        debug!(
            key = %self.key(),
            %action,
            past = record.past().len(),
            "checkpoint recorded"
        );
        self.store(&record)
    }

    pub(crate) fn undo(&self, state: &FullState) -> Update {
        let record = match self.load(state) {
            Ok(record) => record,
            Err(seeded) => return self.store(&seeded),
        };
        match record.undo() {
            (_, None) => {
                trace!(key = %self.key(), "nothing to undo");
                Update::NoChange
            }
            (record, Some(checkpoint)) => {
                debug!(
                    key = %self.key(),
                    past = record.past().len(),
                    future = record.future().len(),
                    "undo"
                );
                self.replay(state, &record, checkpoint)
            }
        }
    }

    pub(crate) fn redo(&self, state: &FullState) -> Update {
        let record = match self.load(state) {
            Ok(record) => record,
            Err(seeded) => return self.store(&seeded),
        };
        match record.redo() {
            (_, None) => {
                trace!(key = %self.key(), "nothing to redo");
                Update::NoChange
            }
            (record, Some(checkpoint)) => {
                debug!(
                    key = %self.key(),
                    past = record.past().len(),
                    future = record.future().len(),
                    "redo"
                );
                self.replay(state, &record, checkpoint)
            }
        }
    }

    pub(crate) fn clear(&self, state: &FullState) -> Update {
        let record = match self.load(state) {
            Ok(record) => record,
            Err(seeded) => return self.store(&seeded),
        };
        match record.clear() {
            (_, false) => Update::NoChange,
            (record, true) => {
                debug!(key = %self.key(), "history cleared");
                self.store(&record)
            }
        }
    }
}
