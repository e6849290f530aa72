//! Linear undo/redo history over projections.
//!
//! A [`HistoryRecord`] keeps two stacks of checkpoints around a `present`
//! pivot. Every transition consumes the record and returns the next one,
//! so a stored record is never mutated in place.

use super::projection::{equal, Checkpoint, FullState, Projection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;

/// The `{past, present, future}` triple stored under an instance's key.
///
/// Both stacks keep their top at the end: `past` is ordered oldest first,
/// `future` ends with the most recently undone checkpoint.
///
/// # Example
///
/// ```rust
/// use undoable::core::HistoryRecord;
/// use serde_json::{json, Map};
///
/// fn checkpoint(a: i64) -> Map<String, serde_json::Value> {
///     let mut map = Map::new();
///     map.insert("a".to_string(), json!(a));
///     map
/// }
///
/// let record = HistoryRecord::init(checkpoint(0));
/// let (record, changed) = record.on_change(checkpoint(1), None);
/// assert!(changed);
///
/// let (record, patch) = record.undo();
/// assert_eq!(patch, Some(checkpoint(0)));
/// assert!(record.can_redo());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    past: VecDeque<Checkpoint>,
    present: Checkpoint,
    future: VecDeque<Checkpoint>,
}

#[allow(clippy::len_without_is_empty)]
impl HistoryRecord {
    /// Seed a record with the first projection and empty stacks.
    pub fn init(present: Projection) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
        }
    }

    /// Record `next` if it differs from `present`.
    ///
    /// A genuine change pushes the old `present` onto `past` and clears
    /// `future`. With a `limit`, the oldest `past` entries beyond it are
    /// dropped. Returns the record and whether it changed.
    pub fn on_change(mut self, next: Projection, limit: Option<usize>) -> (Self, bool) {
        if equal(&next, &self.present) {
            return (self, false);
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push_back(previous);
        if let Some(limit) = limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
        self.future.clear();
        (self, true)
    }

    /// Step back one checkpoint.
    ///
    /// Returns the checkpoint to merge into the full state, or `None` when
    /// `past` is empty and the record is unchanged.
    pub fn undo(mut self) -> (Self, Option<Checkpoint>) {
        let Some(prev) = self.past.pop_back() else {
            return (self, None);
        };
        let current = std::mem::replace(&mut self.present, prev.clone());
        self.future.push_back(current);
        (self, Some(prev))
    }

    /// Step forward one checkpoint.
    ///
    /// Returns the checkpoint to merge into the full state, or `None` when
    /// `future` is empty and the record is unchanged.
    pub fn redo(mut self) -> (Self, Option<Checkpoint>) {
        let Some(next) = self.future.pop_back() else {
            return (self, None);
        };
        let current = std::mem::replace(&mut self.present, next.clone());
        self.past.push_back(current);
        (self, Some(next))
    }

    /// Forget both stacks, keeping only `present`.
    pub fn clear(mut self) -> (Self, bool) {
        if self.past.is_empty() && self.future.is_empty() {
            return (self, false);
        }
        self.past.clear();
        self.future.clear();
        (self, true)
    }

    pub fn past(&self) -> &VecDeque<Checkpoint> {
        &self.past
    }

    pub fn present(&self) -> &Checkpoint {
        &self.present
    }

    pub fn future(&self) -> &VecDeque<Checkpoint> {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of checkpoints held, `present` included.
    pub fn len(&self) -> usize {
        self.past.len() + 1 + self.future.len()
    }

    /// Every checkpoint in time order: `past`, `present`, then `future` reversed.
    pub fn timeline(&self) -> Vec<&Checkpoint> {
        self.past
            .iter()
            .chain(std::iter::once(&self.present))
            .chain(self.future.iter().rev())
            .collect()
    }

    /// Read the record stored under `key`, if present and well formed.
    pub fn from_state(state: &FullState, key: &str) -> Option<Self> {
        state
            .get(key)
            .and_then(|value| Self::deserialize(value).ok())
    }

    /// The record in its visible `{past, present, future}` layout.
    pub fn to_value(&self) -> Value {
        let checkpoints = |stack: &VecDeque<Checkpoint>| -> Vec<Value> {
            stack.iter().cloned().map(Value::Object).collect()
        };
        let mut map = serde_json::Map::new();
        map.insert("past".to_string(), Value::Array(checkpoints(&self.past)));
        map.insert("present".to_string(), Value::Object(self.present.clone()));
        map.insert("future".to_string(), Value::Array(checkpoints(&self.future)));
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cp(value: Value) -> Checkpoint {
        match value {
            Value::Object(map) => map,
            _ => panic!("checkpoint must be an object"),
        }
    }

    fn counted(n: i64) -> HistoryRecord {
        let mut record = HistoryRecord::init(cp(json!({"a": 0})));
        for i in 1..=n {
            record = record.on_change(cp(json!({"a": i})), None).0;
        }
        record
    }

    #[test]
    fn init_has_empty_stacks() {
        let record = HistoryRecord::init(cp(json!({"a": 0})));
        assert!(!record.can_undo());
        assert!(!record.can_redo());
        assert_eq!(record.len(), 1);
        assert_eq!(
            record.to_value(),
            json!({"past": [], "present": {"a": 0}, "future": []})
        );
    }

    #[test]
    fn change_pushes_present_onto_past() {
        let record = counted(3);
        assert_eq!(
            record.to_value(),
            json!({
                "past": [{"a": 0}, {"a": 1}, {"a": 2}],
                "present": {"a": 3},
                "future": []
            })
        );
    }

    #[test]
    fn equal_projection_is_a_noop() {
        let record = counted(1);
        let (next, changed) = record.clone().on_change(cp(json!({"a": 1})), None);
        assert!(!changed);
        assert_eq!(next, record);
    }

    #[test]
    fn undo_moves_present_to_future() {
        let (record, patch) = counted(3).undo();
        assert_eq!(patch, Some(cp(json!({"a": 2}))));
        assert_eq!(
            record.to_value(),
            json!({
                "past": [{"a": 0}, {"a": 1}],
                "present": {"a": 2},
                "future": [{"a": 3}]
            })
        );
    }

    #[test]
    fn undo_on_empty_past_is_noop() {
        let record = HistoryRecord::init(cp(json!({"a": 0})));
        let (next, patch) = record.clone().undo();
        assert!(patch.is_none());
        assert_eq!(next, record);
    }

    #[test]
    fn redo_moves_future_to_past() {
        let (record, _) = counted(3).undo();
        let (record, _) = record.undo();
        let (record, patch) = record.redo();
        assert_eq!(patch, Some(cp(json!({"a": 2}))));
        assert_eq!(
            record.to_value(),
            json!({
                "past": [{"a": 0}, {"a": 1}],
                "present": {"a": 2},
                "future": [{"a": 3}]
            })
        );
    }

    #[test]
    fn redo_on_empty_future_is_noop() {
        let record = counted(2);
        let (next, patch) = record.clone().redo();
        assert!(patch.is_none());
        assert_eq!(next, record);
    }

    #[test]
    fn change_after_undo_clears_future() {
        let (record, _) = counted(3).undo();
        let (record, _) = record.undo();
        let (record, changed) = record.on_change(cp(json!({"a": 10})), None);
        assert!(changed);
        assert!(!record.can_redo());
        assert_eq!(record.past().len(), 2);
    }

    #[test]
    fn limit_drops_oldest_past_entries() {
        let mut record = HistoryRecord::init(cp(json!({"a": 0})));
        for i in 1..=5 {
            record = record.on_change(cp(json!({"a": i})), Some(2)).0;
        }
        assert_eq!(
            record.to_value(),
            json!({"past": [{"a": 3}, {"a": 4}], "present": {"a": 5}, "future": []})
        );
    }

    #[test]
    fn clear_keeps_present_only() {
        let (record, _) = counted(3).undo();
        let (record, cleared) = record.clear();
        assert!(cleared);
        assert_eq!(
            record.to_value(),
            json!({"past": [], "present": {"a": 2}, "future": []})
        );
        let (_, cleared_again) = record.clear();
        assert!(!cleared_again);
    }

    #[test]
    fn repeated_undo_stacks_future_newest_first() {
        let mut record = counted(3);
        for _ in 0..3 {
            record = record.undo().0;
        }
        assert_eq!(
            record.to_value(),
            json!({
                "past": [],
                "present": {"a": 0},
                "future": [{"a": 3}, {"a": 2}, {"a": 1}]
            })
        );

        let (record, patch) = record.redo();
        assert_eq!(patch, Some(cp(json!({"a": 1}))));
        assert_eq!(
            record.to_value(),
            json!({
                "past": [{"a": 0}],
                "present": {"a": 1},
                "future": [{"a": 3}, {"a": 2}]
            })
        );
    }

    #[test]
    fn timeline_is_in_time_order() {
        let (record, _) = counted(3).undo();
        let (record, _) = record.undo();
        let values: Vec<Value> = record
            .timeline()
            .into_iter()
            .map(|cp| cp["a"].clone())
            .collect();
        assert_eq!(values, vec![json!(0), json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn record_reads_back_from_state() {
        let record = counted(2);
        let mut state = FullState::new();
        state.insert("undoable".to_string(), record.to_value());
        assert_eq!(HistoryRecord::from_state(&state, "undoable"), Some(record));
        assert_eq!(HistoryRecord::from_state(&state, "missing"), None);
    }

    #[test]
    fn malformed_record_reads_as_none() {
        let mut state = FullState::new();
        state.insert("undoable".to_string(), json!({"past": 1}));
        assert_eq!(HistoryRecord::from_state(&state, "undoable"), None);
    }

    #[test]
    fn to_value_matches_serde_layout() {
        let record = counted(2);
        assert_eq!(serde_json::to_value(&record).unwrap(), record.to_value());
    }
}
