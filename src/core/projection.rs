//! Projection of full store state onto tracked keys.
//!
//! A projection is the slice of state a history instance cares about. These
//! functions are pure: they copy values out of the full state and leave it
//! untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The complete top-level state held by a store.
pub type FullState = Map<String, Value>;

/// The subset of [`FullState`] restricted to tracked keys.
pub type Projection = Map<String, Value>;

/// A projection recorded at one point in time.
pub type Checkpoint = Projection;

/// Key prefix used when a storage key is derived from tracked paths.
pub const DEFAULT_KEY: &str = "undoable";

/// Ordered list of tracked top-level keys.
///
/// An empty list means "track the entire state".
///
/// # Example
///
/// ```rust
/// use undoable::core::Paths;
/// use undoable::paths;
///
/// let all = Paths::all();
/// assert!(all.is_all());
///
/// let some = paths!["a", "b"];
/// assert_eq!(some.derived_key(), "undoable_a_b");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paths(Vec<String>);

impl Paths {
    /// Track every key of the state.
    pub fn all() -> Self {
        Self(Vec::new())
    }

    /// Track exactly the given keys, in order.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// True when no keys were given, meaning the whole state is tracked.
    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|p| p == key)
    }

    /// Storage key used when no explicit key is configured.
    ///
    /// `"undoable"` for the whole state, `"undoable_" + paths joined by "_"`
    /// otherwise.
    pub fn derived_key(&self) -> String {
        if self.is_all() {
            DEFAULT_KEY.to_string()
        } else {
            format!("{}_{}", DEFAULT_KEY, self.0.join("_"))
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Paths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::keys(iter)
    }
}

impl<S: Into<String>> From<Vec<S>> for Paths {
    fn from(keys: Vec<S>) -> Self {
        Self::keys(keys)
    }
}

/// Extract the tracked keys from `full`.
///
/// With [`Paths::all`] this is a shallow copy of the whole state. Otherwise
/// only keys present in `full` are copied; missing keys are omitted, never
/// defaulted.
pub fn project(full: &FullState, paths: &Paths) -> Projection {
    if paths.is_all() {
        return full.clone();
    }
    paths
        .iter()
        .filter_map(|key| full.get(key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

/// Structural equality of two projections.
pub fn equal(a: &Projection, b: &Projection) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(value: Value) -> FullState {
        match value {
            Value::Object(map) => map,
            _ => panic!("test state must be an object"),
        }
    }

    #[test]
    fn empty_paths_copy_entire_state() {
        let full = state(json!({"a": 1, "b": {"c": [1, 2]}}));
        let projection = project(&full, &Paths::all());
        assert_eq!(projection, full);
    }

    #[test]
    fn paths_select_only_tracked_keys() {
        let full = state(json!({"a": 1, "b": 2, "c": 3}));
        let projection = project(&full, &Paths::keys(["a", "c"]));
        assert_eq!(Value::Object(projection), json!({"a": 1, "c": 3}));
    }

    #[test]
    fn missing_keys_are_omitted() {
        let full = state(json!({"a": 1}));
        let projection = project(&full, &Paths::keys(["a", "z"]));
        assert_eq!(projection.len(), 1);
        assert!(!projection.contains_key("z"));
    }

    #[test]
    fn projection_does_not_alias_source() {
        let mut full = state(json!({"a": [1]}));
        let projection = project(&full, &Paths::keys(["a"]));
        full.insert("a".to_string(), json!([2]));
        assert_eq!(projection["a"], json!([1]));
    }

    #[test]
    fn equal_is_structural() {
        let a = state(json!({"x": {"y": [1, 2, {"z": null}]}}));
        let b = state(json!({"x": {"y": [1, 2, {"z": null}]}}));
        let c = state(json!({"x": {"y": [1, 2]}}));
        assert!(equal(&a, &b));
        assert!(!equal(&a, &c));
    }

    #[test]
    fn derived_key_follows_paths() {
        assert_eq!(Paths::all().derived_key(), "undoable");
        assert_eq!(Paths::keys(["a"]).derived_key(), "undoable_a");
        assert_eq!(Paths::keys(["a", "b"]).derived_key(), "undoable_a_b");
    }

    #[test]
    fn paths_serialize_as_plain_array() {
        let paths = Paths::keys(["a", "b"]);
        assert_eq!(serde_json::to_value(&paths).unwrap(), json!(["a", "b"]));
    }
}
