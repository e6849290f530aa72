//! Typed action identifiers.

use crate::history::HistoryActionId;
use std::borrow::Cow;
use std::fmt;

/// Identifier a store dispatches and handlers are registered under.
///
/// Application actions are plain names. History actions carry the scope of
/// the instance that minted them, so two instances never answer each
/// other's undo or redo.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionId {
    /// An application-defined action such as `"counter/add"`
    Named(Cow<'static, str>),

    /// An undo, redo or clear request for one history instance
    History(HistoryActionId),
}

impl ActionId {
    /// Create a named action.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    /// The history request behind this id, if any.
    pub fn as_history(&self) -> Option<&HistoryActionId> {
        match self {
            Self::History(id) => Some(id),
            Self::Named(_) => None,
        }
    }
}

impl From<&'static str> for ActionId {
    fn from(name: &'static str) -> Self {
        Self::Named(Cow::Borrowed(name))
    }
}

impl From<String> for ActionId {
    fn from(name: String) -> Self {
        Self::Named(Cow::Owned(name))
    }
}

impl From<HistoryActionId> for ActionId {
    fn from(id: HistoryActionId) -> Self {
        Self::History(id)
    }
}

impl From<&ActionId> for ActionId {
    fn from(id: &ActionId) -> Self {
        id.clone()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::History(id) => write!(f, "{id}"),
        }
    }
}
