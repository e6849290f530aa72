//! Action identifiers scoped to one history instance.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// The requests a history instance answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HistoryAction {
    Undo,
    Redo,
    Clear,
}

impl HistoryAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Clear => "clear",
        }
    }
}

/// Identity of one history instance: its storage key plus a
/// process-unique id minted at creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scope {
    key: Arc<str>,
    instance: Uuid,
}

impl Scope {
    pub(crate) fn new(key: &str) -> Self {
        Self {
            key: Arc::from(key),
            instance: Uuid::new_v4(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn instance(&self) -> Uuid {
        self.instance
    }
}

/// An undo, redo or clear request bound to one [`Scope`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HistoryActionId {
    kind: HistoryAction,
    scope: Scope,
}

impl HistoryActionId {
    pub(crate) fn new(kind: HistoryAction, scope: Scope) -> Self {
        Self { kind, scope }
    }

    pub fn kind(&self) -> HistoryAction {
        self.kind
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl fmt::Display for HistoryActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope.key(), self.kind.name())
    }
}
