//! Change notification.
//!
//! Subscribers are called once per effective operation, after every field
//! written by that operation has been committed.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::snapshot::HistorySnapshot;

/// Operation that produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// `go` moved to a new location. Loaders should fetch the new URL.
    Navigated,
    /// `back` moved one entry back.
    Back,
    /// `forward` moved one entry forward.
    Forward,
    /// The interaction mode changed.
    ModeChanged,
    /// A collaborator changed the `loading` or `disabled` flag.
    FlagsChanged,
}

impl ChangeKind {
    /// Whether the current location changed.
    pub fn moves_location(self) -> bool {
        matches!(self, Self::Navigated | Self::Back | Self::Forward)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Navigated => "navigated",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::ModeChanged => "mode_changed",
            Self::FlagsChanged => "flags_changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One published change.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryChange {
    pub kind: ChangeKind,
    pub snapshot: Arc<HistorySnapshot>,
}

/// Receives [`HistoryChange`]s.
///
/// Any `FnMut(&HistoryChange)` is an observer.
pub trait HistoryObserver {
    fn on_change(&mut self, change: &HistoryChange);
}

impl<F> HistoryObserver for F
where
    F: FnMut(&HistoryChange),
{
    fn on_change(&mut self, change: &HistoryChange) {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn HistoryObserver>)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, observer: Box<dyn HistoryObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, change: &HistoryChange) {
        for (_, observer) in &mut self.entries {
            observer.on_change(change);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
