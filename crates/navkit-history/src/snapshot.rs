//! Published history state.

use serde::Serialize;

use crate::location::NormalizedUrl;
use crate::mode::{DEFAULT_MODE, InteractionMode};

/// Immutable view of a [`NavigationHistory`](crate::NavigationHistory) at
/// one revision.
///
/// Every field reflects the same completed operation; a snapshot never
/// shows half of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySnapshot {
    pub(crate) revision: u64,
    pub(crate) current: Option<NormalizedUrl>,
    pub(crate) back: Vec<NormalizedUrl>,
    pub(crate) forward: Vec<NormalizedUrl>,
    pub(crate) mode: InteractionMode,
    pub(crate) loading: bool,
    pub(crate) disabled: bool,
}

impl HistorySnapshot {
    pub(crate) fn initial(disabled: bool) -> Self {
        Self {
            revision: 0,
            current: None,
            back: Vec::new(),
            forward: Vec::new(),
            mode: DEFAULT_MODE,
            loading: false,
            disabled,
        }
    }

    /// Number of changes published before this snapshot was taken.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current location, if anything has been visited.
    #[inline]
    pub fn url(&self) -> Option<&NormalizedUrl> {
        self.current.as_ref()
    }

    /// Back stack, most recent last.
    pub fn back_stack(&self) -> &[NormalizedUrl] {
        &self.back
    }

    /// Forward stack, next page last.
    pub fn forward_stack(&self) -> &[NormalizedUrl] {
        &self.forward
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_interaction_mode(&self) -> bool {
        self.mode.is_interaction()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Compare everything except the revision counter.
    pub(crate) fn same_state(&self, other: &Self) -> bool {
        self.current == other.current
            && self.back == other.back
            && self.forward == other.forward
            && self.mode == other.mode
            && self.loading == other.loading
            && self.disabled == other.disabled
    }
}
