//! The navigation history service.

use std::fmt;
use std::sync::Arc;

use crate::config::HistoryConfig;
use crate::location::{NormalizedUrl, UrlCleaner, UrlNormalizer};
use crate::mode::InteractionMode;
use crate::observer::{ChangeKind, HistoryChange, HistoryObserver, SubscriptionId, Subscribers};
use crate::snapshot::HistorySnapshot;

/// Back/forward history and interaction mode for one browsing session.
///
/// All mutations go through [`go`](Self::go), [`back`](Self::back),
/// [`forward`](Self::forward), [`reload`](Self::reload), the mode
/// operations and the collaborator flag setters. Each one either leaves the
/// state untouched and returns `false`, or commits every field it writes at
/// once, publishes a single [`HistoryChange`] and returns `true`.
///
/// No operation fails. Input that does not normalize is ignored.
pub struct NavigationHistory {
    /// Last committed state. Replaced, never mutated in place.
    state: Arc<HistorySnapshot>,
    cleaner: Box<dyn UrlCleaner>,
    capacity: Option<usize>,
    subscribers: Subscribers,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHistory {
    /// Create a history with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&HistoryConfig::default())
    }

    /// Create a history honouring `config`.
    pub fn with_config(config: &HistoryConfig) -> Self {
        Self {
            state: Arc::new(HistorySnapshot::initial(config.history.start_disabled)),
            cleaner: Box::new(UrlNormalizer::new(config.normalize.clone())),
            capacity: config.history.max_entries,
            subscribers: Subscribers::default(),
        }
    }

    /// Replace the URL cleaner.
    #[must_use]
    pub fn with_cleaner(mut self, cleaner: impl UrlCleaner + 'static) -> Self {
        self.cleaner = Box::new(cleaner);
        self
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to `raw`.
    ///
    /// Ignored when `raw` does not normalize or equals the current location.
    /// Otherwise the current location moves onto the back stack and the
    /// forward stack is discarded.
    pub fn go(&mut self, raw: &str) -> bool {
        let Some(url) = self.cleaner.clean(raw) else {
            tracing::debug!(input = raw, "ignoring navigation to unusable URL");
            return false;
        };

        if self.state.current.as_ref() == Some(&url) {
            tracing::debug!(url = %url, "already at location");
            return false;
        }

        let capacity = self.capacity;
        self.commit(ChangeKind::Navigated, |draft| {
            if let Some(previous) = draft.current.replace(url) {
                draft.back.push(previous);
            }
            draft.forward.clear();
            if let Some(capacity) = capacity {
                let excess = draft.back.len().saturating_sub(capacity);
                draft.back.drain(..excess);
            }
        })
    }

    /// Step back one entry. Ignored when the back stack is empty.
    pub fn back(&mut self) -> bool {
        if self.state.back.is_empty() {
            return false;
        }

        self.commit(ChangeKind::Back, |draft| {
            let Some(target) = draft.back.pop() else {
                return;
            };
            if let Some(current) = draft.current.replace(target) {
                draft.forward.push(current);
            }
        })
    }

    /// Step forward one entry. Ignored when the forward stack is empty.
    pub fn forward(&mut self) -> bool {
        if self.state.forward.is_empty() {
            return false;
        }

        self.commit(ChangeKind::Forward, |draft| {
            let Some(target) = draft.forward.pop() else {
                return;
            };
            if let Some(current) = draft.current.replace(target) {
                draft.back.push(current);
            }
        })
    }

    /// Navigate to the current location again.
    ///
    /// This goes through [`go`](Self::go) with the current URL, which is
    /// always the same location, so it never changes anything. Loaders that
    /// need a refresh must trigger it themselves.
    pub fn reload(&mut self) -> bool {
        match self.state.current.clone() {
            Some(url) => self.go(url.as_str()),
            None => false,
        }
    }

    /// Assign the location. Same as [`go`](Self::go).
    pub fn set_url(&mut self, raw: &str) -> bool {
        self.go(raw)
    }

    // ========================================================================
    // Interaction mode
    // ========================================================================

    /// Enter annotation mode. Returns `false` if already annotating.
    pub fn set_annotation_mode(&mut self) -> bool {
        self.commit(ChangeKind::ModeChanged, |draft| {
            draft.mode = InteractionMode::Annotation;
        })
    }

    /// Leave annotation mode. Ignored unless currently annotating.
    pub fn clear_annotation_mode(&mut self) -> bool {
        if self.state.mode != InteractionMode::Annotation {
            return false;
        }

        self.commit(ChangeKind::ModeChanged, |draft| {
            draft.mode = InteractionMode::Navigation;
        })
    }

    // ========================================================================
    // Collaborator flags
    // ========================================================================

    /// Set by the page loader while a document is loading.
    pub fn set_loading(&mut self, loading: bool) -> bool {
        self.commit(ChangeKind::FlagsChanged, |draft| draft.loading = loading)
    }

    /// Set by the host while the browser must not accept input.
    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        self.commit(ChangeKind::FlagsChanged, |draft| draft.disabled = disabled)
    }

    // ========================================================================
    // Read access
    // ========================================================================

    #[inline]
    pub fn url(&self) -> Option<&NormalizedUrl> {
        self.state.url()
    }

    pub fn back_stack(&self) -> &[NormalizedUrl] {
        self.state.back_stack()
    }

    pub fn forward_stack(&self) -> &[NormalizedUrl] {
        self.state.forward_stack()
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.mode()
    }

    /// Whether UI collaborators should capture page input instead of
    /// following it.
    pub fn is_interaction_mode(&self) -> bool {
        self.state.is_interaction_mode()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.is_disabled()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    /// Number of changes published so far.
    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    /// Configured combined size limit of the back and forward stacks.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// The current state as one immutable value.
    ///
    /// Cheap: returns the snapshot that was published with the last change.
    pub fn snapshot(&self) -> Arc<HistorySnapshot> {
        Arc::clone(&self.state)
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register an observer for future changes.
    pub fn subscribe(&mut self, observer: impl HistoryObserver + 'static) -> SubscriptionId {
        self.subscribers.add(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Apply `apply` to a draft of the state and publish it as one change.
    ///
    /// Nothing is committed or published when the draft ends up equal to the
    /// current state.
    fn commit(&mut self, kind: ChangeKind, apply: impl FnOnce(&mut HistorySnapshot)) -> bool {
        let mut draft = HistorySnapshot::clone(&self.state);
        apply(&mut draft);

        if draft.same_state(&self.state) {
            return false;
        }

        draft.revision += 1;
        self.state = Arc::new(draft);

        tracing::trace!(
            revision = self.state.revision,
            kind = %kind,
            url = ?self.state.current.as_ref().map(NormalizedUrl::as_str),
            back = self.state.back.len(),
            forward = self.state.forward.len(),
            "committed history change"
        );

        let change = HistoryChange {
            kind,
            snapshot: Arc::clone(&self.state),
        };
        self.subscribers.notify(&change);
        true
    }
}

impl fmt::Debug for NavigationHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationHistory")
            .field("state", &self.state)
            .field("capacity", &self.capacity)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::normalize;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn urls(history: &NavigationHistory) -> (Option<String>, Vec<String>, Vec<String>) {
        (
            history.url().map(ToString::to_string),
            history.back_stack().iter().map(ToString::to_string).collect(),
            history.forward_stack().iter().map(ToString::to_string).collect(),
        )
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = NavigationHistory::new();
        assert!(history.url().is_none());
        assert!(history.back_stack().is_empty());
        assert!(history.forward_stack().is_empty());
        assert_eq!(history.mode(), InteractionMode::Navigation);
        assert!(!history.is_loading());
        assert!(history.is_disabled());
        assert_eq!(history.revision(), 0);
    }

    #[test]
    fn test_browse_scenario() {
        let mut history = NavigationHistory::new();

        assert!(history.go("http://a"));
        assert_eq!(urls(&history), (Some("http://a/".into()), vec![], vec![]));

        assert!(history.go("http://b"));
        assert_eq!(
            urls(&history),
            (Some("http://b/".into()), strings(&["http://a/"]), vec![])
        );

        assert!(history.back());
        assert_eq!(
            urls(&history),
            (Some("http://a/".into()), vec![], strings(&["http://b/"]))
        );

        assert!(history.go("http://c"));
        assert_eq!(
            urls(&history),
            (Some("http://c/".into()), strings(&["http://a/"]), vec![])
        );
    }

    #[test]
    fn test_go_same_url_is_noop() {
        let mut history = NavigationHistory::new();
        history.go("example.com");
        let before = history.snapshot();

        assert!(!history.go("http://EXAMPLE.com/"));
        assert!(!history.go("  example.com "));
        assert_eq!(history.snapshot(), before);
    }

    #[test]
    fn test_go_invalid_url_is_noop() {
        let mut history = NavigationHistory::new();
        history.go("example.com");
        let before = history.snapshot();

        assert!(!history.go(""));
        assert!(!history.go("   "));
        assert!(!history.go("ftp://example.com"));
        assert_eq!(history.snapshot(), before);
    }

    #[test]
    fn test_go_does_not_change_mode() {
        let mut history = NavigationHistory::new();
        history.set_annotation_mode();
        history.go("example.com");
        assert_eq!(history.mode(), InteractionMode::Annotation);
    }

    #[test]
    fn test_back_and_forward_on_empty_stacks() {
        let mut history = NavigationHistory::new();
        assert!(!history.back());
        assert!(!history.forward());

        history.go("example.com");
        assert!(!history.back());
        assert!(!history.forward());
        assert_eq!(history.revision(), 1);
    }

    #[test]
    fn test_forward_restores_location() {
        let mut history = NavigationHistory::new();
        history.go("a.example");
        history.go("b.example");
        history.go("c.example");
        history.back();
        history.back();

        assert!(history.forward());
        assert_eq!(
            urls(&history),
            (
                Some("http://b.example/".into()),
                strings(&["http://a.example/"]),
                strings(&["http://c.example/"])
            )
        );
        assert!(history.can_go_back());
        assert!(history.can_go_forward());
    }

    #[test]
    fn test_reload_is_noop() {
        let mut history = NavigationHistory::new();
        assert!(!history.reload());

        history.go("example.com");
        let before = history.snapshot();
        assert!(!history.reload());
        assert_eq!(history.snapshot(), before);
    }

    #[test]
    fn test_set_url_routes_through_go() {
        let mut history = NavigationHistory::new();
        assert!(history.set_url("example.com"));
        assert_eq!(history.url(), normalize("example.com").as_ref());
        assert!(!history.set_url("example.com"));
    }

    #[test]
    fn test_annotation_mode_transitions() {
        let mut history = NavigationHistory::new();

        assert!(!history.clear_annotation_mode());
        assert_eq!(history.mode(), InteractionMode::Navigation);

        assert!(history.set_annotation_mode());
        assert!(history.is_interaction_mode());
        assert!(!history.set_annotation_mode());
        assert_eq!(history.mode(), InteractionMode::Annotation);

        assert!(history.clear_annotation_mode());
        assert!(!history.is_interaction_mode());
    }

    #[test]
    fn test_flags() {
        let mut history = NavigationHistory::new();
        assert!(history.set_disabled(false));
        assert!(!history.set_disabled(false));
        assert!(history.set_loading(true));
        assert!(history.is_loading());
        assert!(!history.is_disabled());
    }

    #[test]
    fn test_one_event_per_operation() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut history = NavigationHistory::new();
        let sink = Rc::clone(&events);
        history.subscribe(move |change: &HistoryChange| {
            sink.borrow_mut().push(change.clone());
        });

        history.go("a.example");
        history.go("b.example");
        history.go("b.example");
        history.back();
        history.back();
        history.forward();
        history.set_annotation_mode();
        history.clear_annotation_mode();
        history.clear_annotation_mode();

        let kinds: Vec<ChangeKind> = events.borrow().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Navigated,
                ChangeKind::Navigated,
                ChangeKind::Back,
                ChangeKind::Forward,
                ChangeKind::ModeChanged,
                ChangeKind::ModeChanged,
            ]
        );

        let revisions: Vec<u64> = events
            .borrow()
            .iter()
            .map(|c| c.snapshot.revision())
            .collect();
        assert_eq!(revisions, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_event_snapshot_is_complete() {
        let seen = Rc::new(RefCell::new(None));
        let mut history = NavigationHistory::new();
        history.go("a.example");
        history.go("b.example");
        history.back();

        let sink = Rc::clone(&seen);
        history.subscribe(move |change: &HistoryChange| {
            *sink.borrow_mut() = Some(Arc::clone(&change.snapshot));
        });
        history.go("c.example");

        let snapshot = seen.borrow_mut().take().unwrap();
        assert_eq!(snapshot.url().unwrap(), "http://c.example/");
        assert!(snapshot.forward_stack().is_empty());
        assert_eq!(snapshot.back_stack(), history.back_stack());
        assert_eq!(snapshot, history.snapshot());
    }

    #[test]
    fn test_unsubscribe_stops_events() {
        let count = Rc::new(RefCell::new(0));
        let mut history = NavigationHistory::new();
        let sink = Rc::clone(&count);
        let id = history.subscribe(move |_: &HistoryChange| *sink.borrow_mut() += 1);

        history.go("a.example");
        assert!(history.unsubscribe(id));
        history.go("b.example");

        assert_eq!(*count.borrow(), 1);
        assert_eq!(history.subscriber_count(), 0);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut config = HistoryConfig::default();
        config.history.max_entries = Some(2);
        let mut history = NavigationHistory::with_config(&config);

        for host in ["a", "b", "c", "d"] {
            history.go(&format!("{host}.example"));
        }
        assert_eq!(
            urls(&history),
            (
                Some("http://d.example/".into()),
                strings(&["http://b.example/", "http://c.example/"]),
                vec![]
            )
        );

        history.back();
        history.back();
        assert!(!history.back());
        assert_eq!(history.forward_stack().len(), 2);
    }

    #[test]
    fn test_capacity_counts_both_stacks() {
        let mut config = HistoryConfig::default();
        config.history.max_entries = Some(2);
        let mut history = NavigationHistory::with_config(&config);
        let total = |h: &NavigationHistory| h.back_stack().len() + h.forward_stack().len();

        history.go("a.example");
        history.go("b.example");
        history.go("c.example");
        assert_eq!(total(&history), 2);

        assert!(history.back());
        assert_eq!(total(&history), 2);
        assert!(history.go("d.example"));
        assert_eq!(
            urls(&history),
            (
                Some("http://d.example/".into()),
                strings(&["http://a.example/", "http://b.example/"]),
                vec![]
            )
        );
    }

    #[test]
    fn test_mode_change_keeps_location_and_stacks() {
        let mut history = NavigationHistory::new();
        history.go("a.example");
        history.go("b.example");
        history.back();
        let before = history.snapshot();

        assert!(!history.clear_annotation_mode());
        assert_eq!(history.snapshot(), before.clone());

        assert!(history.set_annotation_mode());
        assert_eq!(history.url(), before.url());
        assert_eq!(history.back_stack(), before.back_stack());
        assert_eq!(history.forward_stack(), before.forward_stack());
    }

    #[test]
    fn test_custom_cleaner() {
        let mut history = NavigationHistory::new().with_cleaner(|raw: &str| {
            normalize(raw).filter(|url| url.as_str().starts_with("https://"))
        });

        assert!(!history.go("http://example.com"));
        assert!(history.go("https://example.com"));
    }

    #[test]
    fn test_config_start_enabled() {
        let mut config = HistoryConfig::default();
        config.history.start_disabled = false;
        assert!(!NavigationHistory::with_config(&config).is_disabled());
    }
}
