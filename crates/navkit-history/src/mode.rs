//! Interaction modes.

use serde::{Deserialize, Serialize};

/// How UI collaborators should interpret input on the current page.
///
/// Transitions:
/// - `set_annotation_mode`: any mode to `Annotation`
/// - `clear_annotation_mode`: `Annotation` to `Navigation`, otherwise unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Normal browsing: clicks follow links.
    #[default]
    Navigation,

    /// Overlay workflow: clicks select page elements for annotation.
    Annotation,
}

/// Mode a new session starts in.
pub const DEFAULT_MODE: InteractionMode = InteractionMode::Navigation;

/// Modes in which page input is captured rather than navigated.
const INTERACTION_MODES: &[InteractionMode] = &[InteractionMode::Annotation];

impl InteractionMode {
    /// Whether page input is captured by the overlay in this mode.
    pub fn is_interaction(self) -> bool {
        INTERACTION_MODES.contains(&self)
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Annotation => "annotation",
        }
    }
}

impl std::fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_navigation() {
        assert_eq!(InteractionMode::default(), DEFAULT_MODE);
        assert_eq!(DEFAULT_MODE, InteractionMode::Navigation);
    }

    #[test]
    fn test_only_annotation_is_interaction() {
        assert!(!InteractionMode::Navigation.is_interaction());
        assert!(InteractionMode::Annotation.is_interaction());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&InteractionMode::Annotation).unwrap();
        assert_eq!(json, "\"annotation\"");
    }
}
