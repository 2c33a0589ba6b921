//! Navigation history for a single browsing session.
//!
//! This crate tracks a current location, the back/forward stacks around it,
//! and an interaction mode that UI collaborators use to decide how to treat
//! input. Every effective operation is applied as one transaction and
//! published to subscribers as a single immutable snapshot.
//!
//! # Features
//!
//! - **Browser-style history** - `go` clears forward history, `back` and
//!   `forward` move entries between the stacks
//! - **Silent rejection** of empty or malformed URLs
//! - **Atomic change events** with one snapshot per operation
//! - **TOML configuration** for capacity and URL cleaning rules
//!
//! # Example
//!
//! ```
//! use navkit_history::{InteractionMode, NavigationHistory};
//!
//! let mut history = NavigationHistory::new();
//! history.go("example.com");
//! history.go("https://example.com/docs");
//! assert!(history.back());
//! assert_eq!(history.url().map(|u| u.as_str()), Some("http://example.com/"));
//!
//! history.set_annotation_mode();
//! assert_eq!(history.mode(), InteractionMode::Annotation);
//! assert!(history.is_interaction_mode());
//! ```
//!
//! # Architecture
//!
//! - `history.rs` - `NavigationHistory`, the state machine
//! - `snapshot.rs` - published immutable state and derived views
//! - `observer.rs` - subscriber registry and change events
//! - `location.rs` - URL cleaning (`normalize`, `UrlNormalizer`)
//! - `mode.rs` - interaction modes
//! - `config.rs` - persisted configuration
//! - `error.rs` - error types with user-friendly messages

mod config;
mod error;
mod history;
mod location;
mod mode;
mod observer;
mod snapshot;

pub use config::{HistoryConfig, HistorySettings};
pub use error::{NavkitError, Result, UrlRejection};
pub use history::NavigationHistory;
pub use location::{NormalizeConfig, NormalizedUrl, UrlCleaner, UrlNormalizer, normalize};
pub use mode::{DEFAULT_MODE, InteractionMode};
pub use observer::{ChangeKind, HistoryChange, HistoryObserver, SubscriptionId};
pub use snapshot::HistorySnapshot;
