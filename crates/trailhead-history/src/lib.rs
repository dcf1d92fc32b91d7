//! # Trailhead History
//!
//! Navigation history for client-side routers:
//! - Immutable [`Location`] snapshots, keyed per navigation
//! - Subscriptions notified on every push and pop
//! - A [`Transition`] handshake that settles once the consumer has rendered
//! - Pluggable [`LocationSource`]s: an in-memory stack and a fixed server URL
//!
//! ## Navigation
//!
//! ```text
//! navigate ──▶ source push/replace ──▶ snapshot ──▶ notify (PUSH)
//!                                                       │
//! Transition resolves ◀── on_transition_complete ◀──────┘ (consumer renders)
//! ```
//!
//! A navigation issued while another is still transitioning replaces the
//! current entry instead of pushing a new one.
//!
//! ## Example
//!
//! ```
//! use trailhead_history::{HistoryStore, MemorySource, NavigateOptions};
//!
//! # futures::executor::block_on(async {
//! let store = HistoryStore::new(MemorySource::new("/"));
//!
//! let transition = store.navigate("/dash", NavigateOptions::default());
//! assert_eq!(store.current_location().pathname, "/dash");
//!
//! store.on_transition_complete();
//! transition.await.unwrap();
//! # });
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod location;
mod source;
mod store;
mod transition;

pub use error::{HistoryError, SourceError};
pub use location::{
    Action, Entry, HistoryEvent, Location, NavigateOptions, State, INITIAL_KEY, KEY_FIELD,
};
pub use source::{default_source, LocationSource, MemorySource, ServerSource};
pub use store::{HistoryStore, Subscription};
pub use transition::Transition;
