// File: trailhead-history/src/location.rs
// Purpose: Location snapshots and the events listeners receive

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use trailhead_router::path::{add_query, split_query};

use crate::LocationSource;

/// Opaque state attached to a history entry
pub type State = Map<String, Value>;

/// Key of a location that was never navigated to
pub const INITIAL_KEY: &str = "initial";

/// State field holding the per-navigation key
pub const KEY_FIELD: &str = "key";

/// Where a source currently points, without state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub pathname: String,
    /// Query string without the leading `?`
    pub search: String,
}

impl Entry {
    /// Splits a URI such as `/users?page=2` into an entry
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead_history::Entry;
    ///
    /// let entry = Entry::from_uri("/users?page=2");
    /// assert_eq!(entry.pathname, "/users");
    /// assert_eq!(entry.search, "page=2");
    /// ```
    pub fn from_uri(uri: &str) -> Self {
        let (pathname, search) = split_query(uri);
        Entry {
            pathname: pathname.to_string(),
            search: search.unwrap_or_default().to_string(),
        }
    }

    /// Pathname plus query string
    pub fn href(&self) -> String {
        add_query(&self.pathname, Some(&self.search))
    }
}

/// Immutable snapshot of the current location
///
/// A new snapshot is taken after every navigation; `key` comes from the
/// entry's state and changes on every navigation, so two snapshots can be
/// compared by key alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub state: Option<State>,
    pub key: String,
}

impl Location {
    /// Reads the current location out of a source
    pub fn read<S: LocationSource + ?Sized>(source: &S) -> Self {
        let Entry { pathname, search } = source.location();
        let state = source.state();
        let key = state
            .as_ref()
            .and_then(|state| state.get(KEY_FIELD))
            .and_then(Value::as_str)
            .unwrap_or(INITIAL_KEY)
            .to_string();

        Location {
            pathname,
            search,
            state,
            key,
        }
    }

    /// Pathname plus query string
    pub fn href(&self) -> String {
        add_query(&self.pathname, Some(&self.search))
    }
}

/// How the location changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Programmatic navigation
    Push,
    /// Back/forward navigation from the source
    Pop,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Push => write!(f, "PUSH"),
            Action::Pop => write!(f, "POP"),
        }
    }
}

/// What listeners receive on every committed change
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEvent {
    pub location: Location,
    pub action: Action,
}

/// Options for [`HistoryStore::navigate`](crate::HistoryStore::navigate)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateOptions {
    /// Extra state stored with the entry; a fresh `key` is merged in
    pub state: Option<State>,
    /// Replace the current entry instead of pushing
    pub replace: bool,
}

impl NavigateOptions {
    /// Options that replace the current entry
    pub fn replace() -> Self {
        NavigateOptions {
            replace: true,
            ..NavigateOptions::default()
        }
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }
}
