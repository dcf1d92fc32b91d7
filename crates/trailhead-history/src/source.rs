// File: trailhead-history/src/source.rs
// Purpose: Location sources the history store navigates against

use tracing::{debug, trace};

use crate::location::{Entry, State};
use crate::SourceError;

/// Provider of the current location and push/replace/pop capabilities
///
/// `push_state`/`replace_state` are the preferred navigation path and may
/// fail; `assign`/`replace` change the location directly, cannot fail, and
/// are what the store falls back to when they do. A source that can keep
/// state across a direct change stores `state` there too.
pub trait LocationSource {
    /// Pathname and query string the source points at
    fn location(&self) -> Entry;

    /// State stored with the current entry
    fn state(&self) -> Option<State>;

    /// Adds an entry after the current one
    fn push_state(&mut self, state: State, uri: &str) -> Result<(), SourceError>;

    /// Overwrites the current entry
    fn replace_state(&mut self, state: State, uri: &str) -> Result<(), SourceError>;

    /// Moves to `uri`, adding an entry
    fn assign(&mut self, state: State, uri: &str);

    /// Moves to `uri`, overwriting the current entry
    fn replace(&mut self, state: State, uri: &str);

    /// Moves back (`delta < 0`) or forward through the entries
    fn go(&mut self, delta: isize) -> Result<(), SourceError>;
}

/// In-memory history stack for tests and non-browser environments
///
/// Entries only ever grow: pushing after going back appends at the end instead
/// of discarding the forward entries.
///
/// # Examples
///
/// ```
/// use trailhead_history::{LocationSource, MemorySource, State};
///
/// let mut source = MemorySource::new("/");
/// source.push_state(State::new(), "/dash?tab=1").unwrap();
///
/// assert_eq!(source.index(), 1);
/// assert_eq!(source.location().pathname, "/dash");
/// assert_eq!(source.location().search, "tab=1");
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    entries: Vec<Entry>,
    states: Vec<Option<State>>,
    index: usize,
    push_limit: Option<usize>,
    state_changes: usize,
}

impl MemorySource {
    /// Creates a source with a single entry at `initial` (may carry a query)
    pub fn new(initial: &str) -> Self {
        MemorySource {
            entries: vec![Entry::from_uri(initial)],
            states: vec![None],
            index: 0,
            push_limit: None,
            state_changes: 0,
        }
    }

    /// Makes `push_state`/`replace_state` fail once `limit` calls succeeded
    ///
    /// Some browsers start throwing after ~100 history calls; this lets the
    /// store's fallback path be exercised.
    pub fn with_push_limit(mut self, limit: usize) -> Self {
        self.push_limit = Some(limit);
        self
    }

    /// Every entry, oldest first
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Cursor into [`entries`](Self::entries)
    pub fn index(&self) -> usize {
        self.index
    }

    fn count_state_change(&mut self) -> Result<(), SourceError> {
        if let Some(limit) = self.push_limit {
            if self.state_changes >= limit {
                return Err(SourceError::QuotaExceeded { limit });
            }
        }
        self.state_changes += 1;
        Ok(())
    }

    fn push_entry(&mut self, uri: &str, state: Option<State>) {
        self.entries.push(Entry::from_uri(uri));
        self.states.push(state);
        self.index = self.entries.len() - 1;
        trace!(uri, index = self.index, "pushed entry");
    }

    fn replace_entry(&mut self, uri: &str, state: Option<State>) {
        self.entries[self.index] = Entry::from_uri(uri);
        self.states[self.index] = state;
        trace!(uri, index = self.index, "replaced entry");
    }
}

impl LocationSource for MemorySource {
    fn location(&self) -> Entry {
        self.entries[self.index].clone()
    }

    fn state(&self) -> Option<State> {
        self.states[self.index].clone()
    }

    fn push_state(&mut self, state: State, uri: &str) -> Result<(), SourceError> {
        self.count_state_change()?;
        self.push_entry(uri, Some(state));
        Ok(())
    }

    fn replace_state(&mut self, state: State, uri: &str) -> Result<(), SourceError> {
        self.count_state_change()?;
        self.replace_entry(uri, Some(state));
        Ok(())
    }

    fn assign(&mut self, state: State, uri: &str) {
        self.push_entry(uri, Some(state));
    }

    fn replace(&mut self, state: State, uri: &str) {
        self.replace_entry(uri, Some(state));
    }

    fn go(&mut self, delta: isize) -> Result<(), SourceError> {
        let target = self
            .index
            .checked_add_signed(delta)
            .filter(|target| *target < self.entries.len())
            .ok_or(SourceError::OutOfRange {
                index: self.index,
                delta,
            })?;

        self.index = target;
        Ok(())
    }
}

/// Fixed location for server-side rendering
///
/// Navigation is ignored: the server renders exactly the URL it was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSource {
    entry: Entry,
}

impl ServerSource {
    pub fn new(url: &str) -> Self {
        ServerSource {
            entry: Entry::from_uri(url),
        }
    }
}

impl LocationSource for ServerSource {
    fn location(&self) -> Entry {
        self.entry.clone()
    }

    fn state(&self) -> Option<State> {
        None
    }

    fn push_state(&mut self, _state: State, uri: &str) -> Result<(), SourceError> {
        debug!(uri, "server location ignores navigation");
        Ok(())
    }

    fn replace_state(&mut self, _state: State, uri: &str) -> Result<(), SourceError> {
        debug!(uri, "server location ignores navigation");
        Ok(())
    }

    fn assign(&mut self, _state: State, _uri: &str) {}

    fn replace(&mut self, _state: State, _uri: &str) {}

    fn go(&mut self, _delta: isize) -> Result<(), SourceError> {
        Err(SourceError::Unsupported { operation: "go" })
    }
}

/// Source used when the environment provides none
///
/// There is no browser history to wrap, so this is an in-memory stack at `/`.
pub fn default_source() -> MemorySource {
    MemorySource::new("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_appends_and_moves_cursor() {
        let mut source = MemorySource::new("/");
        source.push_state(State::new(), "/a").unwrap();
        source.push_state(State::new(), "/b").unwrap();

        assert_eq!(source.index(), 2);
        assert_eq!(source.entries().len(), 3);
        assert_eq!(source.location().pathname, "/b");
    }

    #[test]
    fn test_replace_overwrites_current() {
        let mut source = MemorySource::new("/");
        source.push_state(State::new(), "/a").unwrap();
        source.replace_state(State::new(), "/b?x=1").unwrap();

        assert_eq!(source.index(), 1);
        assert_eq!(
            source.entries(),
            &[Entry::from_uri("/"), Entry::from_uri("/b?x=1")]
        );
    }

    #[test]
    fn test_push_after_go_back_keeps_forward_entries() {
        let mut source = MemorySource::new("/");
        source.push_state(State::new(), "/a").unwrap();
        source.go(-1).unwrap();
        source.push_state(State::new(), "/b").unwrap();

        let paths: Vec<&str> = source.entries().iter().map(|e| e.pathname.as_str()).collect();
        assert_eq!(paths, vec!["/", "/a", "/b"]);
        assert_eq!(source.index(), 2);
    }

    #[test]
    fn test_states_follow_entries() {
        let mut state = State::new();
        state.insert("n".into(), 1.into());

        let mut source = MemorySource::new("/");
        source.push_state(state.clone(), "/a").unwrap();
        assert_eq!(source.state(), Some(state));

        source.go(-1).unwrap();
        assert_eq!(source.state(), None);
    }

    #[test]
    fn test_go_out_of_range() {
        let mut source = MemorySource::new("/");
        assert_eq!(
            source.go(-1),
            Err(SourceError::OutOfRange { index: 0, delta: -1 })
        );
        assert_eq!(
            source.go(1),
            Err(SourceError::OutOfRange { index: 0, delta: 1 })
        );
        assert_eq!(source.index(), 0);
    }

    #[test]
    fn test_push_limit() {
        let mut source = MemorySource::new("/").with_push_limit(1);
        source.push_state(State::new(), "/a").unwrap();
        assert_eq!(
            source.replace_state(State::new(), "/b"),
            Err(SourceError::QuotaExceeded { limit: 1 })
        );

        // Direct changes are not limited and keep their state
        let mut state = State::new();
        state.insert("key".into(), "direct".into());
        source.assign(state.clone(), "/c");
        assert_eq!(source.location().pathname, "/c");
        assert_eq!(source.state(), Some(state));
    }

    #[test]
    fn test_server_source_is_fixed() {
        let mut source = ServerSource::new("/users/7?tab=posts");
        source.push_state(State::new(), "/elsewhere").unwrap();
        source.assign(State::new(), "/elsewhere");

        assert_eq!(source.location(), Entry::from_uri("/users/7?tab=posts"));
        assert_eq!(
            source.go(-1),
            Err(SourceError::Unsupported { operation: "go" })
        );
    }

    #[test]
    fn test_default_source_starts_at_root() {
        let source = default_source();
        assert_eq!(source.location(), Entry::from_uri("/"));
        assert_eq!(source.index(), 0);
    }
}
