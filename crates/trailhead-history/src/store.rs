// File: trailhead-history/src/store.rs
// Purpose: Current location, subscriptions and the navigation handshake

use std::cell::{Ref, RefCell};
use std::mem;
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::location::{Action, HistoryEvent, Location, NavigateOptions, KEY_FIELD};
use crate::source::LocationSource;
use crate::transition::Transition;
use crate::HistoryError;

type Listener = Rc<dyn Fn(&HistoryEvent)>;

/// Listeners in registration order
#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl ListenerSet {
    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}

struct Inner<S> {
    source: S,
    location: Location,
    transitioning: bool,
    pending: Vec<oneshot::Sender<()>>,
}

/// Handle returned by [`HistoryStore::subscribe`]
///
/// Dropping it keeps the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    listeners: Weak<RefCell<ListenerSet>>,
    id: u64,
}

impl Subscription {
    /// Removes exactly this listener (idempotent)
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if listeners.borrow_mut().remove(self.id) {
                debug!(id = self.id, "listener unsubscribed");
            }
        }
    }
}

/// Tracks the current location of a [`LocationSource`] and notifies
/// subscribers of every change
///
/// The handle is cheap to clone; clones share the same state. No borrow is
/// held while listeners run, so a listener may call back into the store.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use trailhead_history::{default_source, HistoryStore, NavigateOptions};
///
/// let store = HistoryStore::new(default_source());
/// let calls = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&calls);
/// store.subscribe(move |_| counter.set(counter.get() + 1));
///
/// let _transition = store.navigate("/dash", NavigateOptions::default());
/// assert_eq!(store.current_location().pathname, "/dash");
/// assert!(store.is_transitioning());
/// assert_eq!(calls.get(), 1);
///
/// store.on_transition_complete();
/// assert!(!store.is_transitioning());
/// ```
pub struct HistoryStore<S> {
    inner: Rc<RefCell<Inner<S>>>,
    listeners: Rc<RefCell<ListenerSet>>,
}

impl<S> Clone for HistoryStore<S> {
    fn clone(&self) -> Self {
        HistoryStore {
            inner: Rc::clone(&self.inner),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<S: LocationSource> HistoryStore<S> {
    /// Wraps a source, reading its current location
    pub fn new(source: S) -> Self {
        let location = Location::read(&source);
        debug!(pathname = %location.pathname, "history store created");

        HistoryStore {
            inner: Rc::new(RefCell::new(Inner {
                source,
                location,
                transitioning: false,
                pending: Vec::new(),
            })),
            listeners: Rc::new(RefCell::new(ListenerSet::default())),
        }
    }

    /// Snapshot of the current location
    pub fn current_location(&self) -> Location {
        self.inner.borrow().location.clone()
    }

    /// True from a navigation until the consumer signals completion
    pub fn is_transitioning(&self) -> bool {
        self.inner.borrow().transitioning
    }

    /// Borrows the underlying source
    ///
    /// The borrow must be released before navigating.
    pub fn source(&self) -> Ref<'_, S> {
        Ref::map(self.inner.borrow(), |inner| &inner.source)
    }

    /// Registers a listener, called on every committed change
    ///
    /// Listeners are called in registration order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&HistoryEvent) + 'static,
    {
        let id = self.listeners.borrow_mut().insert(Rc::new(listener));
        debug!(id, "listener subscribed");

        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Navigates to `to` and notifies listeners with [`Action::Push`]
    ///
    /// The entry is replaced instead of pushed when a previous navigation is
    /// still transitioning or `options.replace` is set. If the source refuses
    /// the state change, the location is changed directly instead, with the
    /// same state and key.
    ///
    /// The returned [`Transition`] settles on the next
    /// [`on_transition_complete`](Self::on_transition_complete).
    pub fn navigate(&self, to: &str, options: NavigateOptions) -> Transition {
        let NavigateOptions { state, replace } = options;

        let mut state = state.unwrap_or_default();
        state.insert(
            KEY_FIELD.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );

        let (sender, receiver) = oneshot::channel();
        let event = {
            let mut inner = self.inner.borrow_mut();
            let replace_entry = inner.transitioning || replace;

            let result = if replace_entry {
                inner.source.replace_state(state.clone(), to)
            } else {
                inner.source.push_state(state.clone(), to)
            };

            if let Err(err) = result {
                warn!(to, %err, "history state change failed, changing location directly");
                if replace {
                    inner.source.replace(state, to);
                } else {
                    inner.source.assign(state, to);
                }
            }

            inner.location = Location::read(&inner.source);
            inner.transitioning = true;
            inner.pending.push(sender);

            debug!(
                to,
                key = %inner.location.key,
                replace = replace_entry,
                "navigated"
            );

            HistoryEvent {
                location: inner.location.clone(),
                action: Action::Push,
            }
        };

        self.notify(&event);
        Transition::new(receiver)
    }

    /// Signals that the consumer finished rendering the last navigation
    ///
    /// Clears the transitioning flag and settles every pending
    /// [`Transition`]. Does nothing when no navigation is pending.
    pub fn on_transition_complete(&self) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            inner.transitioning = false;
            mem::take(&mut inner.pending)
        };

        if pending.is_empty() {
            return;
        }

        debug!(count = pending.len(), "transition complete");
        for sender in pending {
            // The caller may have dropped its Transition
            let _ = sender.send(());
        }
    }

    /// Picks up a back/forward change made on the source
    ///
    /// Refreshes the location and notifies listeners with [`Action::Pop`].
    pub fn handle_pop(&self) {
        let event = {
            let mut inner = self.inner.borrow_mut();
            inner.location = Location::read(&inner.source);
            debug!(pathname = %inner.location.pathname, "popped");

            HistoryEvent {
                location: inner.location.clone(),
                action: Action::Pop,
            }
        };

        self.notify(&event);
    }

    /// Moves back or forward on the source, then handles the pop
    pub fn go(&self, delta: isize) -> Result<(), HistoryError> {
        self.inner.borrow_mut().source.go(delta)?;
        self.handle_pop();
        Ok(())
    }

    fn notify(&self, event: &HistoryEvent) {
        let listeners = self.listeners.borrow().snapshot();
        for listener in listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySource;
    use futures::FutureExt;

    #[test]
    fn test_listener_set_keeps_order() {
        let mut set = ListenerSet::default();
        let a = set.insert(Rc::new(|_: &HistoryEvent| {}));
        let b = set.insert(Rc::new(|_: &HistoryEvent| {}));

        assert_ne!(a, b);
        assert!(set.remove(a));
        assert!(!set.remove(a));
        assert_eq!(set.snapshot().len(), 1);
    }

    #[test]
    fn test_navigate_merges_key_into_state() {
        let store = HistoryStore::new(MemorySource::new("/"));
        let mut state = crate::State::new();
        state.insert("from".into(), "home".into());

        let _ = store.navigate("/a", NavigateOptions::default().with_state(state));

        let location = store.current_location();
        let stored = location.state.unwrap();
        assert_eq!(stored.get("from"), Some(&Value::from("home")));
        assert_eq!(
            stored.get(KEY_FIELD).and_then(Value::as_str),
            Some(location.key.as_str())
        );
    }

    #[test]
    fn test_keys_change_per_navigation() {
        let store = HistoryStore::new(MemorySource::new("/"));
        let initial = store.current_location().key;

        let _ = store.navigate("/a", NavigateOptions::default());
        let first = store.current_location().key;
        store.on_transition_complete();
        let _ = store.navigate("/a", NavigateOptions::default());
        let second = store.current_location().key;

        assert_eq!(initial, crate::INITIAL_KEY);
        assert_ne!(first, initial);
        assert_ne!(first, second);
    }

    #[test]
    fn test_transitioning_replaces_entry() {
        let store = HistoryStore::new(MemorySource::new("/"));
        let _ = store.navigate("/a", NavigateOptions::default());
        let _ = store.navigate("/b", NavigateOptions::default());

        assert_eq!(store.source().entries().len(), 2);
        assert_eq!(store.source().location().pathname, "/b");
    }

    #[test]
    fn test_complete_without_pending_is_noop() {
        let store = HistoryStore::new(MemorySource::new("/"));
        store.on_transition_complete();
        assert!(!store.is_transitioning());
    }

    #[test]
    fn test_transition_errors_when_store_dropped() {
        let store = HistoryStore::new(MemorySource::new("/"));
        let transition = store.navigate("/a", NavigateOptions::default());
        drop(store);

        assert_eq!(
            transition.now_or_never(),
            Some(Err(HistoryError::StoreDropped))
        );
    }
}
