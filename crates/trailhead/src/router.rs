// File: src/router.rs
// Purpose: Router instance tying a route table to a history store

use std::cell::Cell;

use tracing::debug;
use trailhead_history::{
    HistoryStore, LocationSource, MemorySource, NavigateOptions, Transition,
};
use trailhead_router::path::resolve_directory;
use trailhead_router::{LinkState, Outcome, RouteDef, RouteError, RouteTable};

use crate::config::Config;

/// A route table and the history it renders against
///
/// The UI layer calls [`render`](Self::render) whenever the history notifies
/// it, renders the outcome, then calls [`commit`](Self::commit).
///
/// # Examples
///
/// ```
/// use trailhead::{Outcome, Router, RouteDef};
/// use trailhead_history::{HistoryStore, MemorySource, NavigateOptions};
///
/// let router = Router::new(HistoryStore::new(MemorySource::new("/")), "/")
///     .with_route(RouteDef::path("/", "home"))?
///     .with_route(RouteDef::path("/users/:id", "user"))?;
///
/// let _transition = router.navigate("/users/7", NavigateOptions::default());
/// match router.render() {
///     Outcome::Render(m) => assert_eq!(m.params["id"], "7"),
///     other => panic!("unexpected {other:?}"),
/// }
/// router.commit();
/// # Ok::<(), trailhead::RouteError>(())
/// ```
pub struct Router<T, S> {
    table: RouteTable<T>,
    history: HistoryStore<S>,
    first_render: Cell<bool>,
}

impl<T> Router<T, MemorySource> {
    /// Router over an in-memory history described by `config`
    pub fn from_config(config: &Config) -> Self {
        Router::new(
            HistoryStore::new(config.history.memory_source()),
            &config.routing.base_path,
        )
    }
}

impl<T, S: LocationSource> Router<T, S> {
    /// Creates a router with no routes yet
    pub fn new(history: HistoryStore<S>, base_path: &str) -> Self {
        Router {
            table: RouteTable::new(base_path),
            history,
            first_render: Cell::new(true),
        }
    }

    /// Registers a route (functional builder)
    pub fn with_route(mut self, def: RouteDef<T>) -> Result<Self, RouteError> {
        self.add_route(def)?;
        Ok(self)
    }

    /// Registers a route
    pub fn add_route(&mut self, def: RouteDef<T>) -> Result<(), RouteError> {
        self.table.add_route(def).map(|_| ())
    }

    pub fn table(&self) -> &RouteTable<T> {
        &self.table
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    /// True until the first [`commit`](Self::commit)
    ///
    /// The UI layer uses this to leave focus alone on the initial render.
    pub fn is_first_render(&self) -> bool {
        self.first_render.get()
    }

    /// Decides what to render for the current location
    ///
    /// A redirect is followed right away by replacing the current entry; the
    /// redirect outcome is still returned so the caller renders nothing for
    /// this pass.
    pub fn render(&self) -> Outcome<'_, T> {
        let location = self.history.current_location();
        let outcome = self.table.outcome(&location.pathname);

        if let Outcome::Redirect(request) = &outcome {
            debug!(from = %location.pathname, to = %request.uri, "following redirect");
            // Settled by the commit of the render this navigation triggers
            let _ = self
                .history
                .navigate(&request.uri, NavigateOptions::replace());
        }

        outcome
    }

    /// Navigates to `to`
    pub fn navigate(&self, to: &str, options: NavigateOptions) -> Transition {
        self.history.navigate(to, options)
    }

    /// Navigates to `to`, relative to a matched route's `uri`
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead::Router;
    /// use trailhead_history::{HistoryStore, MemorySource, NavigateOptions};
    ///
    /// let router: Router<(), _> = Router::new(HistoryStore::new(MemorySource::new("/")), "/");
    /// let _transition = router.navigate_from("settings", "/users/7", NavigateOptions::default());
    /// assert_eq!(router.history().current_location().pathname, "/users/7/settings");
    /// ```
    pub fn navigate_from(&self, to: &str, base_uri: &str, options: NavigateOptions) -> Transition {
        let target = resolve_directory(to, base_uri);
        self.history.navigate(&target, options)
    }

    /// Signals that the last render was committed
    pub fn commit(&self) {
        self.first_render.set(false);
        self.history.on_transition_complete();
    }

    /// Link state for `to`, relative to a matched route's `uri`
    pub fn link(&self, to: &str, base_uri: &str) -> LinkState {
        let location = self.history.current_location();
        LinkState::new(to, base_uri, &location.pathname)
    }
}
