//! Route tables and typed match outcomes

use tracing::debug;

use crate::matcher::{pick, RouteMatch};
use crate::route::{insert_params, Route, RouteDef};
use crate::RouteError;

/// Request to move to another URI instead of rendering the matched route
///
/// Produced when a redirect route matches; the caller is expected to replace
/// the current history entry with `uri`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRequest {
    pub uri: String,
}

/// What the UI layer should do for a URI
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'r, T> {
    /// Render the matched route
    Render(RouteMatch<'r, T>),
    /// Navigate elsewhere (replacing the current entry) and render nothing
    Redirect(RedirectRequest),
    /// Nothing matched and there is no default route
    NotFound,
}

impl<'r, T> Outcome<'r, T> {
    /// The match to render, if any
    pub fn into_match(self) -> Option<RouteMatch<'r, T>> {
        match self {
            Outcome::Render(m) => Some(m),
            _ => None,
        }
    }
}

/// The routes registered under one router, validated up front
///
/// # Examples
///
/// ```
/// use trailhead_router::{Outcome, RouteDef, RouteTable};
///
/// let table = RouteTable::new("/")
///     .with_route(RouteDef::path("/", "home"))?
///     .with_route(RouteDef::path("/dash", "dash"))?
///     .with_route(RouteDef::redirect("/old/:id", "/new/:id", "old"))?;
///
/// match table.outcome("/old/9") {
///     Outcome::Redirect(request) => assert_eq!(request.uri, "/new/9"),
///     other => panic!("unexpected {other:?}"),
/// }
/// # Ok::<(), trailhead_router::RouteError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    basepath: String,
    routes: Vec<Route<T>>,
}

impl<T> RouteTable<T> {
    /// Creates an empty table whose routes are relative to `basepath`
    pub fn new(basepath: impl Into<String>) -> Self {
        RouteTable {
            basepath: basepath.into(),
            routes: Vec::new(),
        }
    }

    /// Registers a route definition (functional builder)
    ///
    /// Registration order is kept and breaks ties between equally ranked
    /// routes.
    pub fn with_route(mut self, def: RouteDef<T>) -> Result<Self, RouteError> {
        self.add_route(def)?;
        Ok(self)
    }

    /// Registers several definitions, failing on the first invalid one
    pub fn with_routes<I>(mut self, defs: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = RouteDef<T>>,
    {
        for def in defs {
            self.add_route(def)?;
        }
        Ok(self)
    }

    /// Registers a route definition
    pub fn add_route(&mut self, def: RouteDef<T>) -> Result<&Route<T>, RouteError> {
        let route = Route::from_def(&self.basepath, def)?;
        self.routes.push(route);
        Ok(&self.routes[self.routes.len() - 1])
    }

    /// Table for a router nested under `parent`
    pub fn nested(parent: &RouteMatch<'_, T>, basepath: &str) -> Self {
        RouteTable::new(parent.child_basepath(basepath))
    }

    pub fn basepath(&self) -> &str {
        &self.basepath
    }

    /// Routes in registration order
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// Best route for `uri`
    pub fn pick(&self, uri: &str) -> Option<RouteMatch<'_, T>> {
        pick(&self.routes, uri)
    }

    /// Decides whether `uri` renders, redirects or is not found
    pub fn outcome(&self, uri: &str) -> Outcome<'_, T> {
        let Some(route_match) = self.pick(uri) else {
            debug!(uri, "no route and no default route");
            return Outcome::NotFound;
        };

        match route_match.route.redirect_to() {
            Some(to) => {
                let target = insert_params(to, &route_match.params);
                debug!(from = uri, to = %target, "redirect requested");
                Outcome::Redirect(RedirectRequest { uri: target })
            }
            None => Outcome::Render(route_match),
        }
    }
}
