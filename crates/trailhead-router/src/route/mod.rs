//! Route definitions, registration and parameter substitution
//!
//! A [`Route`] is either a path pattern or the default (fallback) route, so a
//! route lacking both cannot be represented. [`RouteDef`] is the looser shape a
//! UI layer hands over while walking its own component tree; turning it into a
//! `Route` is where every configuration mistake is caught.

use std::collections::HashMap;

use tracing::debug;

use crate::path::{segmentize, strip_slashes};
use crate::RouteError;

pub mod pattern;

pub use pattern::Segment;

/// What a route matches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// A pattern such as `/users/:id` or `files/*`
    Path(String),
    /// Fallback used only when no path route matches
    Default,
}

/// A registered route with its caller-supplied payload
///
/// The payload is opaque to the router and handed back untouched on match.
/// The pattern and redirect target are only set through the constructors, so
/// every route has passed the reserved-name and redirect checks:
///
/// ```compile_fail
/// use trailhead_router::{Route, RouteKind};
///
/// let route = Route {
///     kind: RouteKind::Path("/files/:path".to_string()),
///     redirect_to: None,
///     payload: (),
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route<T> {
    pub(crate) kind: RouteKind,
    /// May contain the same `:name` segments as the pattern
    pub(crate) redirect_to: Option<String>,
    /// Caller-supplied value
    pub payload: T,
}

impl<T> Route<T> {
    /// Creates a path route
    ///
    /// Fails when a dynamic segment uses a reserved name (`uri`, `path`).
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead_router::Route;
    ///
    /// let route = Route::new("/users/:id", "user").unwrap();
    /// assert_eq!(route.path(), Some("/users/:id"));
    ///
    /// assert!(Route::new("/files/:path", "files").is_err());
    /// ```
    pub fn new(path: impl Into<String>, payload: T) -> Result<Self, RouteError> {
        let path = path.into();
        check_reserved(&path)?;

        Ok(Route {
            kind: RouteKind::Path(path),
            redirect_to: None,
            payload,
        })
    }

    /// Creates the default (fallback) route
    pub fn fallback(payload: T) -> Self {
        Route {
            kind: RouteKind::Default,
            redirect_to: None,
            payload,
        }
    }

    /// Creates a redirect route from `from` to `to`
    ///
    /// Both paths must declare the same set of dynamic segments so every
    /// placeholder in `to` can be filled from the match.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead_router::Route;
    ///
    /// let route = Route::redirect("/blog/:slug", "/articles/:slug", ()).unwrap();
    /// assert!(route.is_redirect());
    ///
    /// assert!(Route::redirect("/blog/:slug", "/articles/:id", ()).is_err());
    /// ```
    pub fn redirect(
        from: impl Into<String>,
        to: impl Into<String>,
        payload: T,
    ) -> Result<Self, RouteError> {
        let (from, to) = (from.into(), to.into());
        if !validate_redirect(&from, &to) {
            return Err(RouteError::RedirectMismatch { from, to });
        }

        let mut route = Route::new(from, payload)?;
        route.redirect_to = Some(to);
        Ok(route)
    }

    /// Builds a route from a definition, relative to `basepath`
    ///
    /// - a default definition becomes the default route
    /// - a redirect needs both ends and matching dynamic segments
    /// - `/` maps onto the basepath itself, other paths are joined to it
    /// - definitions with nested children get a trailing `/*` so they keep
    ///   matching while a child router handles the rest
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead_router::{Route, RouteDef};
    ///
    /// let route = Route::from_def("/dash", RouteDef::path("reports", ()).nested()).unwrap();
    /// assert_eq!(route.path(), Some("dash/reports/*"));
    ///
    /// let route = Route::from_def("/dash", RouteDef::path("/", ())).unwrap();
    /// assert_eq!(route.path(), Some("/dash"));
    /// ```
    pub fn from_def(basepath: &str, def: RouteDef<T>) -> Result<Self, RouteError> {
        let RouteDef {
            path,
            default,
            redirect,
            nested,
            payload,
        } = def;

        if default {
            return Ok(Route::fallback(payload));
        }

        let (element_path, redirect_to) = match redirect {
            Some(RedirectDef {
                from: Some(from),
                to: Some(to),
            }) => {
                if !validate_redirect(&from, &to) {
                    return Err(RouteError::RedirectMismatch { from, to });
                }
                (from, Some(to))
            }
            Some(RedirectDef { from, to }) => {
                return Err(RouteError::IncompleteRedirect {
                    from: from.unwrap_or_default(),
                    to: to.unwrap_or_default(),
                });
            }
            None => (path.ok_or(RouteError::MissingPath)?, None),
        };

        let joined = if element_path == "/" {
            basepath.to_string()
        } else {
            format!("{}/{}", strip_slashes(basepath), strip_slashes(&element_path))
        };
        let full_path = if nested {
            format!("{}/*", strip_slashes(&joined))
        } else {
            joined
        };

        debug!(path = %full_path, redirect = ?redirect_to, "registered route");

        let mut route = Route::new(full_path, payload)?;
        route.redirect_to = redirect_to;
        Ok(route)
    }

    /// Pattern or default marker
    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    /// Redirect target, if matching this route redirects
    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    /// The pattern, or `None` for the default route
    pub fn path(&self) -> Option<&str> {
        match &self.kind {
            RouteKind::Path(path) => Some(path),
            RouteKind::Default => None,
        }
    }

    /// Whether this is the fallback route
    pub fn is_default(&self) -> bool {
        self.kind == RouteKind::Default
    }

    /// Whether matching this route should redirect instead of render
    pub fn is_redirect(&self) -> bool {
        self.redirect_to.is_some()
    }

    /// Ranking score, default routes score `0`
    pub fn score(&self) -> i32 {
        self.path().map(pattern::score).unwrap_or(0)
    }

    /// Basepath handed to a router nested under this route
    ///
    /// The trailing wildcard added for nested children is removed; the default
    /// route has no path of its own and keeps the parent's basepath.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead_router::Route;
    ///
    /// let route = Route::new("dash/*", ()).unwrap();
    /// assert_eq!(route.child_basepath("/"), "dash/");
    /// assert_eq!(Route::fallback(()).child_basepath("/dash"), "/dash");
    /// ```
    pub fn child_basepath<'a>(&'a self, parent: &'a str) -> &'a str {
        match self.path() {
            Some(path) => path.strip_suffix('*').unwrap_or(path),
            None => parent,
        }
    }
}

/// A route as described by the UI layer, before validation
///
/// # Examples
///
/// ```
/// use trailhead_router::{RouteDef, RouteError, Route};
///
/// let err = Route::from_def("/", RouteDef::new("orphan")).unwrap_err();
/// assert_eq!(err, RouteError::MissingPath);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDef<T> {
    /// Pattern relative to the enclosing router
    pub path: Option<String>,
    /// Marks the fallback route
    pub default: bool,
    /// Redirect endpoints
    pub redirect: Option<RedirectDef>,
    /// Whether the route has child routes of its own
    pub nested: bool,
    /// Caller-supplied value
    pub payload: T,
}

/// Redirect endpoints as given by the UI layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectDef {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl<T> RouteDef<T> {
    /// Empty definition carrying only a payload
    pub fn new(payload: T) -> Self {
        RouteDef {
            path: None,
            default: false,
            redirect: None,
            nested: false,
            payload,
        }
    }

    /// Path route definition
    pub fn path(path: impl Into<String>, payload: T) -> Self {
        RouteDef::new(payload).with_path(path)
    }

    /// Default route definition
    pub fn fallback(payload: T) -> Self {
        RouteDef {
            default: true,
            ..RouteDef::new(payload)
        }
    }

    /// Redirect definition
    pub fn redirect(from: impl Into<String>, to: impl Into<String>, payload: T) -> Self {
        RouteDef::new(payload)
            .redirect_from(from)
            .redirect_to(to)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn redirect_from(mut self, from: impl Into<String>) -> Self {
        self.redirect.get_or_insert_with(RedirectDef::default).from = Some(from.into());
        self
    }

    pub fn redirect_to(mut self, to: impl Into<String>) -> Self {
        self.redirect.get_or_insert_with(RedirectDef::default).to = Some(to.into());
        self
    }

    /// Marks the route as having nested children
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }
}

fn check_reserved(path: &str) -> Result<(), RouteError> {
    match pattern::reserved_name(path) {
        Some(name) => Err(RouteError::ReservedName {
            name: name.to_string(),
            path: path.to_string(),
        }),
        None => Ok(()),
    }
}

/// Builds a concrete path by substituting params into a pattern
///
/// Static and wildcard segments are kept as-is. A dynamic segment with no
/// value in `params` is left as its placeholder.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use trailhead_router::insert_params;
///
/// let mut params = HashMap::new();
/// params.insert("id".to_string(), "42".to_string());
///
/// assert_eq!(insert_params("/users/:id", &params), "/users/42");
/// assert_eq!(insert_params("/users/:id/*", &params), "/users/42/*");
/// ```
pub fn insert_params(pattern: &str, params: &HashMap<String, String>) -> String {
    let segments = segmentize(pattern)
        .into_iter()
        .map(|segment| match Segment::classify(segment) {
            Segment::Dynamic(name) => params.get(name).map(String::as_str).unwrap_or(segment),
            _ => segment,
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("/{segments}")
}

/// Checks that two paths declare the same dynamic segments
///
/// Order does not matter; names (and how often each appears) do.
///
/// # Examples
///
/// ```
/// use trailhead_router::validate_redirect;
///
/// assert!(validate_redirect("/users/:id", "/accounts/:id"));
/// assert!(!validate_redirect("/users/:id", "/accounts/:slug"));
/// ```
pub fn validate_redirect(from: &str, to: &str) -> bool {
    fn sorted_dynamic(path: &str) -> Vec<&str> {
        let mut segments: Vec<&str> = segmentize(path)
            .into_iter()
            .filter(|segment| Segment::classify(segment).is_dynamic())
            .collect();
        segments.sort_unstable();
        segments
    }

    sorted_dynamic(from) == sorted_dynamic(to)
}
