//! # Trailhead Router
//!
//! Ranked path matching for client-side routers, with support for:
//! - Static segments (`/about`)
//! - Dynamic parameters (`/users/:id`)
//! - Wildcards (`/files/*`)
//! - A default route used when nothing else matches
//! - Redirect routes with parameter substitution
//!
//! ## Ranking
//!
//! Every segment of a pattern earns points, then the kind of segment adds or
//! takes away points:
//!
//! `static > dynamic > root > wildcard`
//!
//! Routes are tried best-first; routes with equal scores keep their
//! registration order. The first route whose segments all reconcile with the
//! URI wins.
//!
//! ## Relative Paths
//!
//! [`resolve`] treats a base ending in `/` as a directory and any other base
//! as a leaf; [`path::resolve_directory`] treats every base as a directory,
//! which is what nested routers and links use.
//!
//! ## Example
//!
//! ```
//! use trailhead_router::{pick, Route};
//!
//! let routes = vec![
//!     Route::new("/", "home").unwrap(),
//!     Route::new("/users/:id", "user").unwrap(),
//!     Route::fallback("not-found"),
//! ];
//!
//! let m = pick(&routes, "/users/123?tab=posts").unwrap();
//! assert_eq!(m.route.payload, "user");
//! assert_eq!(m.params.get("id"), Some(&"123".to_string()));
//!
//! let m = pick(&routes, "/nowhere").unwrap();
//! assert_eq!(m.route.payload, "not-found");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod link;
mod matcher;
pub mod path;
pub mod route;
mod table;

pub use error::RouteError;
pub use link::{Click, LinkState};
pub use matcher::{match_path, pick, rank, PathMatch, RouteMatch, WILDCARD_PARAM};
pub use path::{resolve, segmentize, strip_slashes};
pub use route::pattern::{Segment, RESERVED_NAMES};
pub use route::{insert_params, validate_redirect, RedirectDef, Route, RouteDef, RouteKind};
pub use table::{Outcome, RedirectRequest, RouteTable};
