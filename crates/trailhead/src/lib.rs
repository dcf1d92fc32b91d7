//! # Trailhead
//!
//! Ranked route matching and navigation history for client-side routers.
//!
//! - [`trailhead_router`]: patterns, ranking, `pick`, `resolve`, redirects
//! - [`trailhead_history`]: locations, subscriptions, transitions
//! - [`Router`]: one route table rendering against one history store
//! - [`Config`]: `trailhead.toml`
//!
//! ## Render Loop
//!
//! ```text
//! history notifies ──▶ Router::render ──▶ Outcome ──▶ UI renders ──▶ Router::commit
//! ```
//!
//! ## Example
//!
//! ```
//! use trailhead::{Config, Outcome, Router, RouteDef};
//!
//! let router = Router::from_config(&Config::default())
//!     .with_route(RouteDef::path("/", "home"))?
//!     .with_route(RouteDef::fallback("not-found"))?;
//!
//! assert!(matches!(router.render(), Outcome::Render(m) if m.route.payload == "home"));
//! # Ok::<(), trailhead::RouteError>(())
//! ```

pub mod config;
pub mod router;

pub use config::Config;
pub use router::Router;

pub use trailhead_history::{
    Action, HistoryEvent, HistoryStore, Location, MemorySource, NavigateOptions, ServerSource,
    Subscription, Transition,
};
pub use trailhead_router::{
    Click, LinkState, Outcome, RedirectRequest, RouteDef, RouteError, RouteMatch, RouteTable,
};

pub use trailhead_history;
pub use trailhead_router;
