//! Ranked route matching
//!
//! Every call ranks the routes, then walks them best-first and returns the
//! first one whose segments reconcile with the URI. Nothing is cached between
//! calls, so the same input always yields the same match.

use std::borrow::Cow;
use std::collections::HashMap;
use std::slice;

use tracing::{debug, trace};

use crate::path::{segmentize, split_query};
use crate::route::{Route, RouteKind, Segment};
use crate::RouteError;

/// Key under which a wildcard stores the rest of the path
pub const WILDCARD_PARAM: &str = "*";

/// Result of matching a URI against a set of routes
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'r, T> {
    /// The winning route
    pub route: &'r Route<T>,
    /// Decoded values captured by dynamic and wildcard segments
    pub params: HashMap<String, String>,
    /// Part of the path the route consumed
    pub uri: String,
}

impl<'r, T> RouteMatch<'r, T> {
    /// Basepath for a router nested under the matched route
    pub fn child_basepath<'a>(&'a self, parent: &'a str) -> &'a str {
        self.route.child_basepath(parent)
    }
}

/// Result of matching a URI against a single pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// The pattern that matched
    pub path: String,
    /// Decoded values captured by dynamic and wildcard segments
    pub params: HashMap<String, String>,
    /// Part of the path the pattern consumed
    pub uri: String,
}

/// Sorts routes best-first
///
/// Sorting is stable, so routes with equal scores keep registration order.
///
/// # Examples
///
/// ```
/// use trailhead_router::{rank, Route};
///
/// let routes = vec![
///     Route::new("*", "wildcard").unwrap(),
///     Route::new("/", "root").unwrap(),
///     Route::new("/users/:id", "user").unwrap(),
/// ];
///
/// let order: Vec<&str> = rank(&routes).iter().map(|r| r.payload).collect();
/// assert_eq!(order, vec!["user", "root", "wildcard"]);
/// ```
pub fn rank<T>(routes: &[Route<T>]) -> Vec<&Route<T>> {
    let mut ranked: Vec<(i32, &Route<T>)> =
        routes.iter().map(|route| (route.score(), route)).collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    trace!(
        ranked = ?ranked.iter().map(|(score, route)| (route.path(), *score)).collect::<Vec<_>>(),
        "ranked routes"
    );

    ranked.into_iter().map(|(_, route)| route).collect()
}

/// Picks the best route for `uri`
///
/// The query string is ignored. When no path route matches, the default route
/// is returned with empty params and the full `uri`; with no default either,
/// the result is `None`.
///
/// # Examples
///
/// ```
/// use trailhead_router::{pick, Route};
///
/// let routes = vec![
///     Route::new("group/:groupId", "group").unwrap(),
///     Route::new("group/:groupId/user/:userId", "user").unwrap(),
/// ];
///
/// let m = pick(&routes, "/group/123/user/456").unwrap();
/// assert_eq!(m.route.payload, "user");
/// assert_eq!(m.params["groupId"], "123");
/// assert_eq!(m.params["userId"], "456");
/// assert_eq!(m.uri, "/group/123/user/456");
/// ```
pub fn pick<'r, T>(routes: &'r [Route<T>], uri: &str) -> Option<RouteMatch<'r, T>> {
    let (pathname, _) = split_query(uri);
    let uri_segments = segmentize(pathname);
    let is_root_uri = uri_segments[0].is_empty();
    let mut fallback = None;

    for route in rank(routes) {
        let path = match &route.kind {
            RouteKind::Default => {
                fallback = Some(route);
                continue;
            }
            RouteKind::Path(path) => path,
        };

        let route_segments = segmentize(path);
        if let Some((params, consumed)) = match_segments(
            &route_segments,
            &uri_segments,
            0,
            is_root_uri,
            HashMap::new(),
        ) {
            let consumed = &uri_segments[..consumed.min(uri_segments.len())];
            debug!(uri, route = %path, "matched route");

            return Some(RouteMatch {
                route,
                params,
                uri: format!("/{}", consumed.join("/")),
            });
        }
    }

    fallback.map(|route| {
        debug!(uri, "no route matched, using default route");
        RouteMatch {
            route,
            params: HashMap::new(),
            uri: uri.to_string(),
        }
    })
}

/// Matches `uri` against a single pattern
///
/// # Examples
///
/// ```
/// use trailhead_router::match_path;
///
/// let m = match_path("/files/*", "/files/a%20b/c").unwrap().unwrap();
/// assert_eq!(m.params["*"], "a b/c");
/// assert_eq!(m.uri, "/files");
///
/// assert!(match_path("/users/:id", "/users").unwrap().is_none());
/// ```
pub fn match_path(path: &str, uri: &str) -> Result<Option<PathMatch>, RouteError> {
    let route = Route::new(path, ())?;

    Ok(pick(slice::from_ref(&route), uri).map(|m| PathMatch {
        path: path.to_string(),
        params: m.params,
        uri: m.uri,
    }))
}

/// Walks pattern and URI segments together (tail-recursive)
///
/// Returns the captured params and how many URI segments were consumed, or
/// `None` on the first segment that cannot be reconciled.
fn match_segments(
    route_segments: &[&str],
    uri_segments: &[&str],
    index: usize,
    is_root_uri: bool,
    mut params: HashMap<String, String>,
) -> Option<(HashMap<String, String>, usize)> {
    // Base case: both sides consumed
    if index >= route_segments.len().max(uri_segments.len()) {
        return Some((params, index));
    }

    let route_segment = route_segments.get(index).copied();

    // Wildcard: grab the rest and stop checking
    // uri:   /files/documents/work
    // route: /files/*
    if route_segment.map(Segment::classify) == Some(Segment::Wildcard) {
        let rest = &uri_segments[index.min(uri_segments.len())..];
        let value = rest
            .iter()
            .map(|segment| decode_segment(segment))
            .collect::<Vec<_>>()
            .join("/");
        params.insert(WILDCARD_PARAM.to_string(), value);
        return Some((params, index));
    }

    // URI shorter than the route
    // uri:   /users
    // route: /users/:userId
    let uri_segment = *uri_segments.get(index)?;

    match route_segment.map(Segment::classify) {
        // The root URI never feeds a dynamic segment
        Some(Segment::Dynamic(name)) if !is_root_uri => {
            params.insert(name.to_string(), decode_segment(uri_segment).into_owned());
        }
        _ if route_segment == Some(uri_segment) => {}
        // uri:   /users/123/settings
        // route: /users/:id/profile
        _ => return None,
    }

    match_segments(route_segments, uri_segments, index + 1, is_root_uri, params)
}

fn decode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or_else(|err| {
        debug!(segment, %err, "segment does not decode to UTF-8, keeping it raw");
        Cow::Borrowed(segment)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn routes(paths: &[&'static str]) -> Vec<Route<&'static str>> {
        paths
            .iter()
            .map(|path| Route::new(*path, *path).unwrap())
            .collect()
    }

    #[test]
    fn test_match_segments_exact() {
        let (params, consumed) =
            match_segments(&["users", ":id"], &["users", "7"], 0, false, HashMap::new()).unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("7"));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_match_segments_uri_longer_misses() {
        assert!(match_segments(&["users"], &["users", "7"], 0, false, HashMap::new()).is_none());
    }

    #[test]
    fn test_match_segments_root_uri_skips_dynamic() {
        assert!(match_segments(&[":id"], &[""], 0, true, HashMap::new()).is_none());
    }

    #[test]
    fn test_wildcard_past_end_of_uri() {
        let routes = routes(&["a/*"]);
        let m = pick(&routes, "/a").unwrap();
        assert_eq!(m.params.get("*").map(String::as_str), Some(""));
        assert_eq!(m.uri, "/a");
    }

    #[test]
    fn test_decode_invalid_utf8_kept_raw() {
        assert_eq!(decode_segment("%FF"), "%FF");
        assert_eq!(decode_segment("a%20b"), "a b");
    }

    #[test]
    fn test_static_compare_is_not_decoded() {
        let routes = routes(&["/a b"]);
        assert!(pick(&routes, "/a%20b").is_none());
        assert!(pick(&routes, "/a b").is_some());
    }
}
