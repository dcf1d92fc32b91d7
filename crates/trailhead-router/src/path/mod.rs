//! Path utilities for segment splitting and relative resolution
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

/// Splits a URI into its pathname and query string
///
/// Only the text between the first and second `?` is kept as the query,
/// matching how `uri.split('?')` destructures in a browser.
///
/// # Examples
///
/// ```
/// use trailhead_router::path::split_query;
///
/// assert_eq!(split_query("/users?page=2"), ("/users", Some("page=2")));
/// assert_eq!(split_query("/users"), ("/users", None));
/// ```
pub fn split_query(uri: &str) -> (&str, Option<&str>) {
    let mut parts = uri.split('?');
    let pathname = parts.next().unwrap_or_default();
    (pathname, parts.next())
}

/// Strips every leading and trailing `/`
///
/// # Examples
///
/// ```
/// use trailhead_router::path::strip_slashes;
///
/// assert_eq!(strip_slashes("/users/"), "users");
/// assert_eq!(strip_slashes("//"), "");
/// ```
pub fn strip_slashes(path: &str) -> &str {
    path.trim_matches('/')
}

/// Splits a path into its `/`-delimited segments
///
/// Leading and trailing slashes are ignored, so the root path yields a single
/// empty segment rather than no segments at all. Interior empty segments are
/// kept as-is.
///
/// # Examples
///
/// ```
/// use trailhead_router::path::segmentize;
///
/// assert_eq!(segmentize("/users/123/"), vec!["users", "123"]);
/// assert_eq!(segmentize("/"), vec![""]);
/// assert_eq!(segmentize(""), vec![""]);
/// ```
pub fn segmentize(path: &str) -> Vec<&str> {
    strip_slashes(path).split('/').collect()
}

/// Reattaches a query string to a pathname (empty queries are dropped)
pub fn add_query(pathname: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{pathname}?{query}"),
        _ => pathname.to_string(),
    }
}

/// Resolves `to` against `base`
///
/// - Absolute targets (`/...`) are returned unchanged.
/// - Query-only targets (`?a=b`) keep the base pathname.
/// - Targets starting with `.` walk the base like directories: `..` pops a
///   segment and `.` is skipped.
/// - Any other relative target is appended when the base ends with `/` and
///   replaces the base's last segment otherwise.
///
/// The query string of `to` is carried over to the result.
///
/// # Examples
///
/// ```
/// use trailhead_router::resolve;
///
/// assert_eq!(resolve("foo", "/bar/"), "/bar/foo");
/// assert_eq!(resolve("foo", "/bar"), "/foo");
/// assert_eq!(resolve("..", "/a/b/c"), "/a/b");
/// assert_eq!(resolve("/x", "/anything"), "/x");
/// assert_eq!(resolve("?page=2", "/users?page=1"), "/users?page=2");
/// ```
pub fn resolve(to: &str, base: &str) -> String {
    resolve_with(to, base, false)
}

/// Resolves `to` against `base` as though every path is a directory
///
/// Same as [`resolve`], except a base without a trailing slash is still
/// treated as a directory. This is what nested routers use so a link only has
/// to know where it goes from the matched route, not the full path:
///
/// ```
/// use trailhead_router::path::resolve_directory;
///
/// assert_eq!(resolve_directory("profile", "/users/789"), "/users/789/profile");
/// assert_eq!(resolve_directory("../../one", "/a/b/c/d"), "/a/b/one");
/// assert_eq!(resolve_directory(".././one", "/a/b/c/d"), "/a/b/c/one");
/// ```
pub fn resolve_directory(to: &str, base: &str) -> String {
    resolve_with(to, base, true)
}

fn resolve_with(to: &str, base: &str, always_directory: bool) -> String {
    if to.starts_with('/') {
        return to.to_string();
    }

    let (to_pathname, to_query) = split_query(to);
    let (base_pathname, _) = split_query(base);

    let to_segments = segmentize(to_pathname);
    let mut base_segments: Vec<&str> = segmentize(base_pathname)
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect();

    // ?a=b, /users?b=c => /users?a=b
    if to_segments[0].is_empty() {
        return add_query(base_pathname, to_query);
    }

    // profile, /users/789/ => /users/789/profile
    if !to_segments[0].starts_with('.') {
        if !always_directory && !base_pathname.ends_with('/') {
            base_segments.pop();
        }
        let pathname = base_segments
            .into_iter()
            .chain(to_segments)
            .collect::<Vec<_>>()
            .join("/");
        return add_query(&format!("/{pathname}"), to_query);
    }

    // ../        /users/123  =>  /users
    // ../../one  /a/b/c/d    =>  /a/b/one
    let segments = base_segments
        .into_iter()
        .chain(to_segments)
        .fold(Vec::new(), |mut segments, segment| {
            match segment {
                ".." => {
                    segments.pop();
                }
                "." => {}
                segment => segments.push(segment),
            }
            segments
        });

    add_query(&format!("/{}", segments.join("/")), to_query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segmentize() {
        assert_eq!(segmentize("/a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(segmentize("a/b/"), vec!["a", "b"]);
        assert_eq!(segmentize("///a//b///"), vec!["a", "", "b"]);
        assert_eq!(segmentize("/"), vec![""]);
    }

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("/a?b=c"), ("/a", Some("b=c")));
        assert_eq!(split_query("/a?b=c?d"), ("/a", Some("b=c")));
        assert_eq!(split_query("?b=c"), ("", Some("b=c")));
        assert_eq!(split_query("/a"), ("/a", None));
    }

    #[test]
    fn test_add_query() {
        assert_eq!(add_query("/a", Some("b=c")), "/a?b=c");
        assert_eq!(add_query("/a", Some("")), "/a");
        assert_eq!(add_query("/a", None), "/a");
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(resolve("/foo/bar", "/baz/qux"), "/foo/bar");
        assert_eq!(resolve_directory("/foo/bar", "/baz/qux"), "/foo/bar");
    }

    #[test]
    fn test_resolve_query_only() {
        assert_eq!(resolve("?a=b", "/users?b=c"), "/users?a=b");
        assert_eq!(resolve("", "/users?b=c"), "/users");
    }

    #[test]
    fn test_resolve_leaf_base() {
        assert_eq!(resolve("foo", "/bar"), "/foo");
        assert_eq!(resolve("foo", "/a/b"), "/a/foo");
        assert_eq!(resolve("foo", "/"), "/foo");
        assert_eq!(resolve("foo", ""), "/foo");
    }

    #[test]
    fn test_resolve_directory_base() {
        assert_eq!(resolve("foo", "/bar/"), "/bar/foo");
        assert_eq!(resolve("foo?x=1", "/bar/"), "/bar/foo?x=1");
        assert_eq!(resolve_directory("profile", "/users/789"), "/users/789/profile");
        assert_eq!(resolve_directory("foo", "/"), "/foo");
    }

    #[test]
    fn test_resolve_dot_segments() {
        assert_eq!(resolve("./", "/users/123"), "/users/123");
        assert_eq!(resolve("../", "/users/123"), "/users");
        assert_eq!(resolve("../..", "/users/123"), "/");
        assert_eq!(resolve("../../one", "/a/b/c/d"), "/a/b/one");
        assert_eq!(resolve(".././one", "/a/b/c/d"), "/a/b/c/one");
        assert_eq!(resolve("../../../../..", "/a/b"), "/");
        assert_eq!(resolve("./a", "/"), "/a");
    }
}
