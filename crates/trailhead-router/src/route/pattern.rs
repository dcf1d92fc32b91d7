//! Segment classification and ranking
//!
//! Pure functional parsing of route patterns into typed segments.
//! All functions are **pure**: same input → same output, no side effects.

use crate::path::segmentize;

/// Points every segment earns before its kind is considered
pub const SEGMENT_POINTS: i32 = 4;
/// Extra points for a static segment
pub const STATIC_POINTS: i32 = 3;
/// Extra points for a dynamic segment
pub const DYNAMIC_POINTS: i32 = 2;
/// Extra points for the root (empty) segment
pub const ROOT_POINTS: i32 = 1;
/// Penalty a wildcard takes on top of giving back its segment points
pub const WILDCARD_PENALTY: i32 = 1;

/// Placeholder names that collide with values a consumer receives next to
/// the params (`uri`, `path`) and cannot be used by a dynamic segment
pub const RESERVED_NAMES: [&str; 2] = ["uri", "path"];

/// Represents the different kinds of route pattern segments
///
/// Functional sum type for pattern matching route segments.
/// Borrowed from the pattern text, so classifying never allocates.
///
/// # Examples
///
/// ```
/// use trailhead_router::Segment;
///
/// assert_eq!(Segment::classify(""), Segment::Root);
/// assert_eq!(Segment::classify("users"), Segment::Static("users"));
/// assert_eq!(Segment::classify(":id"), Segment::Dynamic("id"));
/// assert_eq!(Segment::classify("*"), Segment::Wildcard);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// The empty segment produced by the root path `/`
    Root,
    /// `:name`, captures exactly one path segment
    Dynamic(&'a str),
    /// `*`, captures every remaining path segment
    Wildcard,
    /// Any other literal text
    Static(&'a str),
}

impl<'a> Segment<'a> {
    /// Classifies a segment (pure function)
    ///
    /// # Parsing Rules (evaluated in order)
    ///
    /// 1. **Root**: the empty string
    /// 2. **Dynamic**: `:` followed by at least one character
    /// 3. **Wildcard**: exactly `*`
    /// 4. **Static**: anything else, including a lone `:`
    pub fn classify(segment: &'a str) -> Self {
        if segment.is_empty() {
            return Segment::Root;
        }

        match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => Segment::Dynamic(name),
            _ if segment == "*" => Segment::Wildcard,
            _ => Segment::Static(segment),
        }
    }

    /// Points this segment adds to its pattern's score
    ///
    /// `static > dynamic > root > wildcard`; a wildcard is worth less than
    /// nothing so a bare `*` ranks below every other pattern.
    pub fn points(&self) -> i32 {
        SEGMENT_POINTS
            + match self {
                Segment::Root => ROOT_POINTS,
                Segment::Dynamic(_) => DYNAMIC_POINTS,
                Segment::Wildcard => -(SEGMENT_POINTS + WILDCARD_PENALTY),
                Segment::Static(_) => STATIC_POINTS,
            }
    }

    /// Whether this is a `:name` segment
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Segment::Dynamic(_))
    }
}

/// Scores a pattern by folding over its segments
///
/// # Examples
///
/// ```
/// use trailhead_router::route::pattern::score;
///
/// assert_eq!(score("/"), 5);
/// assert_eq!(score("/users"), 7);
/// assert_eq!(score("/users/:id"), 13);
/// assert_eq!(score("*"), -1);
/// ```
pub fn score(pattern: &str) -> i32 {
    segmentize(pattern)
        .into_iter()
        .map(|segment| Segment::classify(segment).points())
        .sum()
}

/// Yields the placeholder names of every dynamic segment, in order
pub fn dynamic_names(pattern: &str) -> impl Iterator<Item = &str> {
    segmentize(pattern)
        .into_iter()
        .filter_map(|segment| match Segment::classify(segment) {
            Segment::Dynamic(name) => Some(name),
            _ => None,
        })
}

/// Returns the first placeholder name in `pattern` that is reserved
pub fn reserved_name(pattern: &str) -> Option<&str> {
    dynamic_names(pattern).find(|name| RESERVED_NAMES.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_root() {
        assert_eq!(Segment::classify(""), Segment::Root);
    }

    #[test]
    fn test_classify_static() {
        assert_eq!(Segment::classify("about"), Segment::Static("about"));
        assert_eq!(Segment::classify(":"), Segment::Static(":"));
        assert_eq!(Segment::classify("**"), Segment::Static("**"));
    }

    #[test]
    fn test_classify_dynamic() {
        assert_eq!(Segment::classify(":id"), Segment::Dynamic("id"));
        assert_eq!(Segment::classify("::id"), Segment::Dynamic(":id"));
    }

    #[test]
    fn test_classify_wildcard() {
        assert_eq!(Segment::classify("*"), Segment::Wildcard);
    }

    #[test]
    fn test_points() {
        assert_eq!(Segment::Root.points(), 5);
        assert_eq!(Segment::Dynamic("id").points(), 6);
        assert_eq!(Segment::Wildcard.points(), -1);
        assert_eq!(Segment::Static("users").points(), 7);
    }

    #[test]
    fn test_score_orders_kinds() {
        assert!(score("/users/new") > score("/users/:id"));
        assert!(score("/users/:id") > score("/users/*"));
        assert!(score("/") > score("*"));
        assert!(score("/") < score(":id"));
    }

    #[test]
    fn test_dynamic_names() {
        let names: Vec<&str> = dynamic_names("group/:groupId/user/:userId").collect();
        assert_eq!(names, vec!["groupId", "userId"]);
    }

    #[test]
    fn test_reserved_name() {
        assert_eq!(reserved_name("/files/:path"), Some("path"));
        assert_eq!(reserved_name("/:uri/x"), Some("uri"));
        assert_eq!(reserved_name("/users/:id"), None);
    }
}
