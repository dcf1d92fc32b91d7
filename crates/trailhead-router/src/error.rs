use thiserror::Error;

/// Route registration errors
///
/// All of these are configuration mistakes caught while the route table is
/// built; matching itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("dynamic segment \"{name}\" is a reserved name, use a different name in path \"{path}\"")]
    ReservedName { name: String, path: String },

    #[error("route must have a `path`, be the `default` route, or be a redirect")]
    MissingPath,

    #[error("redirect from \"{from}\" to \"{to}\" requires both `from` and `to`")]
    IncompleteRedirect { from: String, to: String },

    #[error(
        "redirect from \"{from}\" to \"{to}\" has mismatched dynamic segments, \
         ensure both paths have the exact same dynamic segments"
    )]
    RedirectMismatch { from: String, to: String },
}
