//! Link helpers: where a link points and whether it is active

use crate::path::resolve_directory;

/// Resolved target of a link plus its active state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    /// `to` resolved against the enclosing route's URI
    pub href: String,
    /// The current pathname is exactly `href`
    pub is_current: bool,
    /// The current pathname starts with `href`
    pub is_partially_current: bool,
}

impl LinkState {
    /// Computes the link state for `to`, relative to `base_uri`
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead_router::LinkState;
    ///
    /// let link = LinkState::new("settings", "/users/7", "/users/7/settings/email");
    /// assert_eq!(link.href, "/users/7/settings");
    /// assert!(!link.is_current);
    /// assert!(link.is_partially_current);
    /// ```
    pub fn new(to: &str, base_uri: &str, pathname: &str) -> Self {
        let href = resolve_directory(to, base_uri);
        LinkState {
            is_current: pathname == href,
            is_partially_current: pathname.starts_with(&href),
            href,
        }
    }
}

/// Pointer event a link receives, reduced to what decides navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Click {
    pub default_prevented: bool,
    /// `0` is the primary button
    pub button: u8,
    pub meta_key: bool,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
}

impl Click {
    /// A plain primary-button click
    pub fn primary() -> Self {
        Click::default()
    }

    /// Whether the link should navigate in-app instead of letting the
    /// platform handle the click (new tab, download, handled elsewhere)
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead_router::Click;
    ///
    /// assert!(Click::primary().should_navigate());
    /// assert!(!Click { ctrl_key: true, ..Click::primary() }.should_navigate());
    /// ```
    pub fn should_navigate(&self) -> bool {
        !self.default_prevented
            && self.button == 0
            && !(self.meta_key || self.alt_key || self.ctrl_key || self.shift_key)
    }
}
