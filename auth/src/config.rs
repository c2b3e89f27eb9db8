//! Route guard configuration.
//!
//! Paths are provided by the application; defaults match the site's
//! route surface.

use serde::{Deserialize, Serialize};

/// Which paths the guard protects and where it sends people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePolicy {
    /// Where signed-out visitors of protected paths are sent.
    ///
    /// Default: `/login`
    pub login_path: String,

    /// Where signed-in visitors of auth-only paths are sent.
    ///
    /// Default: `/dashboard`
    pub landing_path: String,

    /// Exact paths only signed-out visitors may see.
    ///
    /// Default: `/login`, `/register`
    pub auth_only: Vec<String>,

    /// Path prefixes that require a session.
    ///
    /// Default: `/dashboard`
    pub protected: Vec<String>,

    /// Path prefixes that require an administrator.
    ///
    /// Default: `/dashboard/create-blog`
    pub admin: Vec<String>,
}

impl RoutePolicy {
    /// Policy with custom login and landing paths and no guarded paths.
    #[must_use]
    pub fn new(login_path: impl Into<String>, landing_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            landing_path: landing_path.into(),
            auth_only: Vec::new(),
            protected: Vec::new(),
            admin: Vec::new(),
        }
    }

    /// Add an auth-only path.
    #[must_use]
    pub fn with_auth_only(mut self, path: impl Into<String>) -> Self {
        self.auth_only.push(path.into());
        self
    }

    /// Add a protected prefix.
    #[must_use]
    pub fn with_protected(mut self, prefix: impl Into<String>) -> Self {
        self.protected.push(prefix.into());
        self
    }

    /// Add an administrator-only prefix.
    #[must_use]
    pub fn with_admin(mut self, prefix: impl Into<String>) -> Self {
        self.admin.push(prefix.into());
        self
    }

    /// Returns `true` if `path` is auth-only.
    #[must_use]
    pub fn is_auth_only(&self, path: &str) -> bool {
        let path = normalize(path);
        self.auth_only.iter().any(|candidate| normalize(candidate) == path)
    }

    /// Returns `true` if `path` requires a session.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| under(path, prefix)) || self.is_admin_only(path)
    }

    /// Returns `true` if `path` requires an administrator.
    #[must_use]
    pub fn is_admin_only(&self, path: &str) -> bool {
        self.admin.iter().any(|prefix| under(path, prefix))
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new("/login", "/dashboard")
            .with_auth_only("/login")
            .with_auth_only("/register")
            .with_protected("/dashboard")
            .with_admin("/dashboard/create-blog")
    }
}

/// Strip query, fragment and trailing slashes.
pub(crate) fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Segment-aware prefix match: `/dashboard` covers `/dashboard/x` but not `/dashboards`.
fn under(path: &str, prefix: &str) -> bool {
    let path = normalize(path);
    let prefix = normalize(prefix);
    if prefix == "/" {
        return true;
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/login/"), "/login");
        assert_eq!(normalize("/login?next=/dashboard"), "/login");
        assert_eq!(normalize("/#top"), "/");
        assert_eq!(normalize(""), "/");
    }

    #[test]
    fn test_default_policy() {
        let policy = RoutePolicy::default();
        assert!(policy.is_auth_only("/register"));
        assert!(!policy.is_auth_only("/registered"));
        assert!(policy.is_protected("/dashboard"));
        assert!(policy.is_protected("/dashboard/create-event"));
        assert!(!policy.is_protected("/dashboards"));
        assert!(!policy.is_protected("/blog/some-post-abc123"));
        assert!(policy.is_admin_only("/dashboard/create-blog"));
        assert!(!policy.is_admin_only("/dashboard/create-event"));
    }

    #[test]
    fn test_admin_prefixes_are_protected() {
        let policy = RoutePolicy::new("/signin", "/home").with_admin("/admin");
        assert!(policy.is_protected("/admin/users"));
    }
}
