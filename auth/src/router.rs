//! Route guard.

use crate::config::{RoutePolicy, normalize};
use crate::state::AuthStatus;

/// What to do with a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Status unknown; render a loading state and decide later.
    Loading,
    /// Render the page.
    Allow,
    /// Navigate to this path instead.
    Redirect(String),
    /// Signed in, but not allowed here.
    Forbidden,
}

impl RouteDecision {
    /// Redirect target, if this is a redirect.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect(path) => Some(path),
            Self::Loading | Self::Allow | Self::Forbidden => None,
        }
    }
}

/// Decide a navigation to `path` under `policy` given `status`.
///
/// # Examples
///
/// ```
/// use conference_alert_auth::{guard, AuthStatus, RouteDecision, RoutePolicy};
///
/// let policy = RoutePolicy::default();
/// assert_eq!(guard(&policy, &AuthStatus::Uninitialized, "/dashboard"), RouteDecision::Loading);
/// assert_eq!(
///     guard(&policy, &AuthStatus::Unauthenticated, "/dashboard"),
///     RouteDecision::Redirect("/login".to_string()),
/// );
/// assert_eq!(guard(&policy, &AuthStatus::Unauthenticated, "/blog"), RouteDecision::Allow);
/// ```
#[must_use]
pub fn guard(policy: &RoutePolicy, status: &AuthStatus, path: &str) -> RouteDecision {
    let user = match status {
        AuthStatus::Uninitialized => return RouteDecision::Loading,
        AuthStatus::Authenticated(user) => Some(user),
        AuthStatus::Unauthenticated => None,
    };

    if policy.is_auth_only(path) {
        return match user {
            Some(_) if normalize(&policy.landing_path) != normalize(path) => {
                RouteDecision::Redirect(policy.landing_path.clone())
            }
            _ => RouteDecision::Allow,
        };
    }

    if policy.is_protected(path) {
        let Some(user) = user else {
            return RouteDecision::Redirect(policy.login_path.clone());
        };
        if policy.is_admin_only(path) && !user.is_superuser() {
            return RouteDecision::Forbidden;
        }
    }

    RouteDecision::Allow
}
