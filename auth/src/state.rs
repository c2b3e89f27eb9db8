//! Authentication status.

use conference_alert_client::AuthSession;
use conference_alert_core::User;

/// Where the application stands on who the visitor is.
///
/// Starts as [`AuthStatus::Uninitialized`] so callers can tell "not yet
/// known" apart from "known to be signed out".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// The persisted session has not been read yet.
    #[default]
    Uninitialized,
    /// A valid session exists for this user.
    Authenticated(User),
    /// No valid session.
    Unauthenticated,
}

impl AuthStatus {
    /// Status implied by a session, or its absence.
    #[must_use]
    pub fn from_session(session: Option<&AuthSession>) -> Self {
        session.map_or(Self::Unauthenticated, |session| {
            Self::Authenticated(session.user().clone())
        })
    }

    /// Returns `true` once the persisted session has been read.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Uninitialized | Self::Unauthenticated => None,
        }
    }
}
