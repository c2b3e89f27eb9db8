//! Process-wide session state.
//!
//! The store holds at most one [`AuthSession`]: a token and the user it
//! belongs to, always set and cleared together. Changes are published
//! through a `watch` cell so any number of observers can follow them, and
//! mirrored to a [`SessionPersistence`] backend so a session survives
//! restarts.

use crate::error::{ClientError, Result};
use crate::persistence::{MemoryPersistence, SessionPersistence};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};
use conference_alert_core::User;
use conference_alert_core::environment::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// An authenticated session: bearer token plus the resolved user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredSession")]
pub struct AuthSession {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct StoredSession {
    token: String,
    user: User,
}

impl TryFrom<StoredSession> for AuthSession {
    type Error = ClientError;

    fn try_from(stored: StoredSession) -> Result<Self> {
        Self::new(stored.token, stored.user)
    }
}

impl AuthSession {
    /// Pair a token with its user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] if the token is blank.
    pub fn new(token: impl Into<String>, user: User) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::Unauthorized("Backend returned an empty token".to_string()));
        }
        Ok(Self { token, user })
    }

    /// Bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Signed-in user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Expiry encoded in the token's `exp` claim, if it has one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        token_claims(&self.token)?
            .exp
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Returns `true` if the token is still usable at `now`.
    ///
    /// A token whose payload cannot be decoded is treated as expired; a
    /// decodable payload without `exp` never expires.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match token_claims(&self.token) {
            Some(claims) => claims.exp.is_none_or(|exp| exp > now.timestamp()),
            None => false,
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenClaims {
    exp: Option<i64>,
}

fn token_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Shared, observable session cell.
pub struct SessionStore {
    state: watch::Sender<Option<AuthSession>>,
    persistence: Box<dyn SessionPersistence>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Create a store and synchronously restore any persisted session.
    ///
    /// A persisted session that cannot be read is discarded with a warning.
    #[must_use]
    pub fn new(persistence: Box<dyn SessionPersistence>, clock: Arc<dyn Clock>) -> Self {
        let restored = match persistence.load() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(%error, "Discarding unreadable persisted session");
                None
            }
        };

        if let Some(session) = &restored {
            tracing::debug!(user_id = %session.user().id, "Restored persisted session");
        }

        let (state, _) = watch::channel(restored);
        Self {
            state,
            persistence,
            clock,
        }
    }

    /// An empty, memory-only store on the system clock.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryPersistence::new()), Arc::new(SystemClock))
    }

    /// The stored session, valid or not.
    #[must_use]
    pub fn current(&self) -> Option<AuthSession> {
        self.state.borrow().clone()
    }

    /// The stored session if its token is still usable.
    #[must_use]
    pub fn valid_session(&self) -> Option<AuthSession> {
        let now = self.clock.now();
        self.current().filter(|session| session.is_valid_at(now))
    }

    /// Returns `true` if a session with an unexpired token is stored.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid_session().is_some()
    }

    /// Token of the valid session.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.valid_session().map(|session| session.token)
    }

    /// User of the valid session.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.valid_session().map(|session| session.user)
    }

    /// Store a session and notify observers.
    pub fn save(&self, session: AuthSession) {
        if let Err(error) = self.persistence.save(&session) {
            tracing::warn!(%error, "Failed to persist session");
        }
        self.state.send_replace(Some(session));
    }

    /// Drop the session and notify observers.
    pub fn clear(&self) {
        if let Err(error) = self.persistence.clear() {
            tracing::warn!(%error, "Failed to clear persisted session");
        }
        self.state.send_replace(None);
    }

    /// Follow session changes. Dropping the subscription unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: self.state.subscribe(),
            clock: Arc::clone(&self.clock),
        }
    }

    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Observer handle on a [`SessionStore`].
#[derive(Clone)]
pub struct SessionSubscription {
    receiver: watch::Receiver<Option<AuthSession>>,
    clock: Arc<dyn Clock>,
}

impl SessionSubscription {
    /// The session as last observed, if its token is still usable.
    #[must_use]
    pub fn current(&self) -> Option<AuthSession> {
        let now = self.clock.now();
        self.receiver
            .borrow()
            .clone()
            .filter(|session| session.is_valid_at(now))
    }

    /// Wait for the next change and return the new valid session.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Option<AuthSession>> {
        self.receiver.changed().await.ok()?;
        Some(self.current())
    }
}

impl fmt::Debug for SessionSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSubscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> User {
        serde_json::from_value(json!({
            "id": "usr123",
            "collectionName": "users",
            "email": "ada@example.com",
            "name": "Ada"
        }))
        .unwrap()
    }

    fn token_with(payload: &serde_json::Value) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.signature",
            URL_SAFE_NO_PAD.encode(payload.to_string())
        )
    }

    #[test]
    fn test_blank_token_rejected() {
        assert!(matches!(AuthSession::new("  ", user()), Err(ClientError::Unauthorized(_))));
    }

    #[test]
    fn test_expiry_from_claims() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let fresh = AuthSession::new(token_with(&json!({"exp": now.timestamp() + 60})), user()).unwrap();
        let stale = AuthSession::new(token_with(&json!({"exp": now.timestamp() - 60})), user()).unwrap();
        let eternal = AuthSession::new(token_with(&json!({"id": "usr123"})), user()).unwrap();
        let garbage = AuthSession::new("not-a-jwt", user()).unwrap();

        assert!(fresh.is_valid_at(now));
        assert_eq!(fresh.expires_at().unwrap().timestamp(), now.timestamp() + 60);
        assert!(!stale.is_valid_at(now));
        assert!(eternal.is_valid_at(now));
        assert!(!garbage.is_valid_at(now));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = AuthSession::new(token_with(&json!({})), user()).unwrap();
        let rendered = format!("{session:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("signature"));
    }

    #[test]
    fn test_stored_session_validates_token() {
        let restored: std::result::Result<AuthSession, _> =
            serde_json::from_value(json!({"token": "", "user": user()}));
        assert!(restored.is_err());
    }

    #[tokio::test]
    async fn test_save_and_clear_notify_subscribers() {
        let store = SessionStore::in_memory();
        let mut subscription = store.subscribe();
        assert!(subscription.current().is_none());

        let session = AuthSession::new(token_with(&json!({})), user()).unwrap();
        store.save(session.clone());
        assert_eq!(subscription.changed().await, Some(Some(session)));
        assert!(store.is_valid());

        store.clear();
        assert_eq!(subscription.changed().await, Some(None));
        assert!(!store.is_valid());
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_subscription_ends_with_store() {
        let store = SessionStore::in_memory();
        let mut subscription = store.subscribe();
        drop(store);
        assert_eq!(subscription.changed().await, None);
    }

    #[test]
    fn test_subscription_waits_for_a_change() {
        let store = SessionStore::in_memory();
        let mut subscription = store.subscribe();
        let mut changed = tokio_test::task::spawn(subscription.changed());

        tokio_test::assert_pending!(changed.poll());
        store.clear();
        assert!(changed.is_woken());
        assert_eq!(tokio_test::assert_ready!(changed.poll()), Some(None));
    }
}
