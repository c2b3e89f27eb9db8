//! Auth state coordinator.
//!
//! Owns the application's [`AuthStatus`] and keeps it in step with the
//! client's session store. Explicit sign-in and sign-out update the status
//! immediately; [`AuthCoordinator::spawn_sync`] follows every other change
//! to the store, such as another clone of the client signing out.

use crate::config::RoutePolicy;
use crate::router::{RouteDecision, guard};
use crate::state::AuthStatus;
use conference_alert_client::{PocketBaseClient, Result};
use conference_alert_core::{Registration, User};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Publishes the authentication status and answers route-guard queries.
#[derive(Debug, Clone)]
pub struct AuthCoordinator {
    client: PocketBaseClient,
    policy: Arc<RoutePolicy>,
    status: Arc<watch::Sender<AuthStatus>>,
}

impl AuthCoordinator {
    /// Create an uninitialized coordinator.
    #[must_use]
    pub fn new(client: PocketBaseClient, policy: RoutePolicy) -> Self {
        let (status, _) = watch::channel(AuthStatus::Uninitialized);
        Self {
            client,
            policy: Arc::new(policy),
            status: Arc::new(status),
        }
    }

    /// Resolve the status from the session the client restored.
    ///
    /// Synchronous, so the first guard decision after this call is never
    /// [`RouteDecision::Loading`].
    pub fn initialize(&self) -> AuthStatus {
        let status = AuthStatus::from_session(self.client.session().valid_session().as_ref());
        tracing::debug!(authenticated = status.user().is_some(), "Auth state initialized");
        self.publish(status.clone());
        status
    }

    /// Follow session-store changes until the handle is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use = "dropping the handle stops the sync task"]
    pub fn spawn_sync(&self) -> SyncHandle {
        let status = Arc::clone(&self.status);
        let mut subscription = self.client.subscribe();

        let task = tokio::spawn(async move {
            while let Some(session) = subscription.changed().await {
                let next = AuthStatus::from_session(session.as_ref());
                tracing::debug!(authenticated = next.user().is_some(), "Session changed");
                status.send_replace(next);
            }
        });

        SyncHandle { task }
    }

    /// Current status.
    ///
    /// A signed-in status whose token has since expired is downgraded to
    /// [`AuthStatus::Unauthenticated`] first, and subscribers see the change.
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.expire_stale_session();
        self.status.borrow().clone()
    }

    /// Follow status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Returns `true` only when the status names a user and the client still
    /// holds a valid token for them.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.expire_stale_session();
        match (&*self.status.borrow(), self.client.current_user()) {
            (AuthStatus::Authenticated(user), Some(session_user)) => user.id == session_user.id,
            _ => false,
        }
    }

    /// The signed-in user, if authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        if self.is_authenticated() {
            self.client.current_user()
        } else {
            None
        }
    }

    /// Sign in a regular user.
    ///
    /// # Errors
    ///
    /// Passes through the client's error; the status is left unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let user = self.client.login(email, password).await?;
        self.publish(AuthStatus::Authenticated(user.clone()));
        Ok(user)
    }

    /// Sign in an administrator.
    ///
    /// # Errors
    ///
    /// Passes through the client's error; the status is left unchanged.
    pub async fn sign_in_admin(&self, email: &str, password: &str) -> Result<User> {
        let user = self.client.login_admin(email, password).await?;
        self.publish(AuthStatus::Authenticated(user.clone()));
        Ok(user)
    }

    /// Create an account. The new user still has to sign in.
    ///
    /// # Errors
    ///
    /// Passes through the client's error.
    pub async fn create_account(&self, registration: &Registration) -> Result<User> {
        self.client.register(registration).await
    }

    /// Clear the session and mark the visitor signed out.
    pub fn sign_out(&self) {
        self.client.logout();
        self.publish(AuthStatus::Unauthenticated);
    }

    /// Decide a navigation to `path` under the current status.
    #[must_use]
    pub fn guard(&self, path: &str) -> RouteDecision {
        self.expire_stale_session();
        let status = self.status.borrow();
        let decision = guard(&self.policy, &status, path);
        if let RouteDecision::Redirect(target) = &decision {
            tracing::debug!(path, target = %target, "Redirecting");
        }
        decision
    }

    /// The wrapped client.
    #[must_use]
    pub const fn client(&self) -> &PocketBaseClient {
        &self.client
    }

    /// Active route policy.
    #[must_use]
    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    /// The store does not announce token expiry, so check it on read.
    fn expire_stale_session(&self) {
        let signed_in = matches!(&*self.status.borrow(), AuthStatus::Authenticated(_));
        if signed_in && self.client.session().valid_session().is_none() {
            tracing::info!("Session expired");
            self.status.send_if_modified(|status| {
                if matches!(status, AuthStatus::Authenticated(_)) {
                    *status = AuthStatus::Unauthenticated;
                    true
                } else {
                    false
                }
            });
        }
    }

    fn publish(&self, status: AuthStatus) {
        self.status.send_replace(status);
    }
}

/// Keeps the session sync task alive. Dropping it stops the task.
#[derive(Debug)]
pub struct SyncHandle {
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Returns `true` once the task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
