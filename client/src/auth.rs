//! Account operations: sign in, sign up, sign out and token refresh.

use crate::client::{PocketBaseClient, trace_outcome};
use crate::error::{ClientError, Result};
use crate::session::AuthSession;
use crate::wire::{AuthResponse, NewAccount, PasswordAuthRequest, VerificationRequest};
use conference_alert_core::models::user::{SUPERUSERS_COLLECTION, USERS_COLLECTION};
use conference_alert_core::validation::validate_credentials;
use conference_alert_core::{Registration, User};

impl PocketBaseClient {
    /// Sign in a regular user and store the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for blank credentials and
    /// [`ClientError::Unauthorized`] if the backend rejects them.
    #[tracing::instrument(skip(self, password), name = "login")]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        trace_outcome("login", self.authenticate(USERS_COLLECTION, email, password).await)
    }

    /// Sign in an administrator and store the session.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    #[tracing::instrument(skip(self, password), name = "login_admin")]
    pub async fn login_admin(&self, email: &str, password: &str) -> Result<User> {
        trace_outcome(
            "login_admin",
            self.authenticate(SUPERUSERS_COLLECTION, email, password).await,
        )
    }

    async fn authenticate(&self, collection: &str, email: &str, password: &str) -> Result<User> {
        validate_credentials(email, password)?;

        let body = PasswordAuthRequest {
            identity: email.trim(),
            password,
        };
        let request = self
            .http()
            .post(self.collection_url(collection, "auth-with-password"))
            .json(&body);

        let auth: AuthResponse = self.send_json(request).await.map_err(|error| match error {
            // A wrong password comes back as a plain 400.
            ClientError::Api { status: 400, message } => ClientError::Unauthorized(message),
            other => other,
        })?;

        let user = self.store_session(auth)?;
        tracing::info!(user_id = %user.id, collection, "Signed in");
        Ok(user)
    }

    fn store_session(&self, auth: AuthResponse) -> Result<User> {
        let session = AuthSession::new(auth.token, auth.record)?;
        let user = session.user().clone();
        self.session().save(session);
        Ok(user)
    }

    /// Create an account, then ask the backend to send a verification email.
    ///
    /// The new user is not signed in. Failure to send the verification
    /// email is logged and does not fail the registration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the form is invalid, or the
    /// backend's error if the account cannot be created.
    #[tracing::instrument(skip(self, registration), fields(email = %registration.email), name = "register")]
    pub async fn register(&self, registration: &Registration) -> Result<User> {
        let result = async {
            registration.validate()?;

            let body = NewAccount {
                email: registration.email.trim(),
                password: &registration.password,
                password_confirm: &registration.password_confirm,
                name: registration.name.trim(),
            };
            let request = self
                .http()
                .post(self.collection_url(USERS_COLLECTION, "records"))
                .json(&body);
            let user: User = self.send_json(request).await?;
            tracing::info!(user_id = %user.id, "Account created");

            if let Err(error) = self.request_verification(registration.email.trim()).await {
                tracing::warn!(%error, user_id = %user.id, "Could not send verification email");
            }

            Ok::<_, ClientError>(user)
        }
        .await;

        trace_outcome("register", result)
    }

    /// Ask the backend to email a verification link to `email`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the request is rejected.
    pub async fn request_verification(&self, email: &str) -> Result<()> {
        let request = self
            .http()
            .post(self.collection_url(USERS_COLLECTION, "request-verification"))
            .json(&VerificationRequest { email });
        self.send(request).await.map(|_| ())
    }

    /// Clear the session. Observers see the change immediately.
    pub fn logout(&self) {
        if let Some(user) = self.session().user() {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        self.session().clear();
    }

    /// Exchange the current token for a fresh one.
    ///
    /// A rejected token clears the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a session, or
    /// [`ClientError::Unauthorized`] if the backend rejects the token.
    #[tracing::instrument(skip(self), name = "refresh_auth")]
    pub async fn refresh_auth(&self) -> Result<User> {
        let result = async {
            let session = self.require_session()?;
            let collection = match session.user().collection_name.as_str() {
                "" => USERS_COLLECTION,
                name => name,
            };

            let request = self.http().post(self.collection_url(collection, "auth-refresh"));
            match self.send_json::<AuthResponse>(request).await {
                Ok(auth) => self.store_session(auth),
                Err(error @ ClientError::Unauthorized(_)) => {
                    self.session().clear();
                    Err(error)
                }
                Err(error) => Err(error),
            }
        }
        .await;

        trace_outcome("refresh_auth", result)
    }

    /// Returns `true` if a session with an unexpired token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_valid()
    }

    /// The signed-in user, if the session is valid.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session().user()
    }

    /// The session token, if the session is valid.
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.session().token()
    }
}
