//! PocketBase REST client.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::persistence::{FilePersistence, MemoryPersistence, SessionPersistence};
use crate::session::{AuthSession, SessionStore, SessionSubscription};
use crate::wire::{ApiErrorBody, ListQuery};
use conference_alert_core::assets::resolve_asset_url;
use conference_alert_core::environment::{Clock, SystemClock};
use conference_alert_core::{Attachment, Filter, Page, PageRequest, RecordId, StoredRecord};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// Data access client for events, blog posts and accounts.
///
/// Cheap to clone: clones share the HTTP connection pool and the session.
/// Every operation attaches the current session token, if any.
#[derive(Clone)]
pub struct PocketBaseClient {
    http: Client,
    config: Arc<ClientConfig>,
    session: Arc<SessionStore>,
}

impl PocketBaseClient {
    /// Client with the system clock and the persistence `config` selects.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Client configured from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Start building a client with injected collaborators.
    #[must_use]
    pub fn builder(config: ClientConfig) -> PocketBaseClientBuilder {
        PocketBaseClientBuilder {
            config,
            persistence: None,
            clock: None,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Follow session changes.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        self.session.subscribe()
    }

    /// Injected clock.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.session.clock().as_ref()
    }

    /// Public URL of a file stored on `record`, or `None` if `field` is unset.
    #[must_use]
    pub fn asset_url<R: StoredRecord>(&self, record: &R, field: &str) -> Option<String> {
        resolve_asset_url(&self.config.files_url(), record, field)
    }

    // ═══════════════════════════════════════════════════════════
    // Session guards
    // ═══════════════════════════════════════════════════════════

    /// The current session, or [`ClientError::NotAuthenticated`].
    pub(crate) fn require_session(&self) -> Result<AuthSession> {
        self.session.valid_session().ok_or(ClientError::NotAuthenticated)
    }

    /// The current session if it belongs to an administrator.
    pub(crate) fn require_superuser(&self) -> Result<AuthSession> {
        let session = self.require_session()?;
        if session.user().is_superuser() {
            Ok(session)
        } else {
            Err(ClientError::Forbidden(
                "Only administrators can manage blog posts".to_string(),
            ))
        }
    }

    // ═══════════════════════════════════════════════════════════
    // Transport
    // ═══════════════════════════════════════════════════════════

    pub(crate) fn collection_url(&self, collection: &str, action: &str) -> String {
        format!("{}/collections/{collection}/{action}", self.config.api_url())
    }

    fn records_url(&self, collection: &str) -> String {
        self.collection_url(collection, "records")
    }

    fn record_url(&self, collection: &str, id: &RecordId) -> String {
        format!("{}/{id}", self.records_url(collection))
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    /// Send `request` and return the response if its status is a success.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Send `request` and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))
    }

    /// One page of `collection`.
    pub(crate) async fn list_records<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &str,
        expand: &str,
        request: PageRequest,
    ) -> Result<Page<T>> {
        let filter = filter.build();
        let query = ListQuery {
            page: request.page,
            per_page: request.per_page,
            filter: &filter,
            sort,
            expand,
        };

        tracing::debug!(
            collection,
            filter = %filter,
            page = request.page,
            per_page = request.per_page,
            "Listing records"
        );

        self.send_json(self.http.get(self.records_url(collection)).query(&query))
            .await
    }

    /// A single record, or `None` if it does not exist or is not visible.
    pub(crate) async fn get_record<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> Result<Option<T>> {
        match self.send_json(self.http.get(self.record_url(collection, id))).await {
            Ok(record) => Ok(Some(record)),
            Err(ClientError::Api { status: 404, .. }) => {
                tracing::debug!(collection, %id, "Record not found");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Create a record from a multipart form.
    pub(crate) async fn create_record<T: DeserializeOwned>(&self, collection: &str, form: Form) -> Result<T> {
        self.send_json(self.http.post(self.records_url(collection)).multipart(form))
            .await
    }

    /// Patch a record from a multipart form.
    pub(crate) async fn update_record<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &RecordId,
        form: Form,
    ) -> Result<T> {
        self.send_json(self.http.patch(self.record_url(collection, id)).multipart(form))
            .await
    }
}

impl fmt::Debug for PocketBaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PocketBaseClient")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Builder for [`PocketBaseClient`].
pub struct PocketBaseClientBuilder {
    config: ClientConfig,
    persistence: Option<Box<dyn SessionPersistence>>,
    clock: Option<Arc<dyn Clock>>,
}

impl PocketBaseClientBuilder {
    /// Use `persistence` instead of the one `config` selects.
    #[must_use]
    pub fn persistence(mut self, persistence: impl SessionPersistence + 'static) -> Self {
        self.persistence = Some(Box::new(persistence));
        self
    }

    /// Use `clock` for token expiry and date-relative queries.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the client, restoring any persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<PocketBaseClient> {
        let http = Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.as_str())
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        let persistence: Box<dyn SessionPersistence> = match self.persistence {
            Some(persistence) => persistence,
            None => match &self.config.session_file {
                Some(path) => Box::new(FilePersistence::new(path)),
                None => Box::new(MemoryPersistence::new()),
            },
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        tracing::debug!(base_url = %self.config.base_url, "Building PocketBase client");

        Ok(PocketBaseClient {
            http,
            config: Arc::new(self.config),
            session: Arc::new(SessionStore::new(persistence, clock)),
        })
    }
}

impl fmt::Debug for PocketBaseClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PocketBaseClientBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Map a non-success response onto [`ClientError`].
async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = ApiErrorBody::from_text(&body).describe(status.canonical_reason().unwrap_or("Request failed"));

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        status => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Build a multipart form from text fields and an optional file.
pub(crate) fn multipart_form(
    fields: Vec<(&'static str, String)>,
    file: Option<(&'static str, &Attachment)>,
) -> Result<Form> {
    let mut form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    if let Some((field, attachment)) = file.filter(|(_, attachment)| !attachment.is_empty()) {
        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.content_type)
            .map_err(|e| ClientError::Validation {
                field: field.to_string(),
                message: format!("Unsupported content type: {e}"),
            })?;
        form = form.part(field, part);
    }

    Ok(form)
}

/// Log a failed operation at a level matching its cause and pass it through.
pub(crate) fn trace_outcome<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    if let Err(error) = &result {
        if error.is_validation_error() || error.is_authorization_error() {
            tracing::warn!(operation, error = %error, "Operation rejected");
        } else {
            tracing::error!(operation, error = %error, "Operation failed");
        }
    }
    result
}
