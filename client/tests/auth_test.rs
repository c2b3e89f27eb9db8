//! Session lifecycle against a fake backend.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use conference_alert_client::{
    AuthSession, ClientConfig, ClientError, FilePersistence, MemoryPersistence, PocketBaseClient,
};
use conference_alert_core::{Registration, User};
use conference_alert_testing::backend::FakeBackend;
use conference_alert_testing::fixtures::{admin_json, expired_token, user_json, valid_token};
use conference_alert_testing::{init_test_tracing, test_clock};
use std::sync::Arc;

fn client_for(backend: &FakeBackend) -> PocketBaseClient {
    init_test_tracing();
    PocketBaseClient::builder(ClientConfig::new(backend.uri()))
        .clock(Arc::new(test_clock()))
        .build()
        .unwrap()
}

fn user(id: &str) -> User {
    serde_json::from_value(user_json(id, "ada@example.com")).unwrap()
}

#[tokio::test]
async fn test_login_stores_session_and_authorizes_requests() {
    let backend = FakeBackend::start().await;
    backend
        .accept_login("users", &valid_token(), &user_json("usr123", "ada@example.com"))
        .await;
    backend.missing_record("events", "ev404").await;

    let client = client_for(&backend);
    let mut subscription = client.subscribe();

    let signed_in = client.login("ada@example.com", "correct horse").await.unwrap();
    assert_eq!(signed_in.id.as_str(), "usr123");
    assert!(client.is_authenticated());
    assert_eq!(client.auth_token(), Some(valid_token()));

    let observed = subscription.changed().await.unwrap().unwrap();
    assert_eq!(observed.user().id.as_str(), "usr123");

    let login = &backend
        .requests_to("/api/collections/users/auth-with-password")
        .await[0];
    let body: serde_json::Value = serde_json::from_slice(&login.body).unwrap();
    assert_eq!(body["identity"], "ada@example.com");

    client
        .get_event(&"ev404".parse().unwrap())
        .await
        .unwrap();
    let lookup = &backend
        .requests_to("/api/collections/events/records/ev404")
        .await[0];
    assert_eq!(
        lookup.headers.get("authorization").unwrap().to_str().unwrap(),
        valid_token()
    );
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let backend = FakeBackend::start().await;
    backend.reject_login("users").await;

    let client = client_for(&backend);
    let err = client.login("ada@example.com", "nope").await.unwrap_err();

    assert_eq!(err, ClientError::Unauthorized("Failed to authenticate.".to_string()));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_blank_credentials_never_reach_backend() {
    let backend = FakeBackend::start().await;
    let client = client_for(&backend);

    let err = client.login("  ", "secret").await.unwrap_err();
    assert!(err.is_validation_error());
    assert!(backend.received().await.is_empty());
}

#[tokio::test]
async fn test_admin_login_uses_superusers_collection() {
    let backend = FakeBackend::start().await;
    backend
        .accept_login("_superusers", &valid_token(), &admin_json("adm1", "root@example.com"))
        .await;

    let client = client_for(&backend);
    let admin = client.login_admin("root@example.com", "hunter22").await.unwrap();
    assert!(admin.is_superuser());
}

#[tokio::test]
async fn test_register_survives_verification_failure() {
    let backend = FakeBackend::start().await;
    backend
        .accept_create("users", user_json("usrnew", "grace@example.com"))
        .await;
    backend
        .fail(
            "POST",
            "/api/collections/users/request-verification",
            500,
            "SMTP unavailable",
            &[],
        )
        .await;

    let client = client_for(&backend);
    let form = Registration::new("grace@example.com", "correct horse", "correct horse", "Grace");
    let created = client.register(&form).await.unwrap();

    assert_eq!(created.id.as_str(), "usrnew");
    assert!(!client.is_authenticated());

    let create = &backend.requests_to("/api/collections/users/records").await[0];
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(body["passwordConfirm"], "correct horse");

    let verify = &backend
        .requests_to("/api/collections/users/request-verification")
        .await[0];
    let body: serde_json::Value = serde_json::from_slice(&verify.body).unwrap();
    assert_eq!(body["email"], "grace@example.com");
}

#[tokio::test]
async fn test_register_rejects_mismatched_passwords() {
    let backend = FakeBackend::start().await;
    let client = client_for(&backend);

    let form = Registration::new("grace@example.com", "correct horse", "battery staple", "Grace");
    let err = client.register(&form).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation { ref field, .. } if field == "passwordConfirm"));
    assert!(backend.received().await.is_empty());
}

#[tokio::test]
async fn test_logout_clears_session_and_notifies() {
    let backend = FakeBackend::start().await;
    let session = AuthSession::new(valid_token(), user("usr123")).unwrap();
    let client = PocketBaseClient::builder(ClientConfig::new(backend.uri()))
        .persistence(MemoryPersistence::with_session(session))
        .clock(Arc::new(test_clock()))
        .build()
        .unwrap();

    assert!(client.is_authenticated());
    let mut subscription = client.subscribe();

    client.logout();

    assert_eq!(subscription.changed().await, Some(None));
    assert!(client.current_user().is_none());
    assert!(client.auth_token().is_none());
}

#[tokio::test]
async fn test_expired_session_is_not_authenticated() {
    let backend = FakeBackend::start().await;
    let session = AuthSession::new(expired_token(), user("usr123")).unwrap();
    let client = PocketBaseClient::builder(ClientConfig::new(backend.uri()))
        .persistence(MemoryPersistence::with_session(session))
        .clock(Arc::new(test_clock()))
        .build()
        .unwrap();

    assert!(!client.is_authenticated());
    assert!(client.session().current().is_some());
    assert_eq!(client.refresh_auth().await.unwrap_err(), ClientError::NotAuthenticated);
}

#[tokio::test]
async fn test_rejected_refresh_clears_session() {
    let backend = FakeBackend::start().await;
    backend
        .fail(
            "POST",
            "/api/collections/users/auth-refresh",
            401,
            "The request requires valid record authorization token.",
            &[],
        )
        .await;

    let session = AuthSession::new(valid_token(), user("usr123")).unwrap();
    let client = PocketBaseClient::builder(ClientConfig::new(backend.uri()))
        .persistence(MemoryPersistence::with_session(session))
        .clock(Arc::new(test_clock()))
        .build()
        .unwrap();

    let err = client.refresh_auth().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(client.session().current().is_none());
}

#[tokio::test]
async fn test_session_file_survives_restart() {
    let backend = FakeBackend::start().await;
    backend
        .accept_login("users", &valid_token(), &user_json("usr123", "ada@example.com"))
        .await;

    let path = std::env::temp_dir()
        .join(format!("conference-alert-auth-test-{}", std::process::id()))
        .join("session.json");
    let config = ClientConfig::new(backend.uri()).with_session_file(&path);

    let first = PocketBaseClient::builder(config.clone())
        .clock(Arc::new(test_clock()))
        .build()
        .unwrap();
    first.login("ada@example.com", "correct horse").await.unwrap();

    let second = PocketBaseClient::builder(config)
        .clock(Arc::new(test_clock()))
        .build()
        .unwrap();
    assert_eq!(second.current_user().unwrap().id.as_str(), "usr123");

    second.logout();
    assert!(FilePersistence::new(&path).path().parent().unwrap().exists());
    assert!(!path.exists());
}
