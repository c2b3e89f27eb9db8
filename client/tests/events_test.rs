//! Event queries and submissions against a fake backend.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use conference_alert_client::{AuthSession, ClientConfig, ClientError, MemoryPersistence, PocketBaseClient};
use conference_alert_core::filter::SearchType;
use conference_alert_core::{
    Attachment, EventCategory, EventStatus, EventType, NewEvent, PageRequest, RecordId, SearchCriteria, User,
};
use conference_alert_testing::backend::{FakeBackend, query_param};
use conference_alert_testing::fixtures::{event_json, list_json, user_json, valid_token};
use conference_alert_testing::{init_test_tracing, test_clock};
use std::sync::Arc;

const RECORDS: &str = "/api/collections/events/records";

fn anonymous(backend: &FakeBackend) -> PocketBaseClient {
    init_test_tracing();
    PocketBaseClient::builder(ClientConfig::new(backend.uri()))
        .clock(Arc::new(test_clock()))
        .build()
        .unwrap()
}

fn signed_in(backend: &FakeBackend) -> PocketBaseClient {
    init_test_tracing();
    let user: User = serde_json::from_value(user_json("usr123", "ada@example.com")).unwrap();
    PocketBaseClient::builder(ClientConfig::new(backend.uri()))
        .persistence(MemoryPersistence::with_session(
            AuthSession::new(valid_token(), user).unwrap(),
        ))
        .clock(Arc::new(test_clock()))
        .build()
        .unwrap()
}

fn robotics_summit() -> NewEvent {
    let mut event = NewEvent::new(
        "International Conference on Robotics",
        EventType::Conference,
        EventCategory::EngineeringAndTechnology,
    );
    event.country = "India".to_string();
    event.city = "Mumbai".to_string();
    event.keywords = vec!["robotics".to_string(), "automation".to_string()];
    event.thumbnail = Some(Attachment::new("robots.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]));
    event
}

#[tokio::test]
async fn test_search_sends_filter_sort_and_page() {
    let backend = FakeBackend::start().await;
    let items = (0..12)
        .map(|i| event_json(&format!("ev{i}"), "Robotics Summit", "accepted"))
        .collect();
    backend.serve_list("events", list_json(items, 2, 12, 25)).await;

    let client = anonymous(&backend);
    let criteria = SearchCriteria::new()
        .country("India")
        .term("Mumbai", SearchType::City);
    let page = client.find_events(&criteria, PageRequest::new(2, 12)).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_items, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 12);
    assert!(page.has_next());
    assert!(page.items.iter().all(|event| event.status == EventStatus::Accepted));

    let request = &backend.requests_to(RECORDS).await[0];
    assert_eq!(
        query_param(request, "filter").unwrap(),
        r#"status = "accepted" && country ~ "India" && city ~ "Mumbai""#
    );
    assert_eq!(query_param(request, "sort").unwrap(), "-event_start_date,-created");
    assert_eq!(query_param(request, "expand").unwrap(), "submitted_by");
    assert_eq!(query_param(request, "page").unwrap(), "2");
    assert_eq!(query_param(request, "perPage").unwrap(), "12");
    assert!(request.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_list_expands_submitter() {
    let backend = FakeBackend::start().await;
    backend.serve_list("events", list_json(vec![], 1, 50, 0)).await;

    let client = anonymous(&backend);
    let page = client
        .list_events(&conference_alert_core::Filter::new(), PageRequest::first(50))
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 0);

    let request = &backend.requests_to(RECORDS).await[0];
    assert_eq!(query_param(request, "sort").unwrap(), "-created");
    assert_eq!(query_param(request, "expand").unwrap(), "submitted_by");
    assert!(query_param(request, "filter").is_none());
}

#[tokio::test]
async fn test_create_event_stamps_owner_and_pending_status() {
    let backend = FakeBackend::start().await;
    backend
        .accept_create("events", event_json("evnew1", "International Conference on Robotics", "pending"))
        .await;

    let client = signed_in(&backend);
    let created = client.create_event(&robotics_summit()).await.unwrap();

    assert_eq!(created.status, EventStatus::Pending);
    assert_eq!(created.submitted_by.unwrap().as_str(), "usr123");

    let request = &backend.requests_to(RECORDS).await[0];
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"status\"\r\n\r\npending\r\n"));
    assert!(body.contains("name=\"submitted_by\"\r\n\r\nusr123\r\n"));
    assert!(body.contains("name=\"event_keywords\"\r\n\r\n[\"robotics\",\"automation\"]\r\n"));
    assert!(body.contains("name=\"thumbnail\"; filename=\"robots.png\""));
    assert!(!body.contains("name=\"state_or_province\""));
}

#[tokio::test]
async fn test_create_event_after_logout_is_rejected_locally() {
    let backend = FakeBackend::start().await;
    let client = signed_in(&backend);

    client.logout();
    let err = client.create_event(&robotics_summit()).await.unwrap_err();

    assert_eq!(err, ClientError::NotAuthenticated);
    assert!(err.is_authorization_error());
    assert!(backend.received().await.is_empty());
}

#[tokio::test]
async fn test_create_event_requires_category() {
    let backend = FakeBackend::start().await;
    let client = signed_in(&backend);

    let mut event = robotics_summit();
    event.category = None;
    let err = client.create_event(&event).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation { ref field, .. } if field == "event_category"));
    assert!(backend.received().await.is_empty());
}

#[tokio::test]
async fn test_backend_field_errors_are_reported() {
    let backend = FakeBackend::start().await;
    backend
        .fail(
            "POST",
            RECORDS,
            400,
            "Failed to create record.",
            &[("website_address", "Must be a valid url.")],
        )
        .await;

    let client = signed_in(&backend);
    let err = client.create_event(&robotics_summit()).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Api {
            status: 400,
            message: "Failed to create record. (website_address: Must be a valid url.)".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_event_is_none() {
    let backend = FakeBackend::start().await;
    backend.missing_record("events", "ghost1").await;

    let client = anonymous(&backend);
    let id = RecordId::parse("ghost1").unwrap();
    assert!(client.get_event(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_event_by_slug() {
    let backend = FakeBackend::start().await;
    backend
        .serve_record("events", "k3m9x2q7w1p8z4r", event_json("k3m9x2q7w1p8z4r", "Global AI Summit", "accepted"))
        .await;

    let client = anonymous(&backend);
    let event = client
        .get_event_by_slug("global-ai-summit-k3m9x2q7w1p8z4r")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(event.id.as_str(), "k3m9x2q7w1p8z4r");
    assert_eq!(PocketBaseClient::event_slug(&event), "global-ai-summit-k3m9x2q7w1p8z4r");
    assert_eq!(
        client.event_thumbnail_url(&event).unwrap(),
        format!("{}/api/files/events/k3m9x2q7w1p8z4r/robots_x1y2z3.png", backend.uri())
    );

    assert!(client.get_event_by_slug("").await.unwrap().is_none());
    assert_eq!(backend.received().await.len(), 1);
}

#[tokio::test]
async fn test_user_events_require_session() {
    let backend = FakeBackend::start().await;
    let client = anonymous(&backend);

    let err = client
        .get_user_events(&RecordId::parse("usr123").unwrap(), PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::NotAuthenticated);
    assert!(backend.received().await.is_empty());
}

#[tokio::test]
async fn test_user_events_and_stats() {
    let backend = FakeBackend::start().await;
    backend
        .serve_list(
            "events",
            list_json(
                vec![
                    event_json("ev1", "A", "pending"),
                    event_json("ev2", "B", "accepted"),
                    event_json("ev3", "C", "accepted"),
                    event_json("ev4", "D", "rejected"),
                ],
                1,
                1000,
                4,
            ),
        )
        .await;

    let client = signed_in(&backend);
    let stats = client.my_event_stats().await.unwrap();

    assert_eq!((stats.total, stats.pending, stats.accepted, stats.rejected), (4, 1, 2, 1));

    let request = &backend.requests_to(RECORDS).await[0];
    assert_eq!(query_param(request, "filter").unwrap(), r#"submitted_by = "usr123""#);
    assert_eq!(
        request.headers.get("authorization").unwrap().to_str().unwrap(),
        valid_token()
    );
}

#[tokio::test]
async fn test_upcoming_uses_clock_date() {
    let backend = FakeBackend::start().await;
    backend.serve_list("events", list_json(vec![], 1, 6, 0)).await;

    let client = anonymous(&backend);
    assert!(client.upcoming_events(6).await.unwrap().is_empty());

    let request = &backend.requests_to(RECORDS).await[0];
    assert_eq!(
        query_param(request, "filter").unwrap(),
        r#"status = "accepted" && event_start_date >= "2025-01-01 00:00:00.000Z""#
    );
    assert_eq!(query_param(request, "perPage").unwrap(), "6");
    assert_eq!(query_param(request, "sort").unwrap(), "event_start_date,created");
}

#[tokio::test]
async fn test_monthly_events_window() {
    let backend = FakeBackend::start().await;
    backend.serve_list("events", list_json(vec![], 1, 50, 0)).await;

    let client = anonymous(&backend);
    let criteria = SearchCriteria::new().event_type(Some(EventType::Workshop));
    client
        .monthly_events(2024, 12, criteria, PageRequest::first(50))
        .await
        .unwrap();

    let request = &backend.requests_to(RECORDS).await[0];
    assert_eq!(
        query_param(request, "filter").unwrap(),
        concat!(
            r#"status = "accepted" && event_start_date >= "2024-12-01 00:00:00.000Z""#,
            r#" && event_start_date < "2025-01-01 00:00:00.000Z" && event_type = "Workshop""#
        )
    );

    let err = client
        .monthly_events(2024, 13, SearchCriteria::new(), PageRequest::first(50))
        .await
        .unwrap_err();
    assert!(err.is_validation_error());
}
