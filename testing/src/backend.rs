//! Fake backend for client tests.

use crate::fixtures::{auth_json, error_json};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// An HTTP server answering like the backend's REST API.
///
/// Each helper mounts one route. Unmounted routes answer 404.
pub struct FakeBackend {
    server: MockServer,
}

impl FakeBackend {
    /// Start a server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Origin to point the client at.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Underlying server, for custom mocks.
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// `auth-with-password` on `collection` succeeds with `token` and `record`.
    pub async fn accept_login(&self, collection: &str, token: &str, record: &Value) {
        self.respond(
            "POST",
            &format!("/api/collections/{collection}/auth-with-password"),
            ResponseTemplate::new(200).set_body_json(auth_json(token, record)),
        )
        .await;
    }

    /// `auth-with-password` on `collection` fails the way a wrong password does.
    pub async fn reject_login(&self, collection: &str) {
        self.respond(
            "POST",
            &format!("/api/collections/{collection}/auth-with-password"),
            ResponseTemplate::new(400).set_body_json(error_json(400, "Failed to authenticate.", &[])),
        )
        .await;
    }

    /// Listing `collection` returns `body`.
    pub async fn serve_list(&self, collection: &str, body: Value) {
        self.respond(
            "GET",
            &format!("/api/collections/{collection}/records"),
            ResponseTemplate::new(200).set_body_json(body),
        )
        .await;
    }

    /// Viewing `id` in `collection` returns `body`.
    pub async fn serve_record(&self, collection: &str, id: &str, body: Value) {
        self.respond(
            "GET",
            &format!("/api/collections/{collection}/records/{id}"),
            ResponseTemplate::new(200).set_body_json(body),
        )
        .await;
    }

    /// Viewing `id` in `collection` is a 404.
    pub async fn missing_record(&self, collection: &str, id: &str) {
        self.respond(
            "GET",
            &format!("/api/collections/{collection}/records/{id}"),
            ResponseTemplate::new(404).set_body_json(error_json(
                404,
                "The requested resource wasn't found.",
                &[],
            )),
        )
        .await;
    }

    /// Creating a record in `collection` returns `body`.
    pub async fn accept_create(&self, collection: &str, body: Value) {
        self.respond(
            "POST",
            &format!("/api/collections/{collection}/records"),
            ResponseTemplate::new(200).set_body_json(body),
        )
        .await;
    }

    /// Updating `id` in `collection` returns `body`.
    pub async fn accept_update(&self, collection: &str, id: &str, body: Value) {
        self.respond(
            "PATCH",
            &format!("/api/collections/{collection}/records/{id}"),
            ResponseTemplate::new(200).set_body_json(body),
        )
        .await;
    }

    /// Verification emails are accepted.
    pub async fn accept_verification(&self) {
        self.respond(
            "POST",
            "/api/collections/users/request-verification",
            ResponseTemplate::new(204),
        )
        .await;
    }

    /// `verb route` fails with `status` and an error body.
    pub async fn fail(&self, verb: &str, route: &str, status: u16, message: &str, fields: &[(&str, &str)]) {
        self.respond(
            verb,
            route,
            ResponseTemplate::new(status).set_body_json(error_json(status, message, fields)),
        )
        .await;
    }

    /// Every request received so far.
    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Requests received for `route`.
    pub async fn requests_to(&self, route: &str) -> Vec<Request> {
        self.received()
            .await
            .into_iter()
            .filter(|request| request.url.path() == route)
            .collect()
    }

    async fn respond(&self, verb: &str, route: &str, response: ResponseTemplate) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }
}

/// Value of query parameter `name` on `request`.
#[must_use]
pub fn query_param(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::{list_json, user_json};

    #[tokio::test]
    async fn test_serves_mounted_routes_only() {
        let backend = FakeBackend::start().await;
        backend.serve_list("events", list_json(vec![], 1, 20, 0)).await;

        let http = reqwest::Client::new();
        let listed = http
            .get(format!("{}/api/collections/events/records?page=1", backend.uri()))
            .send()
            .await
            .unwrap();
        assert_eq!(listed.status().as_u16(), 200);

        let unknown = http
            .get(format!("{}/api/collections/blogs/records", backend.uri()))
            .send()
            .await
            .unwrap();
        assert_eq!(unknown.status().as_u16(), 404);

        let requests = backend.requests_to("/api/collections/events/records").await;
        assert_eq!(requests.len(), 1);
        assert_eq!(query_param(&requests[0], "page").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_login_route() {
        let backend = FakeBackend::start().await;
        backend
            .accept_login("users", "tok", &user_json("usr123", "ada@example.com"))
            .await;

        let body: Value = reqwest::Client::new()
            .post(format!("{}/api/collections/users/auth-with-password", backend.uri()))
            .json(&serde_json::json!({"identity": "ada@example.com", "password": "pw"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["token"], "tok");
    }
}
