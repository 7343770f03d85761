//! Simulated identity provider on a local wiremock server.

use backend_test_support::tokens::jwks_json;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MGMT_TOKEN: &str = "mgmt-token-123";

pub struct MockIdp {
    pub server: MockServer,
}

#[allow(dead_code)]
impl MockIdp {
    /// Provider that publishes the fixture JWKS.
    pub async fn start() -> Self {
        let idp = Self::start_without_keys().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_json()))
            .named("jwks")
            .mount(&idp.server)
            .await;
        idp
    }

    /// Provider with nothing mounted; unmatched requests get 404.
    pub async fn start_without_keys() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Client-credentials exchange answering `status`, expected `times` times.
    pub async fn token_exchange(&self, status: u16, times: u64) {
        let template = if status == 200 {
            ResponseTemplate::new(200).set_body_json(json!({
                "access_token": MGMT_TOKEN,
                "token_type": "Bearer",
                "expires_in": 86400
            }))
        } else {
            ResponseTemplate::new(status).set_body_json(json!({ "error": "access_denied" }))
        };

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(template)
            .expect(times)
            .named("token exchange")
            .mount(&self.server)
            .await;
    }

    /// `GET /api/v2/users/{subject}` answering `status` with `body`.
    pub async fn get_user(
        &self,
        subject: &str,
        status: u16,
        body: serde_json::Value,
        times: u64,
    ) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/users/{subject}")))
            .and(header("authorization", format!("Bearer {MGMT_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(times)
            .named("get user")
            .mount(&self.server)
            .await;
    }

    /// `PATCH /api/v2/users/{subject}` expecting exactly `name` and `email`.
    pub async fn patch_user(
        &self,
        subject: &str,
        name: &str,
        email: &str,
        status: u16,
        times: u64,
    ) {
        let patch = json!({ "name": name, "email": email });
        let template = if status == 200 {
            ResponseTemplate::new(200).set_body_json(json!({
                "user_id": subject,
                "name": name,
                "email": email
            }))
        } else {
            ResponseTemplate::new(status)
        };

        Mock::given(method("PATCH"))
            .and(path(format!("/api/v2/users/{subject}")))
            .and(header("authorization", format!("Bearer {MGMT_TOKEN}").as_str()))
            .and(body_json(patch))
            .respond_with(template)
            .expect(times)
            .named("patch user")
            .mount(&self.server)
            .await;
    }
}
