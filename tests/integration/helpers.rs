//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::middleware::{self, Next};
use http::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

use taskhub_core::config::AppConfig;

/// Access token signing secret used by every test app.
pub const ACCESS_SECRET: &str = "integration-access-secret";
/// Refresh token signing secret used by every test app.
pub const REFRESH_SECRET: &str = "integration-refresh-secret";

/// Seed account present in the demo directory.
pub const USER_EMAIL: &str = "user@cnss.bj";
/// Seed admin account present in the demo directory.
pub const ADMIN_EMAIL: &str = "admin@cnss.bj";
/// Password shared by all seed accounts.
pub const PASSWORD: &str = "password123";

/// Configuration with known signing secrets.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.access_secret = ACCESS_SECRET.to_string();
    config.auth.refresh_secret = REFRESH_SECRET.to_string();
    config
}

#[derive(serde::Serialize)]
struct StaleClaims {
    id: i64,
    email: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Well-formed access token signed with the test secret but expired an
/// hour ago, past any verification leeway.
pub fn expired_access_token(id: i64, email: &str, role: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = StaleClaims {
        id,
        email: email.to_string(),
        role: role.to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(ACCESS_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application with the seeded demo directory.
    pub fn new() -> Self {
        let state = taskhub_api::app::build_state(test_config()).expect("Failed to build state");
        Self {
            router: taskhub_api::app::build_app(state),
        }
    }

    /// Login as a seed account and return the (access, refresh) pair.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let access = response.body["accessToken"]
            .as_str()
            .expect("No accessToken in login response")
            .to_string();
        let refresh = response.body["refreshToken"]
            .as_str()
            .expect("No refreshToken in login response")
            .to_string();
        (access, refresh)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = http::Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `code` field of an error body.
    pub fn error_code(&self) -> &str {
        self.body["code"].as_str().unwrap_or("")
    }
}

/// Start a real HTTP server on an ephemeral port for client-side tests.
///
/// Returns the base URL and a counter of `/api/auth/refresh` hits so tests
/// can assert how many renewal requests actually reached the server.
pub async fn spawn_server() -> (String, Arc<AtomicUsize>) {
    let state = taskhub_api::app::build_state(test_config()).expect("Failed to build state");
    let refresh_calls = Arc::new(AtomicUsize::new(0));

    let count = Arc::clone(&refresh_calls);
    let app = taskhub_api::app::build_app(state).layer(middleware::from_fn(
        move |req: Request, next: Next| {
            let count = Arc::clone(&count);
            async move {
                if req.uri().path() == "/api/auth/refresh" {
                    count.fetch_add(1, Ordering::SeqCst);
                }
                next.run(req).await
            }
        },
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            panic!("Test server error: {e}");
        }
    });

    (format!("http://{addr}"), refresh_calls)
}
