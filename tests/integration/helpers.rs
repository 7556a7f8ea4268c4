//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use orderdesk_api::{AppState, build_app};
use orderdesk_core::config::{AppConfig, OrderPolicyRule};
use orderdesk_database::{MemoryStore, Stores, UserStore};

/// Password used by every helper-created account.
pub const PASSWORD: &str = "abcd1234";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct flag changes
    pub store: MemoryStore,
}

impl TestApp {
    /// Create a new test application with the default order policy
    pub fn new() -> Self {
        Self::with_policy(OrderPolicyRule::default())
    }

    /// Create a new test application with `rule`
    pub fn with_policy(rule: OrderPolicyRule) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.order_policy = rule;

        let store = MemoryStore::new();
        let state = AppState::new(config, Stores::memory(store.clone()))
            .expect("Failed to build app state");

        Self {
            router: build_app(state),
            store,
        }
    }

    /// Register a user through the API and return their ID
    pub async fn signup(&self, email: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/auth/signup",
                Some(serde_json::json!({
                    "name": "Test User",
                    "email": email,
                    "password": PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Signup failed: {:?}",
            response.body
        );

        response.body["user_id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No user_id in signup response")
    }

    /// Register a user and grant admin directly in the store
    pub async fn signup_admin(&self, email: &str) -> Uuid {
        let id = self.signup(email).await;
        self.store
            .set_admin(id, true)
            .await
            .expect("Failed to grant admin");
        id
    }

    /// Sign in and return the full token response
    pub async fn signin(&self, email: &str, password: &str) -> TestResponse {
        self.request_form(
            "/auth/token",
            &format!("username={email}&password={password}"),
        )
        .await
    }

    /// Sign in and return the access token
    pub async fn login(&self, email: &str) -> String {
        let response = self.signin(email, PASSWORD).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Create an order for `user_id` and return its ID
    pub async fn create_order(&self, token: &str, user_id: Uuid) -> Uuid {
        let response = self
            .request(
                "POST",
                "/orders/",
                Some(serde_json::json!({ "user_uid": user_id })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Create order failed: {:?}",
            response.body
        );

        response.body["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("No id in order response")
    }

    /// Make a JSON HTTP request to the test app
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

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a form-encoded POST request to the test app
    pub async fn request_form(&self, path: &str, form: &str) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}
