//! Integration tests for signup, signin, and refresh.

use http::StatusCode;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_signup_then_duplicate() {
    let app = TestApp::new();
    app.signup("a@x.com").await;

    let response = app
        .request(
            "POST",
            "/auth/signup",
            Some(serde_json::json!({
                "name": "Someone Else",
                "email": "a@x.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Email already registered");
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/signup",
            Some(serde_json::json!({
                "name": "Al",
                "email": "not-an-email",
                "password": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            "/auth/signup",
            Some(serde_json::json!({
                "name": "Alice",
                "email": "alice@x.com",
                "password": "short",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signin_success_shape() {
    let app = TestApp::new();
    let user_id = app.signup("a@x.com").await;

    let response = app.signin("a@x.com", PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access_token"].is_string());
    assert_eq!(response.body["token_type"], "bearer");
    assert_eq!(response.body["data"]["user_id"], user_id.to_string());
    assert_eq!(response.body["data"]["email"], "a@x.com");
    assert!(response.body["refresh_token"]["access_token"].is_string());
    assert_eq!(response.body["refresh_token"]["token_type"], "bearer");
}

#[tokio::test]
async fn test_signin_wrong_password() {
    let app = TestApp::new();
    app.signup("a@x.com").await;

    let response = app.signin("a@x.com", "wrong1234").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers.get("www-authenticate").unwrap(), "Bearer");

    let response = app.signin("nobody@x.com", PASSWORD).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh() {
    let app = TestApp::new();
    app.signup("a@x.com").await;

    let signin = app.signin("a@x.com", PASSWORD).await;
    let refresh_token = signin.body["refresh_token"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request("GET", "/auth/refresh", None, Some(&refresh_token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "a@x.com");
    assert!(response.body["data"].get("user_id").is_none());
    assert!(response.body["access_token"].is_string());
}

#[tokio::test]
async fn test_invalid_tokens_rejected() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/auth/refresh", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/orders/user-orders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/orders/user-orders", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_user_blocked_from_orders() {
    use orderdesk_database::UserStore;

    let app = TestApp::new();
    let id = app.signup("a@x.com").await;
    let token = app.login("a@x.com").await;
    app.store.set_active(id, false).await.unwrap();

    let response = app
        .request("GET", "/orders/user-orders", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Inactive user");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
