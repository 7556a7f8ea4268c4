//! Integration tests for the order lifecycle.

use http::StatusCode;
use uuid::Uuid;

use orderdesk_core::config::OrderPolicyRule;

use crate::helpers::TestApp;

fn cola() -> serde_json::Value {
    serde_json::json!({ "name": "cola", "quantity": 2, "unit_price": 1.5 })
}

#[tokio::test]
async fn test_admin_order_total_round_trip() {
    let app = TestApp::new();
    let admin_id = app.signup_admin("admin@x.com").await;
    let token = app.login("admin@x.com").await;

    let order_id = app.create_order(&token, admin_id).await;

    let response = app
        .request(
            "POST",
            &format!("/orders/add-item/{order_id}"),
            Some(cola()),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["message"],
        format!("Item added to order {order_id} successfully!")
    );

    let orders = app
        .request("GET", "/orders/user-orders", None, Some(&token))
        .await;
    assert_eq!(orders.status, StatusCode::OK);
    let order = &orders.body[0];
    assert_eq!(order["total"], 3.0);
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["items"][0]["name"], "cola");
    assert_eq!(order["items"][0]["flavor"], "");

    let item_id = order["items"][0]["id"].as_str().unwrap().to_string();
    let response = app
        .request(
            "DELETE",
            &format!("/orders/remove-item/{item_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let orders = app
        .request("GET", "/orders/user-orders", None, Some(&token))
        .await;
    assert_eq!(orders.body[0]["total"], 0.0);
    assert_eq!(orders.body[0]["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_non_admin_cannot_list_all() {
    let app = TestApp::new();
    app.signup("user@x.com").await;
    let token = app.login("user@x.com").await;

    let response = app.request("GET", "/orders/", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_lists_with_window() {
    let app = TestApp::new();
    let admin_id = app.signup_admin("admin@x.com").await;
    let token = app.login("admin@x.com").await;

    for _ in 0..3 {
        app.create_order(&token, admin_id).await;
    }

    let response = app.request("GET", "/orders/", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 3);

    let response = app
        .request("GET", "/orders/?offset=1&limit=1", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancel_then_add_item_rejected() {
    let app = TestApp::new();
    let admin_id = app.signup_admin("admin@x.com").await;
    let token = app.login("admin@x.com").await;
    let order_id = app.create_order(&token, admin_id).await;

    let response = app
        .request(
            "GET",
            &format!("/orders/cancel/{order_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["order"]["status"], "CANCELLED");
    assert_eq!(
        response.body["message"],
        format!("Order {order_id} cancelled successfully!")
    );

    let response = app
        .request(
            "POST",
            &format!("/orders/add-item/{order_id}"),
            Some(cola()),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_TRANSITION");

    let response = app
        .request(
            "POST",
            &format!("/orders/complete/{order_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_returns_order() {
    let app = TestApp::new();
    let admin_id = app.signup_admin("admin@x.com").await;
    let token = app.login("admin@x.com").await;
    let order_id = app.create_order(&token, admin_id).await;

    let response = app
        .request(
            "POST",
            &format!("/orders/complete/{order_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], order_id.to_string());
    assert_eq!(response.body["status"], "COMPLETED");
}

#[tokio::test]
async fn test_cancel_errors_use_status_codes() {
    let app = TestApp::new();
    let admin_id = app.signup_admin("admin@x.com").await;
    let admin_token = app.login("admin@x.com").await;
    app.signup("user@x.com").await;
    let user_token = app.login("user@x.com").await;

    let response = app
        .request(
            "GET",
            &format!("/orders/cancel/{}", Uuid::new_v4()),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let order_id = app.create_order(&admin_token, admin_id).await;
    let response = app
        .request(
            "GET",
            &format!("/orders/cancel/{order_id}"),
            None,
            Some(&user_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_without_admin_is_forbidden_by_default() {
    let app = TestApp::new();
    let user_id = app.signup("user@x.com").await;
    let token = app.login("user@x.com").await;
    let order_id = app.create_order(&token, user_id).await;

    let response = app
        .request(
            "POST",
            &format!("/orders/add-item/{order_id}"),
            Some(cola()),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_allowed_under_admin_or_owner() {
    let app = TestApp::with_policy(OrderPolicyRule::AdminOrOwner);
    let user_id = app.signup("user@x.com").await;
    let token = app.login("user@x.com").await;
    let order_id = app.create_order(&token, user_id).await;

    let response = app
        .request(
            "POST",
            &format!("/orders/add-item/{order_id}"),
            Some(cola()),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_orders_empty_is_not_found() {
    let app = TestApp::new();
    app.signup("user@x.com").await;
    let token = app.login("user@x.com").await;

    let response = app
        .request("GET", "/orders/user-orders", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "No orders found for this user");
}

#[tokio::test]
async fn test_remove_unknown_item() {
    let app = TestApp::new();
    app.signup_admin("admin@x.com").await;
    let token = app.login("admin@x.com").await;

    let response = app
        .request(
            "DELETE",
            &format!("/orders/remove-item/{}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_any_user_can_create_order_for_existing_user() {
    let app = TestApp::new();
    let admin_id = app.signup_admin("admin@x.com").await;
    app.signup("user@x.com").await;
    let token = app.login("user@x.com").await;

    let order_id = app.create_order(&token, admin_id).await;
    let admin_token = app.login("admin@x.com").await;
    let orders = app
        .request("GET", "/orders/user-orders", None, Some(&admin_token))
        .await;
    assert_eq!(orders.status, StatusCode::OK);
    assert_eq!(orders.body[0]["id"], order_id.to_string());

    let response = app
        .request(
            "POST",
            "/orders/",
            Some(serde_json::json!({ "user_uid": Uuid::new_v4() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_item_rejected() {
    let app = TestApp::new();
    let admin_id = app.signup_admin("admin@x.com").await;
    let token = app.login("admin@x.com").await;
    let order_id = app.create_order(&token, admin_id).await;

    let response = app
        .request(
            "POST",
            &format!("/orders/add-item/{order_id}"),
            Some(serde_json::json!({ "name": "gold", "quantity": 1, "unit_price": 1000000001.0 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let orders = app
        .request("GET", "/orders/user-orders", None, Some(&token))
        .await;
    assert_eq!(orders.body[0]["total"], 0.0);
    assert!(orders.body[0]["items"].as_array().unwrap().is_empty());
}
