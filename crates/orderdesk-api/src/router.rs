//! Route definitions for the OrderDesk HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the request logger.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(order_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Signup, signin, refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/token", post(handlers::auth::token))
        .route("/auth/refresh", get(handlers::auth::refresh))
}

/// Order lifecycle; every route requires a bearer token
fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/orders/",
            post(handlers::order::create_order).get(handlers::order::list_orders),
        )
        .route(
            "/orders",
            post(handlers::order::create_order).get(handlers::order::list_orders),
        )
        .route(
            "/orders/cancel/{order_id}",
            get(handlers::order::cancel_order),
        )
        .route(
            "/orders/add-item/{order_id}",
            post(handlers::order::add_item),
        )
        .route(
            "/orders/remove-item/{item_id}",
            delete(handlers::order::remove_item),
        )
        .route(
            "/orders/complete/{order_id}",
            post(handlers::order::complete_order),
        )
        .route("/orders/user-orders", get(handlers::order::user_orders))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
