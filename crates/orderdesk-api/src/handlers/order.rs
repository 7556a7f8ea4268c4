//! Order handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use orderdesk_entity::order::OrderDetail;

use crate::dto::request::{AddItemBody, CreateOrderBody, validate_body};
use crate::dto::response::{CancelResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /orders/
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateOrderBody>,
) -> ApiResult<Json<OrderDetail>> {
    let order = state.orders.create(auth.context(), body.user_uid).await?;
    Ok(Json(order))
}

/// GET /orders/cancel/{order_id}
pub async fn cancel_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> ApiResult<Json<CancelResponse>> {
    let order = state.orders.cancel(auth.context(), order_id).await?;
    Ok(Json(CancelResponse {
        message: format!("Order {order_id} cancelled successfully!"),
        order,
    }))
}

/// GET /orders/?offset&limit
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<Vec<OrderDetail>>> {
    let orders = state
        .orders
        .list(auth.context(), params.into_page_request())
        .await?;
    Ok(Json(orders))
}

/// POST /orders/add-item/{order_id}
pub async fn add_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
    Json(body): Json<AddItemBody>,
) -> ApiResult<Json<MessageResponse>> {
    validate_body(&body)?;
    state
        .orders
        .add_item(auth.context(), order_id, body.into())
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Item added to order {order_id} successfully!"
    ))))
}

/// DELETE /orders/remove-item/{item_id}
pub async fn remove_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let order = state.orders.remove_item(auth.context(), item_id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Item {item_id} removed from order {} successfully!",
        order.id
    ))))
}

/// POST /orders/complete/{order_id}
pub async fn complete_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> ApiResult<Json<OrderDetail>> {
    let order = state.orders.complete(auth.context(), order_id).await?;
    Ok(Json(order))
}

/// GET /orders/user-orders
pub async fn user_orders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<OrderDetail>>> {
    let orders = state.orders.list_for_user(auth.context()).await?;
    Ok(Json(orders))
}
