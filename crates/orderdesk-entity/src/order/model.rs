//! Order entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use orderdesk_core::error::AppError;

use super::status::OrderStatus;
use crate::item::Item;

/// An order owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    /// Unique order identifier.
    pub id: Uuid,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Owning user.
    pub user_id: Uuid,
    /// Running sum of `unit_price * quantity` over the order's items.
    pub total: Decimal,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a fresh pending order with a zero total.
    pub fn new_pending(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            status: OrderStatus::Pending,
            user_id,
            total: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// The total after adding `delta` (negative to shrink it).
    ///
    /// Fails with a validation error on overflow or when the result would be
    /// negative.
    pub fn adjusted_total(&self, delta: Decimal) -> Result<Decimal, AppError> {
        let next = self
            .total
            .checked_add(delta)
            .ok_or_else(|| AppError::validation("Order total is out of range"))?;
        if next < Decimal::ZERO {
            return Err(AppError::validation(
                "Removing this item would make the order total negative",
            ));
        }
        Ok(next)
    }

    /// Check whether `user_id` owns this order.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// An order together with its items, as returned by read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    /// The order row.
    #[serde(flatten)]
    pub order: Order,
    /// Items attached to the order.
    pub items: Vec<Item>,
}

impl OrderDetail {
    /// Pair an order with its items.
    pub fn new(order: Order, items: Vec<Item>) -> Self {
        Self { order, items }
    }
}
