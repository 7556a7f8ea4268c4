//! Item entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use orderdesk_core::error::AppError;

/// Largest quantity accepted for a single item.
pub const MAX_QUANTITY: i32 = 1_000_000;

/// Largest unit price accepted for a single item.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// `unit_price * quantity`, failing instead of overflowing.
fn checked_line_total(unit_price: Decimal, quantity: i32) -> Result<Decimal, AppError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| AppError::validation("Item line total is out of range"))
}

/// A line item attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: Uuid,
    /// Parent order.
    pub order_id: Uuid,
    /// Product name.
    pub name: String,
    /// Number of units.
    pub quantity: i32,
    /// Flavor variant (may be empty).
    pub flavor: String,
    /// Size variant (may be empty).
    pub size: String,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// When the item was attached.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Build an item row for `order_id` from the submitted fields.
    pub fn from_new(order_id: Uuid, new: NewItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            name: new.name,
            quantity: new.quantity,
            flavor: new.flavor,
            size: new.size,
            unit_price: new.unit_price,
            created_at: Utc::now(),
        }
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Result<Decimal, AppError> {
        checked_line_total(self.unit_price, self.quantity)
    }
}

/// Fields submitted when attaching an item to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    /// Product name.
    pub name: String,
    /// Number of units.
    #[serde(default)]
    pub quantity: i32,
    /// Flavor variant.
    #[serde(default)]
    pub flavor: String,
    /// Size variant.
    #[serde(default)]
    pub size: String,
    /// Price of one unit.
    #[serde(default)]
    pub unit_price: Decimal,
}

impl NewItem {
    /// Rejects blank names, and quantities or prices that are negative or
    /// above [`MAX_QUANTITY`] / [`MAX_UNIT_PRICE`].
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Item name is required"));
        }
        if self.quantity < 0 {
            return Err(AppError::validation("Item quantity cannot be negative"));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(AppError::validation("Item unit price cannot be negative"));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(AppError::validation(format!(
                "Item quantity cannot exceed {MAX_QUANTITY}"
            )));
        }
        if self.unit_price > MAX_UNIT_PRICE {
            return Err(AppError::validation(format!(
                "Item unit price cannot exceed {MAX_UNIT_PRICE}"
            )));
        }
        Ok(())
    }

    /// `unit_price * quantity` of the item that would be created.
    pub fn line_total(&self) -> Result<Decimal, AppError> {
        checked_line_total(self.unit_price, self.quantity)
    }
}
