//! Order and item repository implementation.
//!
//! Compound mutations run inside one transaction that locks the order row
//! with `SELECT ... FOR UPDATE`, re-checks the status rule, and adjusts the
//! total in SQL. A transaction dropped before `commit` rolls back.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use orderdesk_core::error::{AppError, ErrorKind};
use orderdesk_core::result::AppResult;
use orderdesk_core::types::PageRequest;
use orderdesk_entity::item::{Item, NewItem};
use orderdesk_entity::order::{Order, OrderStatus};

use crate::store::OrderStore;

/// Repository for orders and their items.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn lock_order(tx: &mut Transaction<'static, Postgres>, id: Uuid) -> AppResult<Order> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock order", e))?
            .ok_or_else(|| AppError::not_found("Order not found"))
    }

    async fn adjust_total(
        tx: &mut Transaction<'static, Postgres>,
        id: Uuid,
        delta: Decimal,
    ) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET total = total + $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(delta)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update order total", e))
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn create(&self, user_id: Uuid) -> AppResult<Order> {
        let order = Order::new_pending(user_id);
        sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, status, user_id, total, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(order.id)
        .bind(order.status)
        .bind(order.user_id)
        .bind(order.total)
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found("User not found")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create order", e),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find order", e))
    }

    async fn find_item(&self, item_id: Uuid) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    async fn items_for_orders(&self, order_ids: &[Uuid]) -> AppResult<Vec<Item>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE order_id = ANY($1) ORDER BY created_at ASC, id ASC",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load order items", e))
    }

    async fn list(&self, page: &PageRequest) -> AppResult<Vec<Order>> {
        sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list orders", e))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>> {
        sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list orders for user", e)
        })
    }

    async fn add_item(&self, order_id: Uuid, new: NewItem) -> AppResult<(Order, Item)> {
        let mut tx = self.begin().await?;

        let order = Self::lock_order(&mut tx, order_id).await?;
        order.status.ensure_accepts_items()?;

        let item = Item::from_new(order_id, new);
        let line_total = item.line_total()?;
        order.adjusted_total(line_total)?;

        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO items (id, order_id, name, quantity, flavor, size, unit_price, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(item.id)
        .bind(item.order_id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.flavor)
        .bind(&item.size)
        .bind(item.unit_price)
        .bind(item.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert item", e))?;

        let order = Self::adjust_total(&mut tx, order_id, line_total).await?;
        Self::commit(tx).await?;

        debug!(order_id = %order.id, item_id = %item.id, total = %order.total, "Item inserted");
        Ok((order, item))
    }

    async fn remove_item(&self, item_id: Uuid) -> AppResult<(Order, Item)> {
        let mut tx = self.begin().await?;

        let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1 FOR UPDATE")
            .bind(item_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock item", e))?
            .ok_or_else(|| AppError::not_found("Item not found"))?;

        let order = Self::lock_order(&mut tx, item.order_id).await?;
        order.status.ensure_accepts_items()?;

        let line_total = item.line_total()?;
        order.adjusted_total(-line_total)?;

        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;

        let order = Self::adjust_total(&mut tx, order.id, -line_total).await?;
        Self::commit(tx).await?;

        debug!(order_id = %order.id, item_id = %item.id, total = %order.total, "Item deleted");
        Ok((order, item))
    }

    async fn transition(&self, order_id: Uuid, target: OrderStatus) -> AppResult<Order> {
        let mut tx = self.begin().await?;

        let order = Self::lock_order(&mut tx, order_id).await?;
        let next = order.status.transition_to(target)?;
        if next == order.status {
            return Ok(order);
        }

        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(order_id)
        .bind(next)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update order status", e)
        })?;

        Self::commit(tx).await?;
        Ok(order)
    }
}
