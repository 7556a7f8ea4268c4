//! Order lifecycle: creation, item changes, status transitions, and reads.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use orderdesk_auth::policy::{OrderAction, OrderPolicy};
use orderdesk_core::error::AppError;
use orderdesk_core::types::PageRequest;
use orderdesk_database::{OrderStore, UserStore};
use orderdesk_entity::item::NewItem;
use orderdesk_entity::order::{Order, OrderDetail, OrderStatus};

use crate::context::RequestContext;

/// Drives orders through PENDING → COMPLETED | CANCELLED.
#[derive(Clone)]
pub struct OrderService {
    /// Order and item store.
    orders: Arc<dyn OrderStore>,
    /// User store, for owner lookups.
    users: Arc<dyn UserStore>,
    /// Ownership rule for mutations.
    policy: OrderPolicy,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl OrderService {
    /// Creates a new order service.
    pub fn new(orders: Arc<dyn OrderStore>, users: Arc<dyn UserStore>, policy: OrderPolicy) -> Self {
        Self {
            orders,
            users,
            policy,
        }
    }

    /// Opens a pending order with a zero total for `user_id`.
    ///
    /// Any authenticated user may open an order for any existing user.
    pub async fn create(&self, ctx: &RequestContext, user_id: Uuid) -> Result<OrderDetail, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let order = self.orders.create(user_id).await?;

        info!(
            order_id = %order.id,
            owner_id = %user_id,
            actor_id = %ctx.user_id(),
            "Order created"
        );

        Ok(OrderDetail::new(order, Vec::new()))
    }

    /// Attaches an item and grows the total by its line total.
    pub async fn add_item(
        &self,
        ctx: &RequestContext,
        order_id: Uuid,
        item: NewItem,
    ) -> Result<Order, AppError> {
        item.validate()?;

        let order = self.get_order(order_id).await?;
        order.status.ensure_accepts_items()?;
        self.policy.authorize(&ctx.user, &order, OrderAction::AddItem)?;

        let (order, item) = self.orders.add_item(order_id, item).await?;

        info!(
            order_id = %order.id,
            item_id = %item.id,
            total = %order.total,
            actor_id = %ctx.user_id(),
            "Item added to order"
        );

        Ok(order)
    }

    /// Deletes an item and shrinks its order's total by its line total.
    pub async fn remove_item(&self, ctx: &RequestContext, item_id: Uuid) -> Result<Order, AppError> {
        let item = self
            .orders
            .find_item(item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))?;

        let order = self.get_order(item.order_id).await?;
        order.status.ensure_accepts_items()?;
        self.policy.authorize(&ctx.user, &order, OrderAction::RemoveItem)?;

        let (order, item) = self.orders.remove_item(item_id).await?;

        info!(
            order_id = %order.id,
            item_id = %item.id,
            total = %order.total,
            actor_id = %ctx.user_id(),
            "Item removed from order"
        );

        Ok(order)
    }

    /// Moves the order to CANCELLED.
    pub async fn cancel(&self, ctx: &RequestContext, order_id: Uuid) -> Result<OrderDetail, AppError> {
        self.transition(ctx, order_id, OrderStatus::Cancelled, OrderAction::Cancel)
            .await
    }

    /// Moves the order to COMPLETED.
    pub async fn complete(&self, ctx: &RequestContext, order_id: Uuid) -> Result<OrderDetail, AppError> {
        self.transition(ctx, order_id, OrderStatus::Completed, OrderAction::Complete)
            .await
    }

    /// Every order, oldest first. Admin only.
    pub async fn list(&self, ctx: &RequestContext, page: PageRequest) -> Result<Vec<OrderDetail>, AppError> {
        self.policy.require_admin(&ctx.user)?;

        let orders = self.orders.list(&page).await?;
        self.with_items(orders).await
    }

    /// The caller's own orders. An empty result is reported as `NotFound`.
    pub async fn list_for_user(&self, ctx: &RequestContext) -> Result<Vec<OrderDetail>, AppError> {
        let orders = self.orders.list_for_user(ctx.user_id()).await?;
        if orders.is_empty() {
            return Err(AppError::not_found("No orders found for this user"));
        }
        self.with_items(orders).await
    }

    async fn transition(
        &self,
        ctx: &RequestContext,
        order_id: Uuid,
        target: OrderStatus,
        action: OrderAction,
    ) -> Result<OrderDetail, AppError> {
        let order = self.get_order(order_id).await?;
        self.policy.authorize(&ctx.user, &order, action)?;
        order.status.transition_to(target)?;

        let order = self.orders.transition(order_id, target).await?;

        info!(
            order_id = %order.id,
            status = %order.status,
            actor_id = %ctx.user_id(),
            "Order status changed"
        );

        let mut details = self.with_items(vec![order]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::internal("Order vanished while loading items"))
    }

    async fn get_order(&self, order_id: Uuid) -> Result<Order, AppError> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))
    }

    async fn with_items(&self, orders: Vec<Order>) -> Result<Vec<OrderDetail>, AppError> {
        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let mut by_order: HashMap<Uuid, Vec<_>> = HashMap::new();
        for item in self.orders.items_for_orders(&ids).await? {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderDetail::new(order, items)
            })
            .collect())
    }
}
