//! Persistence traits implemented by the PostgreSQL repositories and the
//! in-memory store.
//!
//! Services hold these as `Arc<dyn ...>` handles constructed at startup.
//! Every compound mutation on [`OrderStore`] is a single unit of work: it
//! either commits completely or leaves no trace.

use async_trait::async_trait;
use uuid::Uuid;

use orderdesk_core::result::AppResult;
use orderdesk_core::types::PageRequest;
use orderdesk_entity::item::{Item, NewItem};
use orderdesk_entity::order::{Order, OrderStatus};
use orderdesk_entity::user::{CreateUser, User};

/// User table access.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users ordered by creation time.
    async fn find_all(&self, page: &PageRequest) -> AppResult<Vec<User>>;

    /// Insert a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Set the admin flag. Fails with `NotFound` for an unknown id.
    async fn set_admin(&self, id: Uuid, admin: bool) -> AppResult<User>;

    /// Set the active flag. Fails with `NotFound` for an unknown id.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User>;
}

/// Order and item table access.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Insert a pending order with a zero total for `user_id`.
    ///
    /// Fails with `NotFound` when the user does not exist.
    async fn create(&self, user_id: Uuid) -> AppResult<Order>;

    /// Find an order by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// Find an item by primary key.
    async fn find_item(&self, item_id: Uuid) -> AppResult<Option<Item>>;

    /// Items attached to any of `order_ids`, oldest first.
    async fn items_for_orders(&self, order_ids: &[Uuid]) -> AppResult<Vec<Item>>;

    /// All orders, oldest first, windowed by `page`.
    async fn list(&self, page: &PageRequest) -> AppResult<Vec<Order>>;

    /// Orders owned by `user_id`, oldest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>>;

    /// Attach an item and add its line total to the order total.
    ///
    /// Fails with `NotFound` when the order is missing and with
    /// `InvalidTransition` when the order is cancelled.
    async fn add_item(&self, order_id: Uuid, item: NewItem) -> AppResult<(Order, Item)>;

    /// Delete an item and subtract its line total from the order total.
    ///
    /// Fails with `NotFound` when the item or its order is missing, with
    /// `InvalidTransition` when the order is cancelled, and with
    /// `Validation` when the total would drop below zero.
    async fn remove_item(&self, item_id: Uuid) -> AppResult<(Order, Item)>;

    /// Move the order to `target`, enforcing [`OrderStatus::transition_to`].
    async fn transition(&self, order_id: Uuid, target: OrderStatus) -> AppResult<Order>;
}
