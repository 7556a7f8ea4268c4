//! In-memory store using a Tokio mutex, for tests and single-process runs.
//!
//! Tables are arena-style maps keyed by id, with explicit foreign-key
//! fields. Each operation validates everything it needs before its first
//! write while holding the lock, so a failed operation leaves no trace.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use orderdesk_core::error::AppError;
use orderdesk_core::result::AppResult;
use orderdesk_core::types::PageRequest;
use orderdesk_entity::item::{Item, NewItem};
use orderdesk_entity::order::{Order, OrderStatus};
use orderdesk_entity::user::{CreateUser, User};

use crate::store::{OrderStore, UserStore};

/// A table keyed by id that remembers insertion order.
#[derive(Debug)]
struct Table<T> {
    rows: HashMap<Uuid, T>,
    order: Vec<Uuid>,
}

impl<T: Clone> Table<T> {
    fn get(&self, id: &Uuid) -> Option<&T> {
        self.rows.get(id)
    }

    fn get_mut(&mut self, id: &Uuid) -> Option<&mut T> {
        self.rows.get_mut(id)
    }

    fn insert(&mut self, id: Uuid, row: T) {
        if self.rows.insert(id, row).is_none() {
            self.order.push(id);
        }
    }

    fn remove(&mut self, id: &Uuid) -> Option<T> {
        let row = self.rows.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(row)
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<User>,
    orders: Table<Order>,
    items: Table<Item>,
}

/// Memory-backed implementation of [`UserStore`] and [`OrderStore`].
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn window<T>(rows: impl Iterator<Item = T>, page: &PageRequest) -> Vec<T> {
    let skip = usize::try_from(page.offset).unwrap_or(usize::MAX);
    let take = usize::try_from(page.limit).unwrap_or(usize::MAX);
    rows.skip(skip).take(take).collect()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Vec<User>> {
        let state = self.state.lock().await;
        Ok(window(state.users.iter().cloned(), page))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == data.email) {
            return Err(AppError::conflict("Email already registered"));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            active: data.active,
            admin: data.admin,
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_admin(&self, id: Uuid, admin: bool) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.admin = admin;
        Ok(user.clone())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.active = active;
        Ok(user.clone())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create(&self, user_id: Uuid) -> AppResult<Order> {
        let mut state = self.state.lock().await;
        if state.users.get(&user_id).is_none() {
            return Err(AppError::not_found("User not found"));
        }
        let order = Order::new_pending(user_id);
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let state = self.state.lock().await;
        Ok(state.orders.get(&id).cloned())
    }

    async fn find_item(&self, item_id: Uuid) -> AppResult<Option<Item>> {
        let state = self.state.lock().await;
        Ok(state.items.get(&item_id).cloned())
    }

    async fn items_for_orders(&self, order_ids: &[Uuid]) -> AppResult<Vec<Item>> {
        let state = self.state.lock().await;
        Ok(state
            .items
            .iter()
            .filter(|item| order_ids.contains(&item.order_id))
            .cloned()
            .collect())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<Vec<Order>> {
        let state = self.state.lock().await;
        Ok(window(state.orders.iter().cloned(), page))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>> {
        let state = self.state.lock().await;
        Ok(state
            .orders
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_item(&self, order_id: Uuid, new: NewItem) -> AppResult<(Order, Item)> {
        let mut state = self.state.lock().await;

        let order = state
            .orders
            .get(&order_id)
            .ok_or_else(|| AppError::not_found("Order not found"))?;
        order.status.ensure_accepts_items()?;

        let item = Item::from_new(order_id, new);
        let total = order.adjusted_total(item.line_total()?)?;

        state.items.insert(item.id, item.clone());
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| AppError::not_found("Order not found"))?;
        order.total = total;
        order.updated_at = Utc::now();
        Ok((order.clone(), item))
    }

    async fn remove_item(&self, item_id: Uuid) -> AppResult<(Order, Item)> {
        let mut state = self.state.lock().await;

        let item = state
            .items
            .get(&item_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Item not found"))?;
        let order = state
            .orders
            .get(&item.order_id)
            .ok_or_else(|| AppError::not_found("Order not found"))?;
        order.status.ensure_accepts_items()?;

        let total = order.adjusted_total(-item.line_total()?)?;

        state.items.remove(&item_id);
        let order = state
            .orders
            .get_mut(&item.order_id)
            .ok_or_else(|| AppError::not_found("Order not found"))?;
        order.total = total;
        order.updated_at = Utc::now();
        Ok((order.clone(), item))
    }

    async fn transition(&self, order_id: Uuid, target: OrderStatus) -> AppResult<Order> {
        let mut state = self.state.lock().await;
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        let next = order.status.transition_to(target)?;
        if next != order.status {
            order.status = next;
            order.updated_at = Utc::now();
        }
        Ok(order.clone())
    }
}
