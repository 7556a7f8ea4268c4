//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use orderdesk_auth::identity::IdentityResolver;
use orderdesk_auth::jwt::{JwtDecoder, JwtEncoder};
use orderdesk_auth::password::PasswordValidator;
use orderdesk_auth::policy::OrderPolicy;
use orderdesk_core::config::AppConfig;
use orderdesk_core::error::AppError;
use orderdesk_database::Stores;
use orderdesk_service::{AccountService, OrderService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token and credential resolver
    pub identity: Arc<IdentityResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Signup, signin, refresh
    pub accounts: Arc<AccountService>,
    /// Order lifecycle
    pub orders: Arc<OrderService>,
}

impl AppState {
    /// Wires the auth machinery and services over `stores`.
    pub fn new(config: AppConfig, stores: Stores) -> Result<Self, AppError> {
        let decoder = JwtDecoder::new(&config.auth)?;
        let encoder = JwtEncoder::new(&config.auth)?;
        let identity = IdentityResolver::new(decoder, stores.users.clone());

        let accounts = AccountService::new(
            stores.users.clone(),
            PasswordValidator::new(&config.auth),
            encoder,
            identity.clone(),
        );
        let orders = OrderService::new(
            stores.orders,
            stores.users,
            OrderPolicy::new(config.auth.order_policy),
        );

        Ok(Self {
            config: Arc::new(config),
            identity: Arc::new(identity),
            accounts: Arc::new(accounts),
            orders: Arc::new(orders),
        })
    }
}
