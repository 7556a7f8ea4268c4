//! Decides whether a user may act on an order.

use std::fmt;

use orderdesk_core::config::OrderPolicyRule;
use orderdesk_core::error::AppError;
use orderdesk_entity::order::Order;
use orderdesk_entity::user::User;

/// Action being attempted on an existing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Attach an item.
    AddItem,
    /// Detach an item.
    RemoveItem,
    /// Move to CANCELLED.
    Cancel,
    /// Move to COMPLETED.
    Complete,
}

impl OrderAction {
    /// Verb used in error messages.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::AddItem => "add items to",
            Self::RemoveItem => "remove items from",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Enforces the configured ownership rule for order mutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderPolicy {
    rule: OrderPolicyRule,
}

impl OrderPolicy {
    /// Creates a policy applying `rule`.
    pub fn new(rule: OrderPolicyRule) -> Self {
        Self { rule }
    }

    /// The active rule.
    pub fn rule(&self) -> OrderPolicyRule {
        self.rule
    }

    /// Checks whether `actor` may perform `action` on `order`.
    ///
    /// Returns `Ok(())` if allowed, or `Err(AppError::Forbidden)` if denied.
    pub fn authorize(&self, actor: &User, order: &Order, action: OrderAction) -> Result<(), AppError> {
        if self.allows(actor, order) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "You do not have permission to {action} this order"
            )))
        }
    }

    /// Checks whether `actor` passes the rule for `order` (returns bool).
    pub fn allows(&self, actor: &User, order: &Order) -> bool {
        let owner = order.is_owned_by(actor.id);
        match self.rule {
            OrderPolicyRule::AdminAndOwner => actor.is_admin() && owner,
            OrderPolicyRule::AdminOrOwner => actor.is_admin() || owner,
        }
    }

    /// Listing every order is admin-only.
    pub fn require_admin(&self, actor: &User) -> Result<(), AppError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You do not have permission to perform this action",
            ))
        }
    }
}
