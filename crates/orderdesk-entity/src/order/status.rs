//! Order status enumeration and lifecycle rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use orderdesk_core::error::AppError;

/// Lifecycle status of an order.
///
/// `Pending` is the initial state; `Completed` and `Cancelled` are terminal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "order_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Open order; items may be added and removed.
    #[default]
    Pending,
    /// Order was fulfilled.
    Completed,
    /// Order was abandoned.
    Cancelled,
}

impl OrderStatus {
    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Fails with `InvalidTransition` unless items may be attached to or
    /// detached from an order in this status.
    pub fn ensure_accepts_items(&self) -> Result<(), AppError> {
        match self {
            Self::Cancelled => Err(AppError::invalid_transition(
                "Cannot modify items of a cancelled order",
            )),
            Self::Pending | Self::Completed => Ok(()),
        }
    }

    /// Validates a status change and returns the resulting status.
    ///
    /// `Pending` may move to either terminal state. Re-applying the current
    /// terminal status is a no-op. Every other change is rejected.
    pub fn transition_to(self, target: Self) -> Result<Self, AppError> {
        match (self, target) {
            (Self::Pending, Self::Completed | Self::Cancelled) => Ok(target),
            (Self::Completed, Self::Completed) | (Self::Cancelled, Self::Cancelled) => Ok(target),
            (Self::Cancelled, Self::Completed) => Err(AppError::invalid_transition(
                "Cannot complete a cancelled order",
            )),
            (Self::Completed, Self::Cancelled) => Err(AppError::invalid_transition(
                "Cannot cancel a completed order",
            )),
            (from, Self::Pending) => Err(AppError::invalid_transition(format!(
                "Cannot move order from {from} back to PENDING"
            ))),
        }
    }

    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid order status: '{s}'. Expected one of: PENDING, COMPLETED, CANCELLED"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::error::ErrorKind;

    #[test]
    fn test_pending_reaches_both_terminals() {
        assert_eq!(
            OrderStatus::Pending.transition_to(OrderStatus::Completed).unwrap(),
            OrderStatus::Completed
        );
        assert_eq!(
            OrderStatus::Pending.transition_to(OrderStatus::Cancelled).unwrap(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_cancelled_cannot_complete() {
        let err = OrderStatus::Cancelled
            .transition_to(OrderStatus::Completed)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_completed_cannot_cancel() {
        let err = OrderStatus::Completed
            .transition_to(OrderStatus::Cancelled)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_terminal_self_transition_is_noop() {
        assert!(OrderStatus::Completed.transition_to(OrderStatus::Completed).is_ok());
        assert!(OrderStatus::Cancelled.transition_to(OrderStatus::Cancelled).is_ok());
    }

    #[test]
    fn test_nothing_returns_to_pending() {
        for from in [OrderStatus::Pending, OrderStatus::Completed, OrderStatus::Cancelled] {
            assert!(from.transition_to(OrderStatus::Pending).is_err());
        }
    }

    #[test]
    fn test_only_cancelled_rejects_items() {
        assert!(OrderStatus::Pending.ensure_accepts_items().is_ok());
        assert!(OrderStatus::Completed.ensure_accepts_items().is_ok());
        assert_eq!(
            OrderStatus::Cancelled.ensure_accepts_items().unwrap_err().kind,
            ErrorKind::InvalidTransition
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("CANCELLED".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
