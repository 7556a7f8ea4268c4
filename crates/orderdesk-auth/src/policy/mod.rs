//! Order authorization.

pub mod enforcer;

pub use enforcer::{OrderAction, OrderPolicy};
