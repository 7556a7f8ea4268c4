//! Order domain entities.

pub mod model;
pub mod status;

pub use model::{Order, OrderDetail};
pub use status::OrderStatus;
