//! Order lifecycle operations.

pub mod service;

pub use service::OrderService;
