//! PostgreSQL repository implementations of the store traits.

pub mod order;
pub mod user;

pub use order::OrderRepository;
pub use user::UserRepository;
