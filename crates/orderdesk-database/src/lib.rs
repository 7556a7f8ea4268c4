//! # orderdesk-database
//!
//! PostgreSQL connection management, the [`UserStore`]/[`OrderStore`]
//! persistence traits, their sqlx repository implementations, and an
//! in-memory store with the same semantics.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::{DatabasePool, Stores};
pub use memory::MemoryStore;
pub use store::{OrderStore, UserStore};
