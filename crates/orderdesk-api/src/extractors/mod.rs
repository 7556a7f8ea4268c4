//! Custom Axum extractors.

pub mod auth;
pub mod pagination;

pub use auth::{AuthUser, BearerToken};
pub use pagination::PaginationParams;
