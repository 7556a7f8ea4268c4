//! # orderdesk-api
//!
//! HTTP API layer for OrderDesk built on Axum.
//!
//! Provides the auth and order endpoints, middleware (CORS, request
//! logging), the bearer-token extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
