//! # orderdesk-service
//!
//! Business logic service layer for OrderDesk. Each service orchestrates the
//! persistence stores, the token machinery, and the order policy to
//! implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time as `Arc` handles or cheap clones.

pub mod account;
pub mod context;
pub mod order;

pub use account::{AccountService, SignedIn, SignupRequest};
pub use context::RequestContext;
pub use order::OrderService;
