//! # orderdesk-auth
//!
//! Authentication and authorization for OrderDesk.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and password policy
//! - `jwt` — signed, time-limited access and refresh tokens
//! - `identity` — bearer token and credential resolution to a stored user
//! - `policy` — which users may act on which orders

pub mod identity;
pub mod jwt;
pub mod password;
pub mod policy;

pub use identity::IdentityResolver;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use policy::{OrderAction, OrderPolicy};
