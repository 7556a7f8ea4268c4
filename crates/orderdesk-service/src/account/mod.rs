//! Signup, signin, and token refresh.

pub mod service;

pub use service::{AccountService, SignedIn, SignupRequest};
