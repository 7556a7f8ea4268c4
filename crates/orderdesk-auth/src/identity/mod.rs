//! Maps bearer tokens and login credentials to stored users.

pub mod resolver;

pub use resolver::IdentityResolver;
