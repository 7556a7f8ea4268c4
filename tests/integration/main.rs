//! HTTP-level integration tests driving the router against the in-memory store.

mod auth_test;
mod helpers;
mod order_test;
