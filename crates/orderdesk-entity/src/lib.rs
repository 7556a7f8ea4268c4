//! # orderdesk-entity
//!
//! Domain entity models for OrderDesk. Every struct in this crate
//! represents a database table row or a domain value object. Rows are
//! linked by explicit foreign-key fields (`Order::user_id`,
//! `Item::order_id`); relationships are resolved by lookup.

pub mod item;
pub mod order;
pub mod user;
