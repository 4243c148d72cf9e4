//! HTTP handlers, grouped by resource.

pub mod chats;
pub mod keys;
pub mod models;
pub mod relay;
pub mod users;
