//! HTTP service: configuration, auth, handlers, and the chat relay.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod relay;
pub mod router;
pub mod routes;
pub mod state;
