//! Pure domain logic shared by the database, LLM client, and API crates.
//!
//! This crate has zero internal dependencies so it can be used by any
//! future worker or CLI tooling without pulling in the web stack.

pub mod chat;
pub mod crypto;
pub mod error;
pub mod offline;
pub mod registry;
pub mod types;
