//! Client for the GLHF chat-completion API (OpenAI-compatible).

pub mod backend;
pub mod client;
pub mod messages;

pub use backend::CompletionBackend;
pub use client::{GlhfClient, GlhfError};
pub use messages::{ChatMessage, CompletionRequest, CompletionResponse, GenerationConfig};
