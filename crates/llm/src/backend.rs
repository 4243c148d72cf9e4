//! Seam between the relay and the completion service.
//!
//! The relay depends on this trait rather than on [`GlhfClient`] directly
//! so tests can substitute a mock and assert on invocation counts.

use async_trait::async_trait;

use crate::client::{GlhfClient, GlhfError};
use crate::messages::{CompletionRequest, CompletionResponse};

/// An upstream chat-completion service.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Connectivity check with the given credential.
    async fn probe(&self, api_key: &str) -> Result<(), GlhfError>;

    /// Request a single completion.
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GlhfError>;
}

#[async_trait]
impl CompletionBackend for GlhfClient {
    async fn probe(&self, api_key: &str) -> Result<(), GlhfError> {
        GlhfClient::probe(self, api_key).await
    }

    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GlhfError> {
        self.chat_completions(api_key, request).await
    }
}
