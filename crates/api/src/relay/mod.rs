//! Chat relay: one round of message exchange against the completion
//! service.
//!
//! The relay owns credential resolution, the connectivity probe, model
//! selection, prompt assembly, and the single fallback retry. It performs
//! no persistence; saving history is the caller's job via the chat
//! endpoints. Offline mode is a successful terminal state, not an error.

use std::sync::Arc;
use std::time::Duration;

use glhfchat_core::registry;
use glhfchat_llm::{ChatMessage, CompletionBackend, CompletionRequest, GenerationConfig, GlhfError};
use serde::{Deserialize, Serialize};

use crate::config::GlhfConfig;

/// System message prepended to every assembled prompt.
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Placeholder when the service returns no first-choice content.
const NO_RESPONSE: &str = "No response";

/// Simulated latency before serving an offline response.
const OFFLINE_LATENCY: Duration = Duration::from_millis(500);

/// Generic upstream-failure message shown outside development.
const GENERIC_UPSTREAM_ERROR: &str =
    "An error occurred while generating the response. Please try again later.";

/// Request body for the relay endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRelayRequest {
    pub message: String,
    /// Requested model id; invalid or missing values fall back via the
    /// registry.
    pub model: Option<String>,
    /// Prior conversation, passed through verbatim.
    pub history: Option<Vec<ChatMessage>>,
    pub config: Option<GenerationConfig>,
    /// Caller-supplied key; wins over every other credential source.
    #[serde(rename = "userApiKey")]
    pub user_api_key: Option<String>,
}

/// Success body for the relay endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRelayResponse {
    pub response: String,
    pub offline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Terminal states of one relay round.
#[derive(Debug)]
pub enum RelayReply {
    /// No credential resolved; the caller supplies the offline text.
    Offline,
    /// The completion service answered.
    Completed {
        response: String,
        model: String,
        notice: Option<String>,
    },
}

/// Relay failures, translated to HTTP by the handler layer.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The connectivity probe failed: a credential is configured but the
    /// service is unreachable or rejects it. Distinct from offline mode.
    #[error("{0}")]
    ProbeFailed(String),

    /// The completion call failed (after any fallback retry).
    #[error("{message}")]
    Upstream { status: u16, message: String },
}

/// Resolve which credential to use, strict precedence, first non-empty
/// wins: request-supplied key, the user's stored key, the process-wide
/// default. `None` means offline mode.
pub fn resolve_credential(
    request_key: Option<&str>,
    stored_key: Option<&str>,
    default_key: Option<&str>,
) -> Option<String> {
    [request_key, stored_key, default_key]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|k| !k.is_empty())
        .map(str::to_string)
}

/// Orchestrates one request/response round against the completion service.
pub struct ChatRelay {
    backend: Arc<dyn CompletionBackend>,
    glhf: GlhfConfig,
}

impl ChatRelay {
    pub fn new(backend: Arc<dyn CompletionBackend>, glhf: GlhfConfig) -> Self {
        Self { backend, glhf }
    }

    /// Run the per-request state machine.
    ///
    /// `stored_key` is the authenticated caller's decrypted key, when one
    /// exists; anonymous callers pass `None`.
    pub async fn handle(
        &self,
        req: &ChatRelayRequest,
        stored_key: Option<&str>,
    ) -> Result<RelayReply, RelayError> {
        let credential = resolve_credential(
            req.user_api_key.as_deref(),
            stored_key,
            self.glhf.default_api_key.as_deref(),
        );

        let Some(credential) = credential else {
            tracing::warn!("No GLHF credential resolved; serving offline response");
            tokio::time::sleep(OFFLINE_LATENCY).await;
            return Ok(RelayReply::Offline);
        };

        // A configured-but-broken credential is a 503, never a silent
        // downgrade to offline mode.
        if let Err(e) = self.backend.probe(&credential).await {
            return Err(RelayError::ProbeFailed(format!("API connection failed: {e}")));
        }

        let model = registry::select_model(req.model.as_deref());
        let config = req.config.clone().unwrap_or_default();
        let messages = build_messages(req);

        tracing::debug!(model, "Sending completion request");
        let request = CompletionRequest::new(model, messages.clone(), &config);

        match self.backend.complete(&credential, &request).await {
            Ok(resp) => Ok(completed(model, None, resp.first_content())),
            Err(err) => {
                // "Model not found" with an explicitly requested model
                // earns exactly one retry against the registry fallback.
                if err.status() == Some(404) && req.model.is_some() {
                    let fallback = registry::fallback_model();
                    tracing::warn!(
                        requested = req.model.as_deref(),
                        fallback,
                        "Requested model unavailable; retrying with fallback"
                    );
                    let retry = CompletionRequest::new(fallback, messages, &config);
                    match self.backend.complete(&credential, &retry).await {
                        Ok(resp) => {
                            let notice = format!(
                                "The requested model was unavailable; responded with {fallback}."
                            );
                            Ok(completed(fallback, Some(notice), resp.first_content()))
                        }
                        Err(retry_err) => Err(self.upstream_error(retry_err)),
                    }
                } else {
                    Err(self.upstream_error(err))
                }
            }
        }
    }

    /// Translate a client error to a relay error, gating detail on the
    /// environment: full diagnostics in development, generic otherwise.
    fn upstream_error(&self, err: GlhfError) -> RelayError {
        tracing::error!(error = %err, "Completion request failed");
        let status = err.status().unwrap_or(500);
        let message = if self.glhf.development {
            format!("API Error: {err}")
        } else {
            GENERIC_UPSTREAM_ERROR.to_string()
        };
        RelayError::Upstream { status, message }
    }
}

/// Assemble the prompt: fixed system message, caller history verbatim
/// (role and content pass through unvalidated), new user message last.
fn build_messages(req: &ChatRelayRequest) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
    if let Some(history) = &req.history {
        messages.extend(history.iter().cloned());
    }
    messages.push(ChatMessage::user(req.message.clone()));
    messages
}

fn completed(model: &str, notice: Option<String>, content: Option<&str>) -> RelayReply {
    RelayReply::Completed {
        response: content.unwrap_or(NO_RESPONSE).to_string(),
        model: model.to_string(),
        notice,
    }
}
