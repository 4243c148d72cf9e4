//! REST client for the GLHF HTTP endpoints.
//!
//! Wraps the OpenAI-compatible GLHF API (chat completions, model listing)
//! using [`reqwest`]. The credential is supplied per call rather than
//! stored in the client, so one shared client serves requests made with
//! different user keys.

use std::time::Duration;

use crate::messages::{CompletionRequest, CompletionResponse};

/// Default GLHF API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.glhf.chat/v1";

/// Timeout for completion calls.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for the lightweight connectivity probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the GLHF REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GlhfError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GLHF returned a non-2xx status code.
    #[error("GLHF API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },
}

impl GlhfError {
    /// Upstream HTTP status when one is available.
    pub fn status(&self) -> Option<u16> {
        match self {
            GlhfError::Api { status, .. } => Some(*status),
            GlhfError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// HTTP client for the GLHF API.
pub struct GlhfClient {
    client: reqwest::Client,
    base_url: String,
}

impl GlhfClient {
    /// Create a client against the default GLHF endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (used by tests and
    /// alternative deployments).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a single non-streaming chat completion.
    pub async fn chat_completions(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GlhfError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .timeout(COMPLETION_TIMEOUT)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Lightweight connectivity probe: list models with the given key.
    ///
    /// Succeeds iff the endpoint is reachable and accepts the credential.
    pub async fn probe(&self, api_key: &str) -> Result<(), GlhfError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(api_key)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GlhfError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Deserialize a 2xx response body, or capture status + body as an
    /// API error.
    async fn parse_response(response: reqwest::Response) -> Result<CompletionResponse, GlhfError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<CompletionResponse>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "GLHF API returned an error");
            Err(GlhfError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl Default for GlhfClient {
    fn default() -> Self {
        Self::new()
    }
}
