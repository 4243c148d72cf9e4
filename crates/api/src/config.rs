use crate::auth::jwt::JwtConfig;

/// Default GLHF endpoint.
const DEFAULT_GLHF_BASE_URL: &str = "https://api.glhf.chat/v1";

/// Configuration for the outbound GLHF connection.
///
/// An explicit struct passed to the relay at construction -- there is no
/// process-global client, so per-request credential overrides never touch
/// shared state.
#[derive(Debug, Clone)]
pub struct GlhfConfig {
    /// Base URL of the completion service.
    pub base_url: String,
    /// Process-wide default API key; the last credential-resolution step
    /// before offline mode. `None` when unset.
    pub default_api_key: Option<String>,
    /// Whether to expose full upstream error detail to callers.
    pub development: bool,
}

impl GlhfConfig {
    /// Load from environment variables.
    ///
    /// | Env Var        | Default                     |
    /// |----------------|-----------------------------|
    /// | `GLHF_BASE_URL`| `https://api.glhf.chat/v1`  |
    /// | `GLHF_API_KEY` | unset                       |
    /// | `APP_ENV`      | `production`                |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("GLHF_BASE_URL").unwrap_or_else(|_| DEFAULT_GLHF_BASE_URL.into());

        let default_api_key = std::env::var("GLHF_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let development = std::env::var("APP_ENV")
            .map(|v| v == "development")
            .unwrap_or(false);

        Self {
            base_url,
            default_api_key,
            development,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `150`; completions can
    /// legitimately take two minutes).
    pub request_timeout_secs: u64,
    /// Passphrase for the credential codec (`API_KEY_ENCRYPTION_KEY`).
    pub encryption_key: String,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Outbound GLHF configuration.
    pub glhf: GlhfConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Required | Default   |
    /// |--------------------------|----------|-----------|
    /// | `HOST`                   | no       | `0.0.0.0` |
    /// | `PORT`                   | no       | `3000`    |
    /// | `CORS_ORIGINS`           | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | no       | `150`     |
    /// | `API_KEY_ENCRYPTION_KEY` | **yes**  | --        |
    ///
    /// # Panics
    ///
    /// Panics if `API_KEY_ENCRYPTION_KEY` is not set or is empty -- we
    /// want a misconfigured codec to fail fast rather than silently
    /// encrypt with a guessable key.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "150".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let encryption_key = std::env::var("API_KEY_ENCRYPTION_KEY")
            .expect("API_KEY_ENCRYPTION_KEY must be set in the environment");
        assert!(
            !encryption_key.is_empty(),
            "API_KEY_ENCRYPTION_KEY must not be empty"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            encryption_key,
            jwt: JwtConfig::from_env(),
            glhf: GlhfConfig::from_env(),
        }
    }
}
