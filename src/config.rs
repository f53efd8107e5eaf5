use std::env;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Firdesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "FIRDESK_API_URL";

/// Default backend base URL (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default per-request timeout. Analysis calls sit on the generative
/// backend for a while, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "info,firdesk=debug".to_string()
}

/// Where the backend lives and how long we wait for it.
///
/// The mobile client this replaces hardcoded a LAN IP literal; here the
/// base URL is resolved from `FIRDESK_API_URL` with a localhost fallback
/// so deployments configure it without rebuilding.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    base_url: String,
    timeout: Duration,
}

impl BackendConfig {
    /// Create a config for an explicit base URL (trailing slash stripped).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolve the base URL from the environment, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        match env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(&url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
