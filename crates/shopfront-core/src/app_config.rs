use std::net::SocketAddr;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub commerce_base_url: Option<String>,
    pub commerce_consumer_key: Option<String>,
    pub commerce_consumer_secret: Option<String>,
    pub storefront_url: String,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    pub http_max_retries: u32,
    pub http_retry_backoff_base_secs: u64,
    pub variations_page_size: u32,
    pub api_rate_limit_max_requests: u32,
    pub api_rate_limit_window_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("commerce_base_url", &self.commerce_base_url)
            .field(
                "commerce_consumer_key",
                &self.commerce_consumer_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "commerce_consumer_secret",
                &self.commerce_consumer_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("storefront_url", &self.storefront_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field(
                "http_retry_backoff_base_secs",
                &self.http_retry_backoff_base_secs,
            )
            .field("variations_page_size", &self.variations_page_size)
            .field(
                "api_rate_limit_max_requests",
                &self.api_rate_limit_max_requests,
            )
            .field(
                "api_rate_limit_window_secs",
                &self.api_rate_limit_window_secs,
            )
            .finish()
    }
}

impl AppConfig {
    /// The commerce API origin, for callers that read from it directly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `SHOPFRONT_COMMERCE_BASE_URL`
    /// is unset.
    pub fn require_commerce_base_url(&self) -> Result<&str, ConfigError> {
        self.commerce_base_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPFRONT_COMMERCE_BASE_URL".to_string()))
    }
}
