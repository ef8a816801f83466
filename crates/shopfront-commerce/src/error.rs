use shopfront_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommerceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("pagination limit reached for product {product_id}: exceeded {max_pages} pages")]
    PaginationLimit { product_id: u64, max_pages: usize },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid product id {0}: must be a positive integer")]
    InvalidProductId(u64),

    #[error("commerce client is not configured: {0}")]
    Config(#[from] ConfigError),
}
