//! HTTP clients for the commerce API and the storefront's own variations endpoint.

mod fetch_all;
mod origin;
mod storefront;

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shopfront_core::AppConfig;

use crate::error::CommerceError;
use crate::pagination::{parse_total_pages, TOTAL_PAGES_HEADER};
use crate::rate_limit::RetryPolicy;
use crate::types::CommerceVariation;

pub use origin::join_api_path;
pub use storefront::StorefrontClient;

/// Maximum number of variation pages to fetch for a single product before
/// giving up. Guards against a server that keeps reporting more pages.
pub(super) const MAX_PAGES: usize = 50;

/// Largest `per_page` the commerce API honours.
const MAX_PAGE_SIZE: u32 = 100;

struct Credentials {
    consumer_key: String,
    consumer_secret: String,
}

/// HTTP client for the commerce REST API's product variations endpoint.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Transient errors (429, 5xx, network failures) are retried
/// with exponential backoff up to `max_retries` additional attempts; a 429
/// waits at least its `Retry-After`.
pub struct CommerceClient {
    pub(super) client: Client,
    pub(super) base_url: String,
    credentials: Option<Credentials>,
    retry: RetryPolicy,
    pub(super) page_size: u32,
}

impl CommerceClient {
    /// Creates a `CommerceClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first failure for
    /// retriable errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`CommerceError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CommerceError> {
        join_api_path(base_url, &[])?;
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials: None,
            retry: RetryPolicy::new(max_retries, backoff_base_secs),
            page_size: MAX_PAGE_SIZE,
        })
    }

    /// Builds a client from the `SHOPFRONT_COMMERCE_*` and `SHOPFRONT_HTTP_*` settings.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Config`] when no commerce base URL is
    /// configured; otherwise see [`Self::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CommerceError> {
        let client = Self::new(
            config.require_commerce_base_url()?,
            config.http_timeout_secs,
            &config.http_user_agent,
            config.http_max_retries,
            config.http_retry_backoff_base_secs,
        )?
        .with_page_size(config.variations_page_size);

        Ok(
            match (
                &config.commerce_consumer_key,
                &config.commerce_consumer_secret,
            ) {
                (Some(key), Some(secret)) => client.with_credentials(key, secret),
                _ => client,
            },
        )
    }

    /// Authenticates every request with HTTP basic auth using the API consumer key pair.
    #[must_use]
    pub fn with_credentials(mut self, consumer_key: &str, consumer_secret: &str) -> Self {
        self.credentials = Some(Credentials {
            consumer_key: consumer_key.to_owned(),
            consumer_secret: consumer_secret.to_owned(),
        });
        self
    }

    /// Sets `per_page`, clamped to the API's accepted range.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Fetches one page of variations for `product_id`, with automatic retry
    /// on transient errors.
    ///
    /// Returns the raw variations and the page count from the
    /// `X-WP-TotalPages` header (if present).
    ///
    /// # Errors
    ///
    /// - [`CommerceError::InvalidProductId`]: `product_id` is zero.
    /// - [`CommerceError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`CommerceError::NotFound`]: HTTP 404 (not retried).
    /// - [`CommerceError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`CommerceError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`CommerceError::Deserialize`]: response body is not a variations array.
    pub async fn fetch_variations_page(
        &self,
        product_id: u64,
        page: usize,
    ) -> Result<(Vec<CommerceVariation>, Option<usize>), CommerceError> {
        let url = self.variations_url(product_id, page)?;
        let auth = self
            .credentials
            .as_ref()
            .map(|c| (c.consumer_key.as_str(), c.consumer_secret.as_str()));
        let context = format!("variations page {page} of product {product_id}");

        self.retry
            .run(|| {
                let url = url.clone();
                let context = context.clone();
                async move {
                    let (variations, headers) =
                        get_json::<Vec<CommerceVariation>>(&self.client, &url, auth, &context)
                            .await?;
                    let total_pages = parse_total_pages(
                        headers
                            .get(TOTAL_PAGES_HEADER)
                            .and_then(|v| v.to_str().ok()),
                    );
                    Ok((variations, total_pages))
                }
            })
            .await
    }

    /// Builds the variations URL for `product_id` and 1-based `page`.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::InvalidProductId`] for `product_id == 0` and
    /// [`CommerceError::InvalidBaseUrl`] if the base URL cannot be extended.
    fn variations_url(&self, product_id: u64, page: usize) -> Result<String, CommerceError> {
        if product_id == 0 {
            return Err(CommerceError::InvalidProductId(product_id));
        }
        let id = product_id.to_string();
        let mut url = join_api_path(
            &self.base_url,
            &["wp-json", "wc", "v3", "products", &id, "variations"],
        )?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url.to_string())
    }
}

/// Builds the shared `reqwest::Client` with timeouts and `User-Agent`.
pub(super) fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, CommerceError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Issues a single `GET` and parses the JSON body into `T`.
///
/// Status handling: 429 → [`CommerceError::RateLimited`] (honouring
/// `Retry-After`, default 60s), 404 → [`CommerceError::NotFound`], any other
/// non-2xx → [`CommerceError::UnexpectedStatus`].
pub(super) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    basic_auth: Option<(&str, &str)>,
    context: &str,
) -> Result<(T, HeaderMap), CommerceError> {
    let mut request = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json");
    if let Some((user, password)) = basic_auth {
        request = request.basic_auth(user, Some(password));
    }

    let response = request.send().await?;
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);

        return Err(CommerceError::RateLimited {
            domain: origin::extract_domain(url),
            retry_after_secs,
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(CommerceError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(CommerceError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    // Headers must be captured before the body consumes the response.
    let headers = response.headers().clone();
    let body = response.text().await?;
    let parsed = serde_json::from_str::<T>(&body).map_err(|e| CommerceError::Deserialize {
        context: context.to_owned(),
        source: e,
    })?;

    Ok((parsed, headers))
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
