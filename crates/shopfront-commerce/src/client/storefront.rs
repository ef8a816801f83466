//! Client for the storefront's own `GET /api/variations/{productId}` endpoint.

use reqwest::Client;
use shopfront_core::{AppConfig, Variation};

use crate::error::CommerceError;

use super::{build_http_client, get_json, join_api_path};

/// Reads variation lists the way the product page does: one `GET` per
/// product, parsed straight into [`Variation`] records.
/// Never retries: the first failure is returned as-is.
pub struct StorefrontClient {
    client: Client,
    base_url: String,
}

impl StorefrontClient {
    /// # Errors
    ///
    /// Returns [`CommerceError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`CommerceError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CommerceError> {
        join_api_path(base_url, &[])?;
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CommerceError> {
        Self::new(
            &config.storefront_url,
            config.http_timeout_secs,
            &config.http_user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the variations of `product_id` in a single request.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`super::CommerceClient::fetch_variations_page`], returned
    /// from the first and only attempt.
    pub async fn fetch_variations(&self, product_id: u64) -> Result<Vec<Variation>, CommerceError> {
        let url = self.variations_url(product_id)?;
        let context = format!("variations of product {product_id}");
        let (variations, _headers) =
            get_json::<Vec<Variation>>(&self.client, &url, None, &context).await?;
        Ok(variations)
    }

    pub(super) fn variations_url(&self, product_id: u64) -> Result<String, CommerceError> {
        if product_id == 0 {
            return Err(CommerceError::InvalidProductId(product_id));
        }
        let id = product_id.to_string();
        Ok(join_api_path(&self.base_url, &["api", "variations", &id])?.to_string())
    }
}
