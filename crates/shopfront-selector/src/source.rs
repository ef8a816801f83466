//! Where a [`crate::VariationSelector`] gets its variations from.

use std::fmt::Display;
use std::future::Future;

use shopfront_commerce::{CommerceClient, CommerceError, StorefrontClient};
use shopfront_core::Variation;

/// A read-only source of a product's variations.
pub trait VariationSource {
    type Error: Display;

    fn fetch_variations(
        &self,
        product_id: u64,
    ) -> impl Future<Output = Result<Vec<Variation>, Self::Error>> + Send;
}

/// Reads through the storefront's `GET /api/variations/{productId}`.
impl VariationSource for StorefrontClient {
    type Error = CommerceError;

    fn fetch_variations(
        &self,
        product_id: u64,
    ) -> impl Future<Output = Result<Vec<Variation>, Self::Error>> + Send {
        StorefrontClient::fetch_variations(self, product_id)
    }
}

/// Reads straight from the commerce API, bypassing the storefront.
impl VariationSource for CommerceClient {
    type Error = CommerceError;

    fn fetch_variations(
        &self,
        product_id: u64,
    ) -> impl Future<Output = Result<Vec<Variation>, Self::Error>> + Send {
        CommerceClient::fetch_variations(self, product_id)
    }
}
