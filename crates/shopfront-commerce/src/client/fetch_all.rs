//! Multi-page variation fetch loop for `CommerceClient`.

use shopfront_core::Variation;

use crate::error::CommerceError;
use crate::normalize::normalize_variations;
use crate::pagination::next_page;
use crate::types::CommerceVariation;

use super::CommerceClient;
use super::MAX_PAGES;

impl CommerceClient {
    /// Fetches every variation of `product_id`, following `X-WP-TotalPages`
    /// until the last page, and normalizes them into storefront [`Variation`]s.
    ///
    /// **All-or-nothing semantics**: if any page fails, variations from earlier
    /// pages are discarded and the error is returned. A partial list would
    /// misreport which colors exist.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_variations_page`].
    /// Returns [`CommerceError::PaginationLimit`] if the server reports more
    /// than [`MAX_PAGES`] pages.
    pub async fn fetch_variations(&self, product_id: u64) -> Result<Vec<Variation>, CommerceError> {
        let mut raw: Vec<CommerceVariation> = Vec::new();
        let mut page = 1usize;

        loop {
            if page > MAX_PAGES {
                return Err(CommerceError::PaginationLimit {
                    product_id,
                    max_pages: MAX_PAGES,
                });
            }

            let (variations, total_pages) = self.fetch_variations_page(product_id, page).await?;
            tracing::debug!(
                product_id,
                page,
                total_pages,
                count = variations.len(),
                "fetched variations page"
            );
            let page_was_empty = variations.is_empty();
            raw.extend(variations);

            match next_page(page, total_pages) {
                Some(next) if !page_was_empty => page = next,
                _ => break,
            }
        }

        Ok(normalize_variations(raw))
    }
}
