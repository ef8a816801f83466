//! Base URL handling shared by the commerce and storefront clients.

use reqwest::Url;

use crate::error::CommerceError;

/// Parses `base_url` and appends `segments` to its path.
///
/// Any path already on the base (e.g. `https://example.com/shop`) is kept, so
/// stores mounted below the site root resolve correctly.
///
/// # Errors
///
/// Returns [`CommerceError::InvalidBaseUrl`] if `base_url` is not an absolute
/// URL that can carry a path.
pub fn join_api_path(base_url: &str, segments: &[&str]) -> Result<Url, CommerceError> {
    let mut url = Url::parse(base_url).map_err(|e| CommerceError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    url.path_segments_mut()
        .map_err(|()| CommerceError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: "URL cannot be used as a base".to_owned(),
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(super) fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
