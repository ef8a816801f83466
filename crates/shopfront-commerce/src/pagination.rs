//! Page-count pagination for the commerce REST API.
//!
//! List endpoints take `per_page` and 1-based `page` query parameters and
//! report the page count in the `X-WP-TotalPages` response header:
//!
//! ```text
//! X-WP-Total: 134
//! X-WP-TotalPages: 2
//! ```
//!
//! A missing or malformed header means the response is the only page.

/// Response header carrying the total number of pages.
pub const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Parses the `X-WP-TotalPages` header value.
///
/// Returns `None` if the header is absent or not a non-negative integer.
#[must_use]
pub fn parse_total_pages(header: Option<&str>) -> Option<usize> {
    header?.trim().parse::<usize>().ok()
}

/// Returns the next page to request after `current`, or `None` once
/// `current` is the last page reported by the server.
#[must_use]
pub fn next_page(current: usize, total_pages: Option<usize>) -> Option<usize> {
    match total_pages {
        Some(total) if current < total => Some(current + 1),
        _ => None,
    }
}
