//! Content length extraction utilities.
//!
//! The declared size of a response drives the `total` half of every progress
//! signal. A missing or malformed header means the total is unknown.

use reqwest::header::{HeaderMap, CONTENT_LENGTH};

/// Extract the declared size of a response body from its headers.
///
/// Returns `None` when the `Content-Length` header is missing, is not valid
/// text, or does not parse as a non-negative integer.
///
/// # Example
///
/// ```rust
/// use fetch_save::utils::declared_total;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1024"));
/// assert_eq!(declared_total(&headers), Some(1024));
/// ```
pub fn declared_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_length)
}

/// Parse the value of a `Content-Length` header.
///
/// # Example
///
/// ```rust
/// use fetch_save::utils::parse_content_length;
///
/// assert_eq!(parse_content_length(" 2048 "), Some(2048));
/// assert_eq!(parse_content_length("-1"), None);
/// ```
pub fn parse_content_length(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
