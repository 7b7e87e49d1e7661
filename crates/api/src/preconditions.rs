//! HTTP plumbing for the conditional-request protocol.
//!
//! Extracts the `If-Match` / `If-None-Match` tags from request headers and
//! attaches the `ETag` header to responses. The decisions themselves live in
//! [`marquee_core::conditional`].

use axum::http::header::{self, HeaderName};
use axum::http::HeaderMap;

/// The `If-Match` tag a mutating request carries, if any.
pub fn if_match(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::IF_MATCH).and_then(|v| v.to_str().ok())
}

/// The `If-None-Match` tag a GET carries for revalidation, if any.
pub fn if_none_match(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
}

/// Wrap a computed tag as response parts carrying the `ETag` header.
pub fn etag_header(tag: String) -> [(HeaderName, String); 1] {
    [(header::ETAG, tag)]
}
