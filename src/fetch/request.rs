//! HTTP request building.
//!
//! This module provides the browser-like header set sent with every outbound request.

/// `Accept` value of a desktop browser navigating to a page
const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Realistic browser request headers to reduce bot detection.
///
/// Servers behind bot filters often reject requests that lack the headers a browser
/// would send on a top-level navigation. `Accept-Encoding` is not listed here because
/// `reqwest` adds it for the decoders it was built with.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Returns headers as a vector of (name, value) tuples.
    pub(crate) fn as_vec() -> Vec<(&'static str, &'static str)> {
        vec![
            ("accept", ACCEPT_VALUE),
            ("accept-language", "en-US,en;q=0.9"),
            ("upgrade-insecure-requests", "1"),
            ("cache-control", "no-cache"),
            ("connection", "keep-alive"),
        ]
    }

    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        Self::as_vec()
            .into_iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value))
    }
}

/// Whether a `Content-Type` value names a document worth parsing for metadata.
///
/// Anything HTML- or XML-shaped counts; images, archives, PDFs and the like do not.
pub(crate) fn is_markup_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime.ends_with("/xhtml+xml") || mime.ends_with("xml")
}
