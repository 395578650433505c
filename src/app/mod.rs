//! Application layer.
//!
//! Validates inbound URLs and composes the fetcher and extractor into the payload
//! returned to callers.

mod describe;
mod url;

// Re-export public API
pub use describe::{describe_url, PageMeta, PagePayload};
pub use self::url::validate_and_normalize_url;
