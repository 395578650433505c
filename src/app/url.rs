//! Inbound URL validation and normalization.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::config::MAX_URL_LENGTH;

/// `http://`, `https://`, `ftp://` or `ftps://` at the start, any case
static HAS_TRANSFER_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:f|ht)tps?://")
        .unwrap_or_else(|e| panic!("Invalid scheme pattern: {e}"))
});

/// Validates and normalizes a URL received from a caller.
///
/// Trims surrounding whitespace and adds an `http://` prefix when the URL does not
/// start with a transfer scheme. The result must parse, use `http` or `https` and be
/// at most `MAX_URL_LENGTH` characters long.
///
/// Returns `None` (after logging a warning) when the URL should be rejected.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let trimmed = url.trim();

    let normalized = if HAS_TRANSFER_SCHEME.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            normalized.chars().take(50).collect::<String>()
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => {
                Some(normalized)
            }
            "http" | "https" => {
                warn!("Rejecting URL without a host: {normalized}");
                None
            }
            other => {
                warn!("Rejecting unsupported scheme '{other}' for URL: {normalized}");
                None
            }
        },
        Err(e) => {
            warn!("Rejecting invalid URL {normalized}: {e}");
            None
        }
    }
}
