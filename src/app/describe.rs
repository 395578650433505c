//! Fetch-then-extract composition.

use log::debug;
use serde::Serialize;

use crate::error_handling::DescribeError;
use crate::fetch::{FetchedPage, Fetcher};
use crate::parse::{extract_metadata_with_hint, MetadataMap};

/// Metadata section of a payload.
///
/// Pages without a body (non-markup content, empty responses) are never parsed and
/// serialize as an empty object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageMeta {
    /// Fields extracted from the page
    Extracted(MetadataMap),
    /// Extraction did not run
    Skipped {},
}

/// Everything reported about one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePayload {
    /// Final URL after redirects
    pub url: String,
    /// Status of the final response
    pub status_code: u16,
    /// Content-Type of the final response, if sent
    pub content_type: Option<String>,
    /// Body bytes actually received
    pub size_bytes: u64,
    /// Redirects followed
    pub redirect_count: usize,
    /// Extracted metadata
    pub meta: PageMeta,
}

/// Fetches `url` and extracts its metadata.
///
/// `url` must already be validated and normalized. Parsing runs on the blocking pool
/// so a large document does not stall the runtime.
///
/// # Errors
///
/// - `DescribeError::Fetch` when the fetch fails; extraction is skipped
/// - `DescribeError::Internal` when the extraction task panics
pub async fn describe_url(fetcher: &Fetcher, url: &str) -> Result<PagePayload, DescribeError> {
    let FetchedPage {
        final_url,
        status,
        content_type,
        redirect_count,
        body,
        size,
        ..
    } = fetcher.fetch(url).await?;

    let meta = if body.is_empty() {
        debug!("Empty body from {}, skipping extraction", final_url);
        PageMeta::Skipped {}
    } else {
        let base_url = final_url.clone();
        let hint = content_type.clone();
        let map = tokio::task::spawn_blocking(move || {
            extract_metadata_with_hint(&body, &base_url, hint.as_deref())
        })
        .await
        .map_err(|e| DescribeError::Internal(format!("extraction task failed: {e}")))?;
        PageMeta::Extracted(map)
    };

    Ok(PagePayload {
        url: final_url,
        status_code: status,
        content_type,
        size_bytes: size,
        redirect_count,
        meta,
    })
}
