//! Fetch result types.

use std::time::Duration;

use crate::error_handling::FetchError;

/// A successfully retrieved resource.
///
/// Built once per fetch and handed to the caller; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL of the final response, after redirects
    pub final_url: String,
    /// HTTP status of the final response (always below 400)
    pub status: u16,
    /// Raw `Content-Type` header of the final response
    pub content_type: Option<String>,
    /// Redirect hops followed to reach `final_url`
    pub redirect_count: usize,
    /// Body bytes as received; empty when the body was not downloaded
    pub body: Vec<u8>,
    /// Bytes actually received, which may exceed the size limit by one chunk
    pub size: u64,
    /// Whether the size guard cut the transfer short
    pub truncated: bool,
    /// Wall-clock time spent on the fetch
    pub elapsed: Duration,
}

/// Outcome of one fetch: a page, or the reason there is none.
pub type FetchResult = Result<FetchedPage, FetchError>;
