//! Constrained HTTP retrieval.
//!
//! One `Fetcher` is built at startup from a `FetchConfig` and shared by every request.
//! A fetch:
//! - sends a GET with browser-like headers and follows up to `max_redirects` redirects
//! - runs the whole exchange (redirects and body) under one total time budget
//! - fails with the target's own status for responses of 400 or above
//! - skips the body of non-markup responses
//! - stops downloading once `max_body_size` bytes have arrived and keeps the partial body
//!
//! No retries: one attempt per call.

mod body;
mod redirects;
mod request;
mod types;

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

use crate::config::FetchConfig;
use crate::error_handling::{FetchError, InitializationError};
use crate::initialization::init_client;

use body::stream_body_with_limit;
use redirects::{follow_redirects, FinalResponse};
use request::is_markup_content_type;

pub use types::{FetchResult, FetchedPage};

/// Performs constrained fetches with a shared client and read-only settings.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    config: Arc<FetchConfig>,
}

impl Fetcher {
    /// Builds a fetcher and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, InitializationError> {
        let client = init_client(&config)?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// The settings this fetcher was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches `url`, which must already be an absolute, valid URL.
    ///
    /// # Errors
    ///
    /// - `FetchError::Timeout` when the total budget runs out
    /// - `FetchError::TargetStatus` when the final response is 400 or above
    /// - `FetchError::TooManyRedirects` when the chain is too long
    /// - `FetchError::Transport` for DNS, connection, TLS and protocol failures
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let start = Instant::now();
        let limit_seconds = self.config.timeout_seconds;

        let result = match tokio::time::timeout(self.config.timeout(), self.fetch_inner(url)).await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout { limit_seconds }),
        };

        match result {
            Ok(mut page) => {
                page.elapsed = start.elapsed();
                info!(
                    "Fetched {} -> {} ({}, {} bytes{}, {} redirects) in {:.2}s",
                    url,
                    page.final_url,
                    page.status,
                    page.size,
                    if page.truncated { ", truncated" } else { "" },
                    page.redirect_count,
                    page.elapsed.as_secs_f64()
                );
                Ok(page)
            }
            Err(e) => {
                warn!("Fetch of {} failed: {}", url, e);
                Err(e)
            }
        }
    }

    async fn fetch_inner(&self, url: &str) -> FetchResult {
        let limit_seconds = self.config.timeout_seconds;

        let FinalResponse {
            response,
            redirect_count,
        } = follow_redirects(&self.client, url, self.config.max_redirects, limit_seconds).await?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::TargetStatus { status });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(str::to_string);

        // A missing Content-Type still gets downloaded; some servers never send one
        if let Some(ct) = content_type.as_deref() {
            if !is_markup_content_type(ct) {
                debug!("Skipping body of {} - non-markup content-type: {}", final_url, ct);
                return Ok(FetchedPage {
                    final_url,
                    status,
                    content_type,
                    redirect_count,
                    body: Vec::new(),
                    size: 0,
                    truncated: false,
                    elapsed: Default::default(),
                });
            }
        }

        let body =
            stream_body_with_limit(response, self.config.max_body_size, limit_seconds).await?;

        Ok(FetchedPage {
            final_url,
            status,
            content_type,
            redirect_count,
            size: body.bytes.len() as u64,
            body: body.bytes,
            truncated: body.truncated,
            elapsed: Default::default(),
        })
    }
}
