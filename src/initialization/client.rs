//! HTTP client initialization.
//!
//! This module builds the single `reqwest::Client` used for all outbound fetches.

use reqwest::ClientBuilder;

use crate::config::FetchConfig;

/// Initializes the HTTP client used by the fetcher.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the fetch settings
/// - Connect timeout from the fetch settings (the total budget is enforced per fetch)
/// - Redirects disabled, so the fetcher can follow and count them itself
/// - Transparent gzip/deflate/brotli decoding
/// - Certificate and hostname verification turned off
///
/// Verification is off so sites on shared hosting with mismatched or self-signed
/// certificates can still be described. This is a security trade-off: responses over
/// HTTPS are not authenticated. It is logged once when the client is built.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &FetchConfig) -> Result<reqwest::Client, reqwest::Error> {
    log::warn!("TLS certificate and hostname verification are disabled for outbound fetches");

    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(config.connect_timeout())
        .user_agent(config.user_agent.clone())
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()
}
