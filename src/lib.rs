//! url_metadata library: fetch a URL under strict limits and extract its page metadata
//!
//! The crate has two halves:
//! - [`Fetcher`] performs one constrained GET (browser-like headers, at most three
//!   redirects, a total time budget, a body size guard that keeps partial bodies)
//! - [`extract_metadata`] turns page bytes into a [`MetadataMap`] (title, description,
//!   image, favicon, canonical, lang, charset, keywords, author)
//!
//! [`describe_url`] composes them, and [`router`] exposes the result over HTTP as
//! `GET /?url=...`.
//!
//! # Example
//!
//! ```no_run
//! use url_metadata::{describe_url, FetchConfig, Fetcher};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(FetchConfig::default())?;
//! let payload = describe_url(&fetcher, "https://example.com/").await?;
//! println!("{}", serde_json::to_string_pretty(&payload)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Fetching requires a Tokio runtime. Extraction is synchronous and can be called
//! from anywhere.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod parse;
mod server;

// Re-export public API
pub use app::{describe_url, validate_and_normalize_url, PageMeta, PagePayload};
pub use config::{FetchConfig, LogFormat, LogLevel, ServerConfig};
pub use error_handling::{DescribeError, FailureKind, FetchError, InitializationError};
pub use fetch::{FetchResult, FetchedPage, Fetcher};
pub use parse::{
    clean_text, decode_html, extract_metadata, extract_metadata_with_hint, resolve_url,
    MetadataMap,
};
pub use server::{describe_once, router, start_server, ServerState};
