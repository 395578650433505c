//! Error type definitions.
//!
//! This module defines the initialization errors, the fetch failure taxonomy, and the
//! transport failure categories used for logging.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Categories of transport-level failures.
///
/// Derived from a `reqwest::Error` by `categorize_reqwest_error`; embedded in
/// transport error messages so operators can tell DNS/connect problems from
/// protocol problems without reading the full error chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// The request could not be built (bad URL, bad header)
    Builder,
    /// Redirect handling failed
    Redirect,
    /// A client-side timeout fired
    Timeout,
    /// The request failed while being sent
    Request,
    /// DNS resolution, TCP connect or TLS handshake failed
    Connect,
    /// Reading the response body failed
    Body,
    /// Decoding a compressed body failed
    Decode,
    /// Anything else
    Other,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Short human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Builder => "request builder error",
            FailureKind::Redirect => "redirect error",
            FailureKind::Timeout => "timeout",
            FailureKind::Request => "request error",
            FailureKind::Connect => "connect error",
            FailureKind::Body => "body error",
            FailureKind::Decode => "decode error",
            FailureKind::Other => "other error",
        }
    }
}

/// Why a fetch produced no usable page.
///
/// Each variant maps to the HTTP status this service should answer with; see
/// [`FetchError::suggested_status`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The total time budget ran out (connect phase included).
    #[error("Request Timed Out (Limit: {limit_seconds}s)")]
    Timeout {
        /// Configured total timeout
        limit_seconds: u64,
    },

    /// The target answered with a status code of 400 or above.
    #[error("Target URL returned HTTP {status}")]
    TargetStatus {
        /// Status code of the final response
        status: u16,
    },

    /// The redirect chain was longer than allowed.
    #[error("Maximum ({max}) redirects followed")]
    TooManyRedirects {
        /// Configured redirect limit
        max: usize,
    },

    /// DNS, connection, TLS or protocol failure.
    #[error("Transport error: ({kind}) {message}")]
    Transport {
        /// Category of the failure
        kind: FailureKind,
        /// Full error chain from the client
        message: String,
    },

    /// The URL handed to the fetcher could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// HTTP status the caller should surface for this failure.
    ///
    /// Target errors pass through unchanged so a 404 upstream stays a 404 here.
    pub fn suggested_status(&self) -> u16 {
        match self {
            FetchError::Timeout { .. } => 408,
            FetchError::TargetStatus { status } => *status,
            FetchError::InvalidUrl(_) => 400,
            FetchError::TooManyRedirects { .. } | FetchError::Transport { .. } => 500,
        }
    }
}

/// Why a URL could not be described.
#[derive(Error, Debug)]
pub enum DescribeError {
    /// The fetch failed; carries the status to surface.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Something outside fetch and extraction went wrong, such as a panicked
    /// extraction task. Details are logged, never shown to callers.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DescribeError {
    /// HTTP status the caller should surface.
    pub fn suggested_status(&self) -> u16 {
        match self {
            DescribeError::Fetch(e) => e.suggested_status(),
            DescribeError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_failure_kind_as_str_is_unique() {
        let names: std::collections::HashSet<_> =
            FailureKind::iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), FailureKind::iter().count());
    }

    #[test]
    fn test_timeout_message_names_limit() {
        let err = FetchError::Timeout { limit_seconds: 10 };
        assert_eq!(err.to_string(), "Request Timed Out (Limit: 10s)");
        assert_eq!(err.suggested_status(), 408);
    }

    #[test]
    fn test_target_status_passes_through() {
        for status in [400u16, 403, 404, 410, 500, 503] {
            let err = FetchError::TargetStatus { status };
            assert_eq!(err.suggested_status(), status);
            assert!(err.to_string().contains(&status.to_string()));
        }
    }

    #[test]
    fn test_transport_error_is_500_and_embeds_message() {
        let err = FetchError::Transport {
            kind: FailureKind::Connect,
            message: "dns error: failed to lookup address".to_string(),
        };
        assert_eq!(err.suggested_status(), 500);
        let msg = err.to_string();
        assert!(msg.contains("connect error"));
        assert!(msg.contains("failed to lookup address"));
    }

    #[test]
    fn test_describe_error_status() {
        let fetch: DescribeError = FetchError::TargetStatus { status: 404 }.into();
        assert_eq!(fetch.suggested_status(), 404);
        assert_eq!(fetch.to_string(), "Target URL returned HTTP 404");
        assert_eq!(DescribeError::Internal("boom".into()).suggested_status(), 500);
    }

    #[test]
    fn test_too_many_redirects_is_500() {
        let err = FetchError::TooManyRedirects { max: 3 };
        assert_eq!(err.suggested_status(), 500);
        assert_eq!(err.to_string(), "Maximum (3) redirects followed");
    }
}
