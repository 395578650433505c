//! Error categorization.
//!
//! This module turns `reqwest` errors into the fetch failure taxonomy.

use super::types::{FailureKind, FetchError};

/// Categorizes a `reqwest::Error` into a `FailureKind`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `FailureKind` for the error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureKind {
    // Timeout first: a connect timeout reports both is_connect() and is_timeout()
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_builder() {
        FailureKind::Builder
    } else if error.is_redirect() {
        FailureKind::Redirect
    } else if error.is_connect() {
        FailureKind::Connect
    } else if error.is_request() {
        FailureKind::Request
    } else if error.is_body() {
        FailureKind::Body
    } else if error.is_decode() {
        FailureKind::Decode
    } else {
        FailureKind::Other
    }
}

/// Converts a `reqwest::Error` into the `FetchError` the caller sees.
///
/// Every timeout, connect phase included, becomes `FetchError::Timeout` naming the
/// configured total limit. Everything else is a transport error carrying the full
/// error chain.
pub fn fetch_error_from_reqwest(error: &reqwest::Error, limit_seconds: u64) -> FetchError {
    match categorize_reqwest_error(error) {
        FailureKind::Timeout => FetchError::Timeout { limit_seconds },
        kind => FetchError::Transport {
            kind,
            message: error_chain_message(error),
        },
    }
}

/// Flattens an error and its sources into one line.
///
/// `reqwest` hides the useful part ("dns error", "connection refused") in the source
/// chain, so the top-level `Display` alone is not descriptive enough.
fn error_chain_message(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_connection_refused_is_transport_connect() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let err = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();

        assert_eq!(categorize_reqwest_error(&err), FailureKind::Connect);
        let fetch_err = fetch_error_from_reqwest(&err, 10);
        assert_eq!(fetch_err.suggested_status(), 500);
        assert!(matches!(
            fetch_err,
            FetchError::Transport {
                kind: FailureKind::Connect,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_builder_error_is_categorized() {
        let client = reqwest::Client::new();
        let err = client.get("not a url").send().await.unwrap_err();
        assert_eq!(categorize_reqwest_error(&err), FailureKind::Builder);
    }

    #[test]
    fn test_error_chain_message_includes_sources() {
        #[derive(Debug)]
        struct Inner;
        impl std::fmt::Display for Inner {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("connection refused")
            }
        }
        impl std::error::Error for Inner {}

        #[derive(Debug)]
        struct Outer(Inner);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("error sending request")
            }
        }
        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let message = error_chain_message(&Outer(Inner));
        assert_eq!(message, "error sending request: connection refused");
    }
}
