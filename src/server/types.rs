//! Server state and response envelope.

use std::time::Duration;

use serde::Serialize;

use crate::config::ServerConfig;
use crate::fetch::Fetcher;

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Fetcher shared by every request
    pub fetcher: Fetcher,
    /// Wall-clock ceiling for one request
    pub request_deadline: Duration,
}

impl ServerState {
    /// Builds handler state from a fetcher and the server settings.
    pub fn new(fetcher: Fetcher, config: &ServerConfig) -> Self {
        Self {
            fetcher,
            request_deadline: config.request_deadline(),
        }
    }
}

/// `meta` section of every response
#[derive(Debug, Serialize)]
pub struct EnvelopeMeta {
    pub status: u16,
    /// Unix time in seconds
    pub timestamp: i64,
    /// Present on successful responses only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,
}

/// Top-level JSON body
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

/// `data` section of a failed request
#[derive(Debug, Serialize)]
pub struct ErrorData {
    pub error: String,
}
