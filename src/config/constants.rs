//! Configuration constants.
//!
//! This module defines the defaults for every operator-tunable limit, plus the
//! fixed values the fetcher never exposes as settings.

/// TCP connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Total time allowed for one fetch (redirect chain plus body transfer), in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum response body size in bytes (2MB)
///
/// Only the document head matters for metadata, so the transfer is cut once this many
/// bytes have arrived and the partial body is kept.
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum number of redirect hops to follow
pub const MAX_REDIRECTS: usize = 3;

/// Wall-clock ceiling for one inbound request in seconds.
///
/// Must stay above `DEFAULT_TIMEOUT_SECS` so a fetch always resolves before the
/// request handler gives up on it.
pub const DEFAULT_REQUEST_DEADLINE_SECS: u64 = 20;

/// Default listen address for the HTTP endpoint
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default User-Agent string for HTTP requests.
///
/// Mimics a desktop Chrome build; many sites answer 403 to anything that looks like a bot.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// Maximum inbound URL length (2048 characters)
pub const MAX_URL_LENGTH: usize = 2048;

/// Number of leading body bytes scanned for a `<meta charset>` declaration
pub const CHARSET_PRESCAN_BYTES: usize = 1024;
