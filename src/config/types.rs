//! Configuration types and CLI options.
//!
//! This module defines the read-only settings consumed by the fetcher and the HTTP
//! endpoint, and the command-line surface that builds them.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_BODY_SIZE,
    DEFAULT_REQUEST_DEADLINE_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_REDIRECTS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Fetch limits and identity, fixed for the life of the process.
///
/// # Examples
///
/// ```
/// use url_metadata::FetchConfig;
///
/// let config = FetchConfig {
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// assert_eq!(config.max_redirects, 3);
/// ```
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// TCP connect timeout in seconds
    pub connect_timeout_seconds: u64,

    /// Total fetch timeout in seconds (redirects and body included)
    pub timeout_seconds: u64,

    /// Body bytes after which the transfer is cut short
    pub max_body_size: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Redirect hops followed before giving up
    pub max_redirects: usize,
}

impl FetchConfig {
    /// Connect-phase budget as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Whole-fetch budget as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: MAX_REDIRECTS,
        }
    }
}

/// Settings for the HTTP endpoint.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// Wall-clock ceiling for one inbound request, in seconds
    pub request_deadline_seconds: u64,
}

impl ServerConfig {
    /// Request ceiling as a `Duration`.
    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_deadline_seconds: DEFAULT_REQUEST_DEADLINE_SECS,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Serve the metadata endpoint
/// url_metadata serve --bind 0.0.0.0:8080
///
/// # One-shot lookup, JSON on stdout
/// url_metadata --timeout-seconds 5 fetch https://example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "url_metadata",
    about = "Fetches a URL under strict limits and reports its page metadata as JSON."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Fetch limits
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// What to run
    #[command(subcommand)]
    pub command: Command,
}

/// Fetch limits shared by every subcommand.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// TCP connect timeout in seconds
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS, global = true)]
    pub connect_timeout_seconds: u64,

    /// Total fetch timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Maximum body bytes to download before cutting the transfer short
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_SIZE, global = true)]
    pub max_body_size: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP endpoint (`GET /?url=...`)
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND_ADDR)]
        bind: String,

        /// Wall-clock ceiling per inbound request in seconds
        #[arg(long, default_value_t = DEFAULT_REQUEST_DEADLINE_SECS)]
        request_deadline_seconds: u64,
    },
    /// Look up a single URL and print the JSON envelope
    Fetch {
        /// Target URL (scheme optional)
        url: String,
    },
}

impl Opt {
    /// Builds the fetch settings from the parsed flags.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            connect_timeout_seconds: self.fetch.connect_timeout_seconds,
            timeout_seconds: self.fetch.timeout_seconds,
            max_body_size: self.fetch.max_body_size,
            user_agent: self.fetch.user_agent.clone(),
            max_redirects: MAX_REDIRECTS,
        }
    }

    /// Checks cross-field constraints clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns a message when a timeout is zero or the request deadline does not
    /// exceed the fetch timeout.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch.timeout_seconds == 0 {
            return Err("--timeout-seconds must be greater than 0".to_string());
        }
        if self.fetch.connect_timeout_seconds == 0 {
            return Err("--connect-timeout-seconds must be greater than 0".to_string());
        }
        if let Command::Serve {
            request_deadline_seconds,
            ..
        } = &self.command
        {
            if *request_deadline_seconds <= self.fetch.timeout_seconds {
                return Err(format!(
                    "--request-deadline-seconds ({}) must exceed --timeout-seconds ({})",
                    request_deadline_seconds, self.fetch.timeout_seconds
                ));
            }
        }
        Ok(())
    }
}
