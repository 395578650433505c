//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `url_metadata` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Dispatch to the HTTP server or a one-shot lookup
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use url_metadata::config::{Command, Opt, DEFAULT_REQUEST_DEADLINE_SECS};
use url_metadata::initialization::init_logger_with;
use url_metadata::{describe_once, start_server, Fetcher, ServerConfig, ServerState};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    if let Err(msg) = opt.validate() {
        eprintln!("url_metadata error: {msg}");
        process::exit(2);
    }

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let fetch_config = opt.fetch_config();
    // One-shot lookups have no operator-set deadline; keep it above the fetch budget
    let one_shot_deadline = DEFAULT_REQUEST_DEADLINE_SECS.max(fetch_config.timeout_seconds + 1);
    let fetcher = Fetcher::new(fetch_config).context("Failed to initialize HTTP client")?;

    match opt.command {
        Command::Serve {
            bind,
            request_deadline_seconds,
        } => {
            let config = ServerConfig {
                bind_addr: bind,
                request_deadline_seconds,
            };
            if let Err(e) = start_server(config, fetcher).await {
                eprintln!("url_metadata error: {:#}", e);
                process::exit(1);
            }
            Ok(())
        }
        Command::Fetch { url } => {
            let config = ServerConfig {
                request_deadline_seconds: one_shot_deadline,
                ..Default::default()
            };
            let state = ServerState::new(fetcher, &config);
            match describe_once(&state, &url).await {
                Ok((status, body)) => {
                    println!("{body}");
                    if status >= 400 {
                        process::exit(1);
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("url_metadata error: {:#}", e);
                    process::exit(1);
                }
            }
        }
    }
}
