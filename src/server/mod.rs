//! HTTP endpoint.
//!
//! Serves `GET /?url=...` (and the same at `/api`). Every response, errors included,
//! is a JSON envelope:
//!
//! ```json
//! { "meta": { "status": 200, "timestamp": 1700000000, "response_time_ms": 412.5 },
//!   "data": { "url": "...", "status_code": 200, "meta": { "title": "..." } } }
//! ```
//!
//! Fetch failures answer with the fetcher's suggested status. Anything unexpected is
//! logged and answered with a bare 500.

mod handlers;
mod types;

use axum::routing::{get, MethodRouter};
use axum::Router;

use crate::config::ServerConfig;
use crate::fetch::Fetcher;

use handlers::{describe_handler, method_not_allowed, not_found, respond};
pub use types::ServerState;

/// Builds the application router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", describe_route())
        .route("/api", describe_route())
        .fallback(not_found)
        .with_state(state)
}

/// GET only. axum's `get` also answers HEAD, so HEAD is routed to the 405 explicitly.
fn describe_route() -> MethodRouter<ServerState> {
    get(describe_handler)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

/// Looks up one URL outside the server and returns the status and JSON envelope.
///
/// Produces exactly what `GET /?url=` would answer for `url`.
///
/// # Errors
///
/// Returns an error only if the rendered body cannot be collected.
pub async fn describe_once(state: &ServerState, url: &str) -> Result<(u16, String), anyhow::Error> {
    let response = respond(state, Some(url.to_string())).await;
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to collect response body: {}", e))?;
    Ok((status, String::from_utf8_lossy(&bytes).into_owned()))
}

/// Binds `config.bind_addr` and serves until Ctrl-C.
pub async fn start_server(config: ServerConfig, fetcher: Fetcher) -> Result<(), anyhow::Error> {
    let app = router(ServerState::new(fetcher, &config));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", config.bind_addr, e))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| anyhow::anyhow!("Failed to read bound address: {}", e))?;
    log::info!("Listening on http://{}/?url=<target>", local_addr);
    log::info!("Request deadline {}s", config.request_deadline_seconds);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_describe_once_rejects_invalid_url() {
        let state = ServerState::new(Fetcher::new(Default::default()).unwrap(), &Default::default());
        let (status, body) = describe_once(&state, "not a valid url!!!").await.unwrap();
        assert_eq!(status, 400);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["error"], "Invalid URL format provided.");
        assert_eq!(json["meta"]["status"], 400);
        assert!(json["meta"].get("response_time_ms").is_none());
    }

    #[tokio::test]
    async fn test_start_server_reports_bind_failure() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let config = ServerConfig {
            bind_addr: addr.to_string(),
            ..Default::default()
        };
        let fetcher = Fetcher::new(Default::default()).unwrap();
        let err = start_server(config, fetcher).await.unwrap_err();
        assert!(err.to_string().contains("Failed to bind server"));
    }
}
