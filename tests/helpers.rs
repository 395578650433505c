// Shared test helpers for running the metadata endpoint in-process.

use tokio::net::TcpListener;

use url_metadata::{router, FetchConfig, Fetcher, ServerConfig, ServerState};

/// Starts the endpoint on an ephemeral port and returns its base URL.
pub async fn spawn_app_with(fetch: FetchConfig, server: ServerConfig) -> String {
    let fetcher = Fetcher::new(fetch).expect("Failed to build fetcher");
    let app = router(ServerState::new(fetcher, &server));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// Starts the endpoint with default limits.
#[allow(dead_code)] // Not every test file needs custom limits
pub async fn spawn_app() -> String {
    spawn_app_with(FetchConfig::default(), ServerConfig::default()).await
}

/// Calls `GET {app}{path}` with `url` as the query parameter.
pub async fn get_metadata(app: &str, path: &str, url: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(format!("{app}{path}"))
        .query(&[("url", url)])
        .send()
        .await
        .expect("Request to test server failed")
}
