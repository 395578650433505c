//! Handlers for requests that never reach the describe pipeline.

use axum::{http::StatusCode, response::Response};

use super::response::error_response;

/// Any method other than GET on a known path.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed. Use GET.")
}

/// Unknown paths.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}
