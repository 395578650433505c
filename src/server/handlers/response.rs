//! JSON response construction.

use std::time::Instant;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::super::types::{Envelope, EnvelopeMeta, ErrorData};

/// Wraps `data` in the envelope and renders it as pretty-printed JSON.
///
/// `started` adds `response_time_ms` to the envelope.
pub(crate) fn json_response<T: Serialize>(
    status: StatusCode,
    data: T,
    started: Option<Instant>,
) -> Response {
    let envelope = Envelope {
        meta: EnvelopeMeta {
            status: status.as_u16(),
            timestamp: chrono::Utc::now().timestamp(),
            response_time_ms: started.map(|s| round_ms(s.elapsed().as_secs_f64() * 1000.0)),
        },
        data,
    };

    let body = match serde_json::to_string_pretty(&envelope) {
        Ok(body) => body,
        Err(e) => {
            log::error!("Critical error: failed to serialize response: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    let mut response = (status, body).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=UTF-8"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET"),
    );
    response
}

/// Error envelope with `{"error": message}` as data.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    json_response(
        status,
        ErrorData {
            error: message.into(),
        },
        None,
    )
}

/// Generic 500 that reveals nothing about the cause.
pub(crate) fn internal_error() -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

/// Maps a suggested status onto a response status; anything unusable becomes 500.
pub(crate) fn status_from_u16(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Milliseconds rounded to two decimals
fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
