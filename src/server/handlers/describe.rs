//! The metadata endpoint.

use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::Response,
};
use log::{error, info};

use super::super::types::ServerState;
use super::response::{error_response, internal_error, json_response, status_from_u16};
use crate::app::{describe_url, validate_and_normalize_url};
use crate::error_handling::DescribeError;

/// Last value of `name` in a raw query string, percent-decoded.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .last()
}

/// `GET /?url=...`: fetches the URL and answers with its metadata.
pub async fn describe_handler(
    State(state): State<ServerState>,
    RawQuery(query): RawQuery,
) -> Response {
    respond(&state, query_param(query.as_deref(), "url")).await
}

/// Runs one lookup for a raw, caller-supplied URL and renders the envelope.
pub(crate) async fn respond(state: &ServerState, raw_url: Option<String>) -> Response {
    let started = Instant::now();

    let Some(raw_url) = raw_url.filter(|u| !u.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required parameter: url");
    };

    let Some(url) = validate_and_normalize_url(&raw_url) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid URL format provided.");
    };

    match tokio::time::timeout(state.request_deadline, describe_url(&state.fetcher, &url)).await {
        Ok(Ok(payload)) => {
            info!(
                "Described {} ({}) in {:.0}ms",
                url,
                payload.status_code,
                started.elapsed().as_secs_f64() * 1000.0
            );
            json_response(StatusCode::OK, payload, Some(started))
        }
        Ok(Err(DescribeError::Fetch(e))) => {
            error_response(status_from_u16(e.suggested_status()), e.to_string())
        }
        Ok(Err(DescribeError::Internal(detail))) => {
            error!("Critical error: {}", detail);
            internal_error()
        }
        Err(_) => {
            error!(
                "Critical error: request for {} exceeded the {}s deadline",
                url,
                state.request_deadline.as_secs()
            );
            internal_error()
        }
    }
}
