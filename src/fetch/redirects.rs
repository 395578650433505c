//! HTTP redirect following.
//!
//! The client never follows redirects on its own; this module walks the chain so the
//! hop count and the final URL are known exactly.

use log::{debug, warn};
use reqwest::Url;

use crate::error_handling::{fetch_error_from_reqwest, FailureKind, FetchError};
use crate::fetch::request::RequestHeaders;

/// Response at the end of a redirect chain.
pub(crate) struct FinalResponse {
    pub response: reqwest::Response,
    pub redirect_count: usize,
}

/// Whether a status code is a redirect that carries a `Location` to follow.
fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Sends a GET to `start_url` and follows redirects up to `max_hops` times.
///
/// Each follow-up request carries the browser header set plus a `Referer` naming the
/// URL that redirected. A redirect status without a `Location` header ends the chain
/// at that response.
///
/// # Errors
///
/// - `FetchError::TooManyRedirects` when a further redirect arrives after `max_hops`
/// - `FetchError::InvalidUrl` when the start URL cannot be parsed
/// - `FetchError::Transport` (redirect kind) when a `Location` cannot be resolved
/// - Timeout or transport errors from the underlying requests
pub(crate) async fn follow_redirects(
    client: &reqwest::Client,
    start_url: &str,
    max_hops: usize,
    limit_seconds: u64,
) -> Result<FinalResponse, FetchError> {
    let mut current =
        Url::parse(start_url).map_err(|e| FetchError::InvalidUrl(format!("{start_url}: {e}")))?;
    let mut referer: Option<Url> = None;
    let mut redirect_count = 0;

    loop {
        let mut builder = RequestHeaders::apply_to_request_builder(client.get(current.clone()));
        if let Some(previous) = &referer {
            builder = builder.header(reqwest::header::REFERER, previous.as_str());
        }
        let response = builder
            .send()
            .await
            .map_err(|e| fetch_error_from_reqwest(&e, limit_seconds))?;

        let status = response.status().as_u16();
        if !is_redirect_status(status) {
            return Ok(FinalResponse {
                response,
                redirect_count,
            });
        }

        // Servers occasionally send raw UTF-8 in Location
        let Some(location) = response
            .headers()
            .get(reqwest::header::LOCATION)
            .map(|loc| String::from_utf8_lossy(loc.as_bytes()).into_owned())
        else {
            warn!("Redirect status {} for {} but no Location header", status, current);
            return Ok(FinalResponse {
                response,
                redirect_count,
            });
        };

        if redirect_count >= max_hops {
            return Err(FetchError::TooManyRedirects { max: max_hops });
        }

        let next = current
            .join(&location)
            .map_err(|e| FetchError::Transport {
                kind: FailureKind::Redirect,
                message: format!("Unusable Location {location:?} from {current}: {e}"),
            })?;
        debug!("Redirect {} -> {} ({})", current, next, status);

        redirect_count += 1;
        referer = Some(std::mem::replace(&mut current, next));
    }
}
