//! Size-guarded body download.

use futures::StreamExt;
use log::debug;

use crate::error_handling::{fetch_error_from_reqwest, FetchError};

/// Body bytes read from a response, possibly cut short.
#[derive(Debug)]
pub(crate) struct LimitedBody {
    pub bytes: Vec<u8>,
    pub truncated: bool,
}

/// Streams a response body, stopping once more than `max_size` bytes have arrived.
///
/// Crossing the limit is not an error: the chunk that crossed it is kept and the rest
/// of the transfer is dropped. Metadata sits in the document head, so a partial body
/// is still worth parsing.
///
/// # Errors
///
/// Returns a timeout or transport error if the stream fails before the limit is hit.
pub(crate) async fn stream_body_with_limit(
    response: reqwest::Response,
    max_size: usize,
    limit_seconds: u64,
) -> Result<LimitedBody, FetchError> {
    let mut stream = response.bytes_stream();
    let mut bytes = Vec::with_capacity(max_size.min(64 * 1024));

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| fetch_error_from_reqwest(&e, limit_seconds))?;
        bytes.extend_from_slice(&chunk);

        if bytes.len() > max_size {
            debug!(
                "Body exceeds {} byte limit, aborting transfer at {} bytes",
                max_size,
                bytes.len()
            );
            return Ok(LimitedBody {
                bytes,
                truncated: true,
            });
        }
    }

    Ok(LimitedBody {
        bytes,
        truncated: false,
    })
}
