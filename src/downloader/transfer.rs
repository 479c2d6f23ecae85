//! Transfer executor: retrieves the bytes behind an address.

use super::config::DownloadOptions;
use crate::download::{Payload, ResolvedLocator};
use crate::error::{Error, Result};
use crate::http::{Body, ChunkStream, Transport};
use crate::progress::{report, ProgressCallback};
use crate::utils::declared_total;

use bytes::BytesMut;
use futures::StreamExt;
use tracing::debug;

/// Upper bound for the buffer reserved up front from a declared size.
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// Fetch the bytes behind `locator`.
///
/// - Refuses absolute locators without any request when remote locators are
///   disabled.
/// - Issues exactly one request; a status outside 200-299 is an
///   [`Error::HttpStatus`].
/// - Streams the body chunk by chunk when a progress callback is set and the
///   transport exposes a chunk reader, otherwise waits for the whole body and
///   reports progress at most once.
pub async fn execute(
    transport: &dyn Transport,
    locator: &ResolvedLocator,
    options: &DownloadOptions,
) -> Result<Payload> {
    if locator.is_absolute() && !options.allow_remote_locators {
        return Err(Error::PolicyViolation(format!(
            "remote locator \"{}\" refused: remote locators are disabled",
            locator.original
        )));
    }

    let response = transport
        .send(&locator.address, &options.request_options)
        .await?;

    if !response.status().is_success() {
        return Err(Error::HttpStatus {
            status: response.status().as_u16(),
            status_text: response.status_text().to_string(),
        });
    }

    let (_, headers, body) = response.into_parts();
    let total = declared_total(&headers);
    debug!(address = %locator.address, ?total, streaming = body.is_streaming(), "response received");

    match (&options.on_progress, body) {
        (Some(callback), Body::Stream(chunks)) => read_with_progress(chunks, callback, total).await,
        (callback, body) => {
            let data = body.collect().await?;
            if let Some(callback) = callback {
                report(callback, data.len() as u64, total);
            }
            Ok(Payload::new(data))
        }
    }
}

/// Read `chunks` in arrival order, reporting after each one.
///
/// The next chunk is only polled once the callback for the previous one has
/// returned.
async fn read_with_progress(
    mut chunks: ChunkStream,
    callback: &ProgressCallback,
    total: Option<u64>,
) -> Result<Payload> {
    let capacity = total.unwrap_or(0).min(MAX_PREALLOCATION) as usize;
    let mut buffer = BytesMut::with_capacity(capacity);
    let mut loaded: u64 = 0;

    debug!("Retrieving chunks...");
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        loaded += chunk.len() as u64;
        buffer.extend_from_slice(&chunk);
        report(callback, loaded, total);
    }

    Ok(Payload::new(buffer.freeze()))
}
