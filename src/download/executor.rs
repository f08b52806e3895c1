// src/download/executor.rs
// =============================================================================
// Runs one download pass over a list of candidate addresses.
//
// For each address, strictly one after another:
// 1. Extension filters: skip the address if it doesn't end with ".<ext>"
//    (no request is made)
// 2. GET the address (same session, timeout and User-Agent as extraction)
// 3. Content-Type filters: skip the response if its header doesn't match
//    (the request WAS made, the body is just never written)
// 4. Stream the body to <save_location>/<file name> in fixed-size blocks
//
// A failed request or a failed write is recorded and the loop moves on. Only
// two things stop a pass before it starts: the page fetch had already failed
// (nothing to download), or the save directory can't be created.
//
// File names come from the last path segment only, so two addresses such as
// /a/logo.png and /b/logo.png land on the same file and the later one wins.
// Each overwrite within a pass is logged and counted in the BatchResult.
// =============================================================================

use reqwest::{Client, Response};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::location::{ensure_save_location, filename_for};
use super::outcome::{BatchResult, DownloadError, DownloadOutcome};
use crate::config::FetchConfig;
use crate::fetch::{self, FetchError};
use crate::filter::FilterSpec;

// Errors that abort a whole pass
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Extraction failed, so there are no candidates at all
    #[error("No links found on the supplied URL ({0})")]
    NoLinksFound(FetchError),

    #[error("Could not create save directory {}: {source}", .path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The HTTP session itself could not be set up
    #[error("Could not open HTTP session: {0}")]
    Session(FetchError),
}

// Downloads every candidate that passes `filter` into `save_location`.
//
// Parameters:
//   config: timeout, User-Agent and write block size
//   candidates: the extraction result, passed through as-is so a failed page
//               fetch short-circuits here without touching the filesystem
//   filter: extension or Content-Type filter
//   save_location: directory to create (or reuse)
//
// Returns: a BatchResult with one outcome per candidate, or an ExecuteError
// if the pass couldn't start.
pub async fn execute(
    config: &FetchConfig,
    candidates: &Result<Vec<String>, FetchError>,
    filter: &FilterSpec,
    save_location: &Path,
) -> Result<BatchResult, ExecuteError> {
    let candidates = match candidates {
        Ok(candidates) => candidates,
        Err(err) => return Err(ExecuteError::NoLinksFound(err.clone())),
    };

    ensure_save_location(save_location).map_err(|source| ExecuteError::DirectoryCreateFailed {
        path: save_location.to_path_buf(),
        source,
    })?;

    // One session for the whole pass, dropped when this function returns
    let client = fetch::open_session(config).map_err(ExecuteError::Session)?;

    let mut batch = BatchResult::new(filter, save_location);

    for (position, address) in candidates.iter().enumerate() {
        let outcome =
            download_one(&client, config, filter, save_location, position + 1, address).await;

        match &outcome {
            DownloadOutcome::Saved { path, bytes, .. } => {
                if batch.has_saved(path) {
                    warn!(
                        address = address.as_str(),
                        path = %path.display(),
                        "overwrote a file saved earlier in this pass"
                    );
                }
                info!(address = address.as_str(), path = %path.display(), bytes, "saved");
            }
            DownloadOutcome::Skipped { reason, .. } => {
                debug!(address = address.as_str(), %reason, "skipped");
            }
            DownloadOutcome::Failed { error, .. } => {
                warn!(address = address.as_str(), %error, "download failed");
            }
        }

        batch.record(outcome);
    }

    info!(
        filter = %filter,
        saved = batch.saved_count,
        skipped = batch.skipped_count,
        failed = batch.error_count(),
        "download pass finished"
    );

    Ok(batch)
}

// Handles a single candidate. Never returns an error: every failure becomes
// a Failed outcome.
async fn download_one(
    client: &Client,
    config: &FetchConfig,
    filter: &FilterSpec,
    save_location: &Path,
    index: usize,
    address: &str,
) -> DownloadOutcome {
    if let Some(reason) = filter.reject_address(address) {
        return DownloadOutcome::Skipped {
            address: address.to_string(),
            reason,
        };
    }

    let response = match fetch::get(client, address, config.timeout).await {
        Ok(response) => response,
        Err(err) => {
            return DownloadOutcome::Failed {
                address: address.to_string(),
                error: DownloadError::Fetch(err),
            }
        }
    };

    if let Some(reason) = filter.reject_response(response.headers()) {
        return DownloadOutcome::Skipped {
            address: address.to_string(),
            reason,
        };
    }

    // Named after where we ended up, not where we started
    let filename = filename_for(response.url(), index, filter);
    let path = save_location.join(filename);

    match write_body(response, &path, config.chunk_size, config.timeout).await {
        Ok(bytes) => DownloadOutcome::Saved {
            address: address.to_string(),
            path,
            bytes,
        },
        Err(error) => DownloadOutcome::Failed {
            address: address.to_string(),
            error,
        },
    }
}

// Streams a response body to `path`, writing at most `chunk_size` bytes at a
// time. Stops at the first empty chunk. Each wait for the next chunk is
// bounded by `timeout`; the transfer as a whole is not. A partially written
// file is left in place if the stream or a write fails midway.
async fn write_body(
    response: Response,
    path: &Path,
    chunk_size: usize,
    timeout: Duration,
) -> Result<u64, DownloadError> {
    let mut file = File::create(path)
        .await
        .map_err(|e| DownloadError::write(path, e))?;

    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = fetch::next_chunk(&mut stream, timeout).await? {
        if chunk.is_empty() {
            break;
        }
        for block in chunk.chunks(chunk_size.max(1)) {
            file.write_all(block)
                .await
                .map_err(|e| DownloadError::write(path, e))?;
            written += block.len() as u64;
        }
    }

    file.flush().await.map_err(|e| DownloadError::write(path, e))?;
    Ok(written)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is the loop sequential if the code is async?
//    - Each download is awaited before the next one starts
//    - async here just means "don't block the thread while waiting on I/O";
//      there is only ever one request in flight
//
// 2. What does bytes_stream() give us?
//    - The body as a Stream of Bytes chunks, read as they arrive
//    - fetch::next_chunk() pulls the next chunk, giving up if the server
//      stays silent for longer than the timeout
//    - The whole file is never held in memory at once
//
// 3. Why does download_one return DownloadOutcome and not Result?
//    - A failure for one address is data to report, not a reason to stop
//    - The ? operator is still used inside write_body, where a failure
//      really does end that one file
// -----------------------------------------------------------------------------
