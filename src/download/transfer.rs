//! Streaming one remote resource to disk.
//!
//! The body is written in chunks of at most `chunk_size` bytes through a
//! single file handle that stays open for the whole transfer, and the
//! observer hears about every chunk right after it has been written. The body
//! lands in a hidden `.sfxdl-*.part` file with a random name first and is
//! renamed over the destination only once it is complete, so an interrupted
//! run never leaves a truncated file under the final name, and no item can
//! open the in-flight file of another.

use super::descriptor::DownloadDescriptor;
use super::path::partial_file;
use crate::error::ItemError;
use crate::utils::expected_length;

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::Response;
use reqwest_middleware::ClientWithMiddleware;
use std::path::Path;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// Default number of bytes written per progress update.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Receives a progress increment after each chunk has been written.
pub trait TransferObserver: Send + Sync {
    /// `bytes` were just written to disk.
    fn on_chunk(&self, bytes: u64);
}

impl TransferObserver for ProgressBar {
    fn on_chunk(&self, bytes: u64) {
        self.inc(bytes);
    }
}

/// Send the GET request for `descriptor` and check its status.
pub async fn request_item(
    client: &ClientWithMiddleware,
    descriptor: &DownloadDescriptor,
) -> Result<Response, ItemError> {
    debug!("Fetching {}", descriptor.url());
    let res = client
        .get(descriptor.url().clone())
        .send()
        .await
        .map_err(ItemError::transfer)?;

    res.error_for_status().map_err(ItemError::transfer)
}

/// Stream the body of `response` into `destination`.
///
/// Returns the number of bytes written. When the response announces a
/// `Content-Length`, a body of any other length is a
/// [`ItemError::TransferFailed`] and the destination is left untouched.
pub async fn stream_to_file<O>(
    response: Response,
    destination: &Path,
    chunk_size: usize,
    observer: &O,
) -> Result<u64, ItemError>
where
    O: TransferObserver + ?Sized,
{
    let expected = expected_length(&response);
    debug!("Creating partial file for {:?}", destination);
    let (file, partial) = partial_file(destination)
        .map_err(|e| ItemError::write(destination, e))?
        .into_parts();

    let file = fs::File::from_std(file);
    let result = match write_body(response, file, &partial, chunk_size, observer).await {
        Ok(written) => match expected {
            Some(expected) if expected != written => Err(ItemError::transfer(format!(
                "expected {} bytes but received {}",
                expected, written
            ))),
            _ => Ok(written),
        },
        Err(e) => Err(e),
    };

    let written = match result {
        Ok(written) => written,
        Err(e) => {
            let path = partial.to_path_buf();
            if let Err(rm) = partial.close() {
                debug!("Could not remove {:?}: {}", path, rm);
            }
            return Err(e);
        }
    };

    debug!("Moving {:?} to {:?}", partial, destination);
    partial
        .persist(destination)
        .map_err(|e| ItemError::write(destination, e.error))?;

    Ok(written)
}

async fn write_body<O>(
    response: Response,
    mut file: fs::File,
    path: &Path,
    chunk_size: usize,
    observer: &O,
) -> Result<u64, ItemError>
where
    O: TransferObserver + ?Sized,
{
    let chunk_size = chunk_size.max(1);
    let mut written: u64 = 0;

    debug!("Retrieving chunks...");
    let mut stream = response.bytes_stream();
    while let Some(item) = stream.next().await {
        let bytes = item.map_err(ItemError::transfer)?;
        for piece in bytes.chunks(chunk_size) {
            file.write_all(piece)
                .await
                .map_err(|e| ItemError::write(path, e))?;
            let len = piece.len() as u64;
            written += len;
            observer.on_chunk(len);
        }
    }

    file.flush().await.map_err(|e| ItemError::write(path, e))?;
    Ok(written)
}
