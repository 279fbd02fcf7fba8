//! Core downloader implementation with the dispatch loop.
//!
//! The [`Downloader`] fetches the manifest once, then drives every
//! descriptor through path resolution and transfer with at most
//! `concurrency` transfers in flight. Each descriptor is polled by exactly
//! one slot of the pool, and whatever happens to it ends as a
//! [`DownloadResult`]; per-item errors never propagate out of the pool.
//!
//! ```rust,no_run
//! use sfxdl::downloader::DownloaderBuilder;
//! use sfxdl::manifest::ManifestSource;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().build()?;
//! let source = ManifestSource::new("https://gdcolon.com")?;
//!
//! let summary = downloader.run(&source).await?;
//! println!("{} of {} downloaded", summary.succeeded(), summary.attempted());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::download::{
    request_item, resolve_destination, stream_to_file, DownloadDescriptor, DownloadResult,
    Outcome, RunSummary,
};
use crate::error::{ItemError, Result};
use crate::manifest::{fetch_manifest, Manifest, ManifestSource};
use crate::progress::ProgressDisplay;
use crate::utils::expected_length;

use futures::stream::{self, StreamExt};
use reqwest::header::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::fmt::Debug;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main() {
/// use sfxdl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build().unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
    client: ClientWithMiddleware,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    pub(crate) fn new(config: DownloaderConfig, client: ClientWithMiddleware) -> Self {
        Self { config, client }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of concurrent transfers.
    pub fn concurrency(&self) -> usize {
        self.config.pool.concurrency()
    }

    /// Gets the number of bytes written per progress update.
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Fetch the manifest described by `source` with this downloader's client.
    pub async fn fetch_manifest(&self, source: &ManifestSource) -> Result<Manifest> {
        fetch_manifest(&self.client, source).await
    }

    /// Fetch the manifest, download every item and summarize.
    ///
    /// Only manifest errors are returned; failed items are part of the
    /// summary.
    pub async fn run(&self, source: &ManifestSource) -> Result<RunSummary> {
        let manifest = self.fetch_manifest(source).await?;
        let results = self.download(&manifest).await;
        Ok(RunSummary::from_results(&results))
    }

    /// Download every item of `manifest`.
    ///
    /// Returns one result per descriptor, in completion order.
    pub async fn download(&self, manifest: &Manifest) -> Vec<DownloadResult> {
        info!(
            "Downloading {} items into {:?} with {} workers",
            manifest.len(),
            self.config.directory,
            self.concurrency()
        );

        let progress_display =
            ProgressDisplay::new(self.config.style_options.clone(), manifest.len());

        let results = stream::iter(manifest)
            .map(|d| self.fetch(d, &progress_display))
            .buffer_unordered(self.concurrency())
            .collect::<Vec<_>>()
            .await;

        progress_display.finish();

        let failed = results.iter().filter(|r| !r.is_success()).count();
        info!(
            "Finished: {} succeeded, {} failed",
            results.len() - failed,
            failed
        );
        results
    }

    /// Process one descriptor and report its result.
    async fn fetch(
        &self,
        descriptor: &DownloadDescriptor,
        progress_display: &ProgressDisplay,
    ) -> DownloadResult {
        let outcome = match self.transfer(descriptor, progress_display).await {
            Ok(bytes) => Outcome::Success { bytes },
            Err(e) => {
                warn!("{} failed: {}", descriptor.local_name(), e);
                Outcome::Failure(e)
            }
        };
        let result = DownloadResult::new(descriptor.clone(), outcome);

        progress_display.report(&result);
        if let Some(ref callback) = self.config.on_complete {
            callback(&result);
        }

        result
    }

    async fn transfer(
        &self,
        descriptor: &DownloadDescriptor,
        progress_display: &ProgressDisplay,
    ) -> std::result::Result<u64, ItemError> {
        let output = resolve_destination(&self.config.directory, descriptor).await?;
        let res = request_item(&self.client, descriptor).await?;

        let pb = progress_display
            .create_child_progress(descriptor.local_name(), expected_length(&res));
        let written = stream_to_file(res, &output, self.config.chunk_size, &pb).await;
        progress_display.finish_child(pb);

        if let Ok(bytes) = &written {
            debug!("Wrote {} bytes to {:?}", bytes, output);
        }
        written
    }
}
