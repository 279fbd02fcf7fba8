//! sfxdl fetches a JSON sound list from a server and downloads every sound
//! effect it references, several at a time, with a progress bar per file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use sfxdl::{DownloaderBuilder, Error, ManifestSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let source = ManifestSource::new("https://gdcolon.com")?.with_path("/server/soundlist");
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("sfx"))
//!     .build()?;
//! let summary = downloader.run(&source).await?;
//! println!("{} failed", summary.failed());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`manifest`] - Where the sound list lives and how it is parsed
//! - [`download`] - Descriptors, path resolution, streaming transfer and results
//! - [`downloader`] - The `Downloader`, its builder and the worker pool sizing
//! - [`error`] - Run-level `Error` and per-item `ItemError`
//! - [`http`] - HTTP client construction
//! - [`progress`] - Progress bar styling and display management
//! - [`utils`] - Shared utility functions

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod manifest;
pub mod progress;
pub mod utils;

pub use download::{DownloadDescriptor, DownloadResult, Outcome, RunSummary};
pub use downloader::{Downloader, DownloaderBuilder, WorkerPoolConfig};
pub use error::{Error, ItemError, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use manifest::{Manifest, ManifestSource};
pub use progress::{ProgressBarOpts, StyleOptions};
