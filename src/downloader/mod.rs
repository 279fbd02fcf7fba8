//! The worker pool that drives a whole run.
//!
//! - `downloader` - [`Downloader`], fetching the manifest and dispatching items
//! - `builder` - [`DownloaderBuilder`] for configuration
//! - `config` - [`DownloaderConfig`], [`WorkerPoolConfig`] and callback types
//!
//! ```rust
//! use sfxdl::downloader::DownloaderBuilder;
//!
//! // Create a downloader with hidden progress bars
//! let downloader = DownloaderBuilder::hidden().build();
//! ```

pub mod builder;
pub mod config;
#[allow(clippy::module_inception)]
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{CompletionCallback, DownloaderConfig, WorkerPoolConfig};
pub use downloader::Downloader;
