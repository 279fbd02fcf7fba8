//! Configuration structures and defaults for the downloader.
//!
//! # Sizing the worker pool
//!
//! Transfers spend most of their time waiting on the network, so the pool is
//! sized above the CPU count:
//! `concurrency = available_parallelism / (1 - blocking_coefficient)`.
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use sfxdl::downloader::WorkerPoolConfig;
//!
//! let cpus = NonZeroUsize::new(4).unwrap();
//! assert_eq!(WorkerPoolConfig::from_parallelism(cpus, 0.5).concurrency(), 8);
//! assert_eq!(WorkerPoolConfig::fixed(0).concurrency(), 1);
//! ```

use crate::download::{DownloadResult, DEFAULT_CHUNK_SIZE};
use crate::progress::StyleOptions;

use reqwest::header::HeaderMap;
use reqwest::Proxy;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::available_parallelism;

/// Callback type for item completion events.
pub type CompletionCallback = Box<dyn Fn(&DownloadResult) + Send + Sync>;

/// Number of items transferred at the same time. Fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPoolConfig {
    concurrency: NonZeroUsize,
}

impl WorkerPoolConfig {
    /// Expected fraction of a worker's time spent waiting on I/O.
    pub const DEFAULT_BLOCKING_COEFFICIENT: f64 = 0.5;
    /// Upper bound for the coefficient; 1 or more would divide by zero or flip the sign.
    pub const MAX_BLOCKING_COEFFICIENT: f64 = 0.95;

    /// Pool sized from this machine's available parallelism.
    pub fn from_blocking_coefficient(blocking_coefficient: f64) -> Self {
        let parallelism = available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self::from_parallelism(parallelism, blocking_coefficient)
    }

    /// Pool sized from an explicit parallelism.
    ///
    /// The coefficient is clamped to `[0, MAX_BLOCKING_COEFFICIENT]`; NaN
    /// means the default.
    pub fn from_parallelism(parallelism: NonZeroUsize, blocking_coefficient: f64) -> Self {
        let coefficient = Self::clamp_coefficient(blocking_coefficient);
        let workers = (parallelism.get() as f64 / (1.0 - coefficient)).round() as usize;
        Self::fixed(workers)
    }

    /// Pool of exactly `concurrency` workers, at least one.
    pub fn fixed(concurrency: usize) -> Self {
        Self {
            concurrency: NonZeroUsize::new(concurrency).unwrap_or(NonZeroUsize::MIN),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.get()
    }

    fn clamp_coefficient(coefficient: f64) -> f64 {
        if coefficient.is_nan() {
            Self::DEFAULT_BLOCKING_COEFFICIENT
        } else {
            coefficient.clamp(0.0, Self::MAX_BLOCKING_COEFFICIENT)
        }
    }
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self::from_blocking_coefficient(Self::DEFAULT_BLOCKING_COEFFICIENT)
    }
}

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Size of the worker pool.
    pub pool: WorkerPoolConfig,
    /// Bytes written per progress update.
    pub chunk_size: usize,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy for every request.
    pub proxy: Option<Proxy>,
    /// Value of the `User-Agent` header.
    pub user_agent: Option<String>,
    /// Callback for when each item completes.
    pub on_complete: Option<Arc<CompletionCallback>>,
}

impl DownloaderConfig {
    pub const DEFAULT_DIRECTORY: &'static str = "sfx";
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("pool", &self.pool)
            .field("chunk_size", &self.chunk_size)
            .field("style_options", &self.style_options)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(Self::DEFAULT_DIRECTORY),
            pool: WorkerPoolConfig::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            style_options: StyleOptions::default(),
            headers: None,
            proxy: None,
            user_agent: None,
            on_complete: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpus(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_pool_from_parallelism() {
        assert_eq!(WorkerPoolConfig::from_parallelism(cpus(4), 0.5).concurrency(), 8);
        assert_eq!(WorkerPoolConfig::from_parallelism(cpus(4), 0.0).concurrency(), 4);
        assert_eq!(WorkerPoolConfig::from_parallelism(cpus(3), 0.9).concurrency(), 30);
        assert_eq!(WorkerPoolConfig::from_parallelism(cpus(1), 0.5).concurrency(), 2);
    }

    #[test]
    fn test_pool_clamps_coefficient() {
        assert_eq!(WorkerPoolConfig::from_parallelism(cpus(4), -3.0).concurrency(), 4);
        assert_eq!(WorkerPoolConfig::from_parallelism(cpus(4), 1.0).concurrency(), 80);
        assert_eq!(WorkerPoolConfig::from_parallelism(cpus(4), 7.5).concurrency(), 80);
        assert_eq!(
            WorkerPoolConfig::from_parallelism(cpus(4), f64::NAN).concurrency(),
            8
        );
    }

    #[test]
    fn test_pool_is_never_empty() {
        assert_eq!(WorkerPoolConfig::fixed(0).concurrency(), 1);
        assert_eq!(WorkerPoolConfig::fixed(12).concurrency(), 12);
        assert!(WorkerPoolConfig::default().concurrency() >= 1);
    }

    #[test]
    fn test_config_defaults() {
        let config = DownloaderConfig::default();
        assert_eq!(config.directory, PathBuf::from("sfx"));
        assert_eq!(config.chunk_size, 1024);
        assert!(config.on_complete.is_none());
    }
}
