//! Builder pattern implementation for creating Downloader instances.
//!
//! ```rust
//! use sfxdl::downloader::{DownloaderBuilder, WorkerPoolConfig};
//! use sfxdl::download::Outcome;
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./sfx"))
//!     .pool(WorkerPoolConfig::fixed(4))
//!     .on_complete(|result| {
//!         if let Outcome::Failure(e) = result.outcome() {
//!             eprintln!("{}: {}", result.descriptor().local_name(), e);
//!         }
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{
    config::{DownloaderConfig, WorkerPoolConfig},
    downloader::Downloader,
};
use crate::download::DownloadResult;
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};
use crate::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::{path::PathBuf, sync::Arc};

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main() {
/// use sfxdl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().concurrency(5).directory("sfx".into()).build();
/// assert!(d.is_ok());
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Sets the directory where to store the files.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the worker pool.
    pub fn pool(mut self, pool: WorkerPoolConfig) -> Self {
        self.config.pool = pool;
        self
    }

    /// Set a fixed number of concurrent transfers (at least one).
    pub fn concurrency(self, concurrency: usize) -> Self {
        self.pool(WorkerPoolConfig::fixed(concurrency))
    }

    /// Set the number of bytes written per progress update (at least one).
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Set callback for when each item completes.
    ///
    /// The callback runs once per manifest entry, as soon as that entry
    /// finishes, whether it succeeded or failed.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DownloadResult) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use sfxdl::downloader::DownloaderBuilder;
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::ACCEPT, HeaderValue::from_static("audio/*"))
    ///     .build();
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn build(self) -> Result<Downloader> {
        let mut http = HttpClientConfig {
            proxy: self.config.proxy.clone(),
            headers: self.config.headers.clone(),
            ..HttpClientConfig::default()
        };
        if let Some(ref ua) = self.config.user_agent {
            http.user_agent = ua.clone();
        }

        let client = create_http_client(http)?;
        Ok(Downloader::new(self.config, client))
    }
}
