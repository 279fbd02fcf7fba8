//! Error handling for sfxdl.
//!
//! Errors come in two tiers. [`Error`] covers everything that stops a run
//! before any item is attempted: the manifest could not be fetched or parsed,
//! or the HTTP client could not be built. [`ItemError`] covers failures of a
//! single item; those are turned into a failed
//! [`DownloadResult`](crate::download::DownloadResult) and never abort sibling
//! downloads.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole run.
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest request failed or returned a non-success status.
    #[error("manifest unavailable at {url}: {source}")]
    ManifestUnavailable {
        url: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    /// The manifest body is not an array of well-formed entries.
    #[error("manifest is malformed: {0}")]
    ManifestMalformed(String),

    /// A domain, manifest path or item path does not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library, typically while building the client.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Failure of a single item. Recovered by skipping the item.
#[derive(Error, Debug)]
pub enum ItemError {
    /// The destination directory could not be created.
    #[error("cannot create directory {}: {source}", path.display())]
    PathCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The request failed, the server answered with an error status, or the
    /// body ended before the advertised length.
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// Writing the destination file failed.
    #[error("cannot write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ItemError {
    pub(crate) fn transfer(reason: impl std::fmt::Display) -> Self {
        ItemError::TransferFailed(reason.to_string())
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ItemError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for operations that can fail with a fatal [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
