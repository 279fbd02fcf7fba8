//! Everything that happens to a single manifest entry.
//!
//! - [`descriptor`] - The immutable [`DownloadDescriptor`] handed to a worker
//! - [`path`] - Mapping a descriptor onto the output directory
//! - [`transfer`] - Streaming the remote body to disk in fixed-size chunks
//! - [`summary`] - Per-item [`DownloadResult`]s and the [`RunSummary`]

pub mod descriptor;
pub mod path;
pub mod summary;
pub mod transfer;

pub use descriptor::DownloadDescriptor;
pub use path::{resolve_destination, sanitize_file_name};
pub use summary::{DownloadResult, Outcome, RunSummary};
pub use transfer::{request_item, stream_to_file, TransferObserver, DEFAULT_CHUNK_SIZE};
