//! Per-item results and the run summary.
//!
//! ```rust
//! use reqwest::Url;
//! use sfxdl::download::{DownloadDescriptor, DownloadResult, Outcome, RunSummary};
//!
//! let url = Url::parse("https://gdcolon.com/boom.wav").unwrap();
//! let d = DownloadDescriptor::new("boom.wav", "boom.wav", url, 0);
//! let results = vec![DownloadResult::new(d, Outcome::Success { bytes: 2048 })];
//!
//! let summary = RunSummary::from_results(&results);
//! assert_eq!(summary.succeeded(), 1);
//! assert_eq!(summary.bytes(), 2048);
//! ```

use super::descriptor::DownloadDescriptor;
use crate::error::ItemError;

/// How a single item ended.
#[derive(Debug)]
pub enum Outcome {
    /// The file was written completely.
    Success {
        /// Bytes written to disk.
        bytes: u64,
    },
    /// The item was skipped because of the contained error.
    Failure(ItemError),
}

/// Represents the result of one [`DownloadDescriptor`].
#[derive(Debug)]
pub struct DownloadResult {
    descriptor: DownloadDescriptor,
    outcome: Outcome,
}

impl DownloadResult {
    /// Create a new [`DownloadResult`].
    pub fn new(descriptor: DownloadDescriptor, outcome: Outcome) -> Self {
        Self {
            descriptor,
            outcome,
        }
    }

    /// Get a reference to the descriptor this result belongs to.
    pub fn descriptor(&self) -> &DownloadDescriptor {
        &self.descriptor
    }

    /// Get a reference to the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// The error, if the item failed.
    pub fn error(&self) -> Option<&ItemError> {
        match &self.outcome {
            Outcome::Failure(e) => Some(e),
            Outcome::Success { .. } => None,
        }
    }
}

/// Aggregate of all results of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    attempted: usize,
    succeeded: usize,
    bytes: u64,
    /// (local name, reason) for every failed item, in manifest order.
    failures: Vec<(String, String)>,
}

impl RunSummary {
    /// Build the summary of `results`.
    pub fn from_results(results: &[DownloadResult]) -> Self {
        let mut summary = RunSummary::default();
        let mut failed: Vec<(usize, String, String)> = Vec::new();

        for result in results {
            summary.attempted += 1;
            match result.outcome() {
                Outcome::Success { bytes } => {
                    summary.succeeded += 1;
                    summary.bytes += bytes;
                }
                Outcome::Failure(e) => failed.push((
                    result.descriptor().index(),
                    result.descriptor().local_name().to_string(),
                    e.to_string(),
                )),
            }
        }

        // Results arrive in completion order.
        failed.sort_by_key(|(index, _, _)| *index);
        summary.failures = failed
            .into_iter()
            .map(|(_, name, reason)| (name, reason))
            .collect();
        summary
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Total bytes written by successful items.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Name and reason of each failed item.
    pub fn failures(&self) -> &[(String, String)] {
        &self.failures
    }
}
