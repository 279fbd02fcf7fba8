//! The unit of work handed to a worker.
//!
//! A [`DownloadDescriptor`] is produced by parsing the manifest and is never
//! mutated afterwards. Its local name is sanitized on construction, so the
//! path resolver can join it onto the output root without further checks.
//!
//! ```rust
//! use reqwest::Url;
//! use sfxdl::download::DownloadDescriptor;
//!
//! let url = Url::parse("https://gdcolon.com/sfx/vine_boom.wav").unwrap();
//! let d = DownloadDescriptor::new("sfx/vine_boom.wav", "sfx/vine_boom.wav", url, 0);
//! assert_eq!(d.local_name(), "vine_boom.wav");
//! ```

use super::path::sanitize_file_name;
use reqwest::Url;

/// One manifest entry resolved to a remote URL and a local file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDescriptor {
    identifier: String,
    remote_path: String,
    url: Url,
    local_name: String,
    index: usize,
}

impl DownloadDescriptor {
    /// Prefix of the names generated for entries without a usable name.
    pub const FALLBACK_PREFIX: &'static str = "sfx_";
    /// Extension of the names generated for entries without a usable name.
    pub const FALLBACK_EXTENSION: &'static str = ".wav";

    /// Creates a descriptor for the entry at `index` in the manifest.
    ///
    /// The local name is the final segment of `remote_path`. When that
    /// segment is empty or a dot segment, `sfx_<index>.wav` is used instead.
    pub fn new(
        identifier: impl Into<String>,
        remote_path: impl Into<String>,
        url: Url,
        index: usize,
    ) -> Self {
        let remote_path = remote_path.into();
        let local_name =
            sanitize_file_name(&remote_path).unwrap_or_else(|| Self::fallback_name(index));
        Self {
            identifier: identifier.into(),
            remote_path,
            url,
            local_name,
            index,
        }
    }

    /// The name generated for entry `index` when the manifest gives none.
    pub fn fallback_name(index: usize) -> String {
        format!(
            "{}{}{}",
            Self::FALLBACK_PREFIX,
            index,
            Self::FALLBACK_EXTENSION
        )
    }

    /// Replaces the local name. Used to break collisions between entries.
    pub(crate) fn with_local_name(self, local_name: String) -> Self {
        Self { local_name, ..self }
    }

    /// The key or file name the manifest used for this entry.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The path relative to the domain, as given by the manifest.
    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    /// The absolute URL to fetch.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The file name written inside the output directory.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Position of the entry in the manifest.
    pub fn index(&self) -> usize {
        self.index
    }
}
