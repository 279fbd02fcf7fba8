//! Typed parsing of the manifest body.
//!
//! The body must be a JSON array of objects. Each object may carry:
//!
//! - `filename`: a path relative to the domain, e.g. `"sfx/vine_boom.wav"`
//! - `id` or `name`: a bare identifier (string or integer) that gets the
//!   source suffix appended, e.g. `"vine_boom"` becomes `"vine_boom.wav"`
//!
//! An object with none of them falls back to `sfx_<index>.wav`. Unknown
//! fields are ignored, but a known field of the wrong type rejects the whole
//! manifest.

use super::source::ManifestSource;
use crate::download::DownloadDescriptor;
use crate::error::{Error, Result};

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Number(i64),
}

impl Identifier {
    fn into_string(self) -> String {
        match self {
            Identifier::Text(s) => s,
            Identifier::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    id: Option<Identifier>,
    #[serde(default)]
    name: Option<Identifier>,
}

impl RawEntry {
    /// Returns `(identifier, remote_path)` for the entry at `index`.
    fn into_paths(self, index: usize, suffix: &str) -> (String, String) {
        if let Some(filename) = self.filename.filter(|f| !f.trim().is_empty()) {
            return (filename.clone(), filename);
        }

        let bare = [self.id, self.name]
            .into_iter()
            .flatten()
            .map(Identifier::into_string)
            .find(|s| !s.trim().is_empty());

        match bare {
            Some(id) if id.ends_with(suffix) => (id.clone(), id),
            Some(id) => {
                let path = format!("{}{}", id, suffix);
                (id, path)
            }
            None => {
                let generated = DownloadDescriptor::fallback_name(index);
                (generated.clone(), generated)
            }
        }
    }
}

/// The parsed list of items of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    items: Vec<DownloadDescriptor>,
}

impl Manifest {
    /// Parse a manifest body fetched from `source`.
    ///
    /// ```rust
    /// use sfxdl::manifest::{Manifest, ManifestSource};
    ///
    /// let source = ManifestSource::new("https://gdcolon.com").unwrap();
    /// let body = r#"[{"filename": "sfx/boom.wav"}, {"id": "bruh"}, {}]"#;
    /// let manifest = Manifest::parse(body, &source).unwrap();
    ///
    /// let names: Vec<_> = manifest.iter().map(|d| d.local_name()).collect();
    /// assert_eq!(names, ["boom.wav", "bruh.wav", "sfx_2.wav"]);
    /// ```
    pub fn parse(body: &str, source: &ManifestSource) -> Result<Self> {
        let entries: Vec<RawEntry> =
            serde_json::from_str(body).map_err(|e| Error::ManifestMalformed(e.to_string()))?;

        let mut taken = HashSet::with_capacity(entries.len());
        let mut items = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let (identifier, remote_path) = entry.into_paths(index, source.suffix());
            let url = source.url_for(&remote_path).map_err(|e| {
                Error::ManifestMalformed(format!("entry {}: {}", index, e))
            })?;

            let descriptor = DownloadDescriptor::new(identifier, remote_path, url, index);
            let name = unique_name(descriptor.local_name(), index, &taken);
            taken.insert(name.to_lowercase());

            if name != descriptor.local_name() {
                debug!(
                    "Entry {} collides on {:?}, saving as {:?}",
                    index,
                    descriptor.local_name(),
                    name
                );
                items.push(descriptor.with_local_name(name));
            } else {
                items.push(descriptor);
            }
        }

        Ok(Self { items })
    }

    /// Build a manifest from already constructed descriptors.
    pub fn from_descriptors(items: Vec<DownloadDescriptor>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[DownloadDescriptor] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DownloadDescriptor> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a DownloadDescriptor;
    type IntoIter = std::slice::Iter<'a, DownloadDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A local name not yet in `taken`, derived from `name` and `index`.
///
/// Names are compared case-insensitively so that two entries never share a
/// file on case-insensitive filesystems.
fn unique_name(name: &str, index: usize, taken: &HashSet<String>) -> String {
    let mut candidate = name.to_string();
    while taken.contains(&candidate.to_lowercase()) {
        let path = Path::new(&candidate);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        candidate = match path.extension() {
            Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
            None => format!("{}_{}", stem, index),
        };
    }
    candidate
}
