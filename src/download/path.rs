//! Mapping descriptors onto the output directory.
//!
//! Only the final segment of a remote name ever reaches the filesystem, so a
//! manifest cannot place files outside the output root nor recreate its own
//! directory layout.

use super::descriptor::DownloadDescriptor;
use crate::error::ItemError;

use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::debug;

/// Reduce a remote name to a file name that is safe to join onto a directory.
///
/// Both `/` and `\` are treated as separators. Returns `None` when nothing
/// usable remains (empty, `.`, `..`, or a name containing NUL).
///
/// ```rust
/// use sfxdl::download::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("../../etc/passwd").as_deref(), Some("passwd"));
/// assert_eq!(sanitize_file_name("sfx/"), None);
/// ```
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        n if n.contains('\0') => None,
        n => Some(n.to_string()),
    }
}

/// Compute the destination of `descriptor` under `root` and make sure the
/// directory exists.
pub async fn resolve_destination(
    root: &Path,
    descriptor: &DownloadDescriptor,
) -> Result<PathBuf, ItemError> {
    // Descriptors are sanitized on construction; re-applying is a no-op for them.
    let name = sanitize_file_name(descriptor.local_name())
        .unwrap_or_else(|| DownloadDescriptor::fallback_name(descriptor.index()));
    let destination = root.join(name);

    debug!("Creating destination directory {:?}", root);
    fs::create_dir_all(root)
        .await
        .map_err(|source| ItemError::PathCreationFailed {
            path: root.to_path_buf(),
            source,
        })?;

    Ok(destination)
}

/// Prefix of the in-flight files, hidden on unix.
pub(crate) const PARTIAL_PREFIX: &str = ".sfxdl-";
/// Suffix of the in-flight files.
pub(crate) const PARTIAL_SUFFIX: &str = ".part";

/// Create the file that receives the body of `destination` while the
/// transfer is in flight.
///
/// It sits in the same directory so the final rename stays on one
/// filesystem. Its name is random and created exclusively, so it never opens
/// a file that belongs to another item. It is removed when dropped.
pub(crate) fn partial_file(destination: &Path) -> io::Result<NamedTempFile> {
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    tempfile::Builder::new()
        .prefix(PARTIAL_PREFIX)
        .suffix(PARTIAL_SUFFIX)
        .tempfile_in(dir)
}
