//! Retrieving the manifest.

use super::parse::Manifest;
use super::source::ManifestSource;
use crate::error::{Error, Result};

use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, info};

/// Fetch and parse the manifest described by `source`.
///
/// One non-streaming GET. Transport errors and non-success statuses give
/// [`Error::ManifestUnavailable`]; a body that does not parse gives
/// [`Error::ManifestMalformed`].
pub async fn fetch_manifest(
    client: &ClientWithMiddleware,
    source: &ManifestSource,
) -> Result<Manifest> {
    let url = source.manifest_url()?;
    let unavailable = |source: reqwest_middleware::Error| Error::ManifestUnavailable {
        url: url.to_string(),
        source,
    };

    debug!("Fetching manifest {}", url);
    let res = client.get(url.clone()).send().await.map_err(unavailable)?;
    let res = res
        .error_for_status()
        .map_err(|e| unavailable(e.into()))?;
    let body = res.text().await.map_err(|e| unavailable(e.into()))?;

    let manifest = Manifest::parse(&body, source)?;
    info!("Manifest {} lists {} items", url, manifest.len());
    Ok(manifest)
}
