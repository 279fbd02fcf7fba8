//! Where the manifest lives and how its entries map to URLs.

use crate::error::{Error, Result};
use reqwest::Url;

/// Location of the manifest and the rules for turning entries into URLs.
///
/// ```rust
/// use sfxdl::manifest::ManifestSource;
///
/// let source = ManifestSource::new("https://gdcolon.com").unwrap();
/// assert_eq!(
///     source.manifest_url().unwrap().as_str(),
///     "https://gdcolon.com/server/soundlist"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSource {
    domain: Url,
    path: String,
    suffix: String,
}

impl ManifestSource {
    pub const DEFAULT_DOMAIN: &'static str = "https://gdcolon.com";
    pub const DEFAULT_PATH: &'static str = "/server/soundlist";
    pub const DEFAULT_SUFFIX: &'static str = ".wav";

    /// Source on `domain` using the default manifest path and suffix.
    pub fn new(domain: &str) -> Result<Self> {
        let domain = Url::parse(domain).map_err(|e| {
            Error::InvalidUrl(format!("the domain \"{}\" cannot be parsed: {}", domain, e))
        })?;
        if domain.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!(
                "the domain \"{}\" cannot carry a path",
                domain
            )));
        }
        Ok(Self {
            domain,
            path: Self::DEFAULT_PATH.into(),
            suffix: Self::DEFAULT_SUFFIX.into(),
        })
    }

    /// Set the manifest path, relative to the domain.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the suffix appended to bare identifiers.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn domain(&self) -> &Url {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Absolute URL of the manifest.
    pub fn manifest_url(&self) -> Result<Url> {
        self.url_for(&self.path)
    }

    /// Absolute URL of a path relative to the domain.
    ///
    /// The path is always appended below the domain, even if it starts with
    /// slashes or looks like an absolute URL, so entries cannot point to
    /// another host.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.domain.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| {
            Error::InvalidUrl(format!("the url \"{}\" cannot be parsed: {}", joined, e))
        })
    }
}
