//! The remote list of items to download.
//!
//! - [`source`] - Domain, manifest path and identifier suffix
//! - [`parse`] - Typed parsing of the JSON body into a [`Manifest`]
//! - [`fetch`] - Retrieving the manifest over HTTP
//!
//! ```rust
//! use sfxdl::manifest::{Manifest, ManifestSource};
//!
//! let source = ManifestSource::new("https://gdcolon.com")
//!     .unwrap()
//!     .with_path("/server/soundlist");
//! let manifest = Manifest::parse(r#"[{"filename": "sfx/boom.wav"}]"#, &source).unwrap();
//! assert_eq!(manifest.len(), 1);
//! ```

pub mod fetch;
pub mod parse;
pub mod source;

pub use fetch::fetch_manifest;
pub use parse::Manifest;
pub use source::ManifestSource;
