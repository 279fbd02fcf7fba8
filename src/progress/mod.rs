//! Progress reporting for a run.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - One [`MultiProgress`](indicatif::MultiProgress) shared by
//!   every in-flight item, plus the completion lines
//!
//! ```rust
//! use sfxdl::downloader::DownloaderBuilder;
//! use sfxdl::progress::{ProgressBarOpts, StyleOptions};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .style_options(StyleOptions::new(
//!         ProgressBarOpts::hidden(),
//!         ProgressBarOpts::with_pip_style(),
//!     ))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
