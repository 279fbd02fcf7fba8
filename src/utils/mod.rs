//! Shared utility functions.
//!
//! - [`content_length`] - Expected body length of HTTP responses

pub mod content_length;

pub use content_length::{expected_length, parse_content_length};
