//! Shared utility functions.
//!
//! - [`content_length`] - Declared body size extraction from response headers

pub mod content_length;

pub use content_length::{declared_total, parse_content_length};
