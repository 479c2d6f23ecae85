//! Download module containing the per-call data model.
//!
//! Everything here is scoped to a single download call: nothing is cached or
//! shared between invocations.
//!
//! - [`locator`] - Locator classification and normalization
//! - [`payload`] - The fully assembled bytes of a transfer
//! - [`summary`] - Observational outcome of a download call
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::download::{Classification, ResolvedLocator};
//!
//! let resolved = ResolvedLocator::resolve("report.pdf");
//! assert_eq!(resolved.classification, Classification::Relative);
//! assert_eq!(resolved.address, "/report.pdf");
//! ```

pub mod locator;
pub mod payload;
pub mod summary;

pub use locator::{classify, normalize, Classification, ResolvedLocator};
pub use payload::Payload;
pub use summary::{FallbackStatus, Status, Summary};
