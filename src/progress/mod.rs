//! Progress module containing progress reporting functionality.
//!
//! - `callback` - The [`ProgressCallback`] type and panic isolation
//! - `style` - Terminal progress bars driven by progress signals
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::progress::progress_callback;
//!
//! let callback = progress_callback(|loaded, total| match total {
//!     Some(total) => println!("{loaded}/{total} bytes"),
//!     None => println!("{loaded} bytes"),
//! });
//! ```

pub(crate) mod callback;
pub(crate) mod style;

pub use callback::{progress_callback, report, ProgressCallback};
pub use style::{progress_bar_callback, ProgressBarOpts};
