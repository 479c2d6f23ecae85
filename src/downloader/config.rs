//! Configuration structures and defaults for the downloader.
//!
//! [`DownloadOptions`] is the per-call configuration; [`DownloaderConfig`] holds
//! the capabilities a [`FileDownloader`](super::FileDownloader) is wired with.
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::downloader::DownloadOptions;
//! use fetch_save::http::RequestOptions;
//! use reqwest::header::{HeaderValue, ACCEPT};
//!
//! let options = DownloadOptions::new()
//!     .on_progress(|loaded, total| println!("{loaded}/{total:?}"))
//!     .allow_remote_locators(false)
//!     .request_options(
//!         RequestOptions::new().header(ACCEPT, HeaderValue::from_static("application/pdf")),
//!     );
//! assert!(options.fallback_on_failure);
//! ```

use crate::http::{RequestOptions, Transport};
use crate::navigator::Navigator;
use crate::progress::{progress_callback, ProgressCallback};
use crate::save::SaveSurface;

use std::fmt;
use std::sync::Arc;

/// Per-call options of a download.
#[derive(Clone)]
pub struct DownloadOptions {
    /// Called with `(loaded, total)` as bytes arrive.
    pub on_progress: Option<ProgressCallback>,
    /// Ask the navigator to open the address when the download fails.
    pub fallback_on_failure: bool,
    /// Accept absolute (remote) locators.
    pub allow_remote_locators: bool,
    /// Options forwarded verbatim to the transport.
    pub request_options: RequestOptions,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            on_progress: None,
            fallback_on_failure: true,
            allow_remote_locators: true,
            request_options: RequestOptions::default(),
        }
    }
}

impl fmt::Debug for DownloadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadOptions")
            .field("on_progress", &self.on_progress.is_some())
            .field("fallback_on_failure", &self.fallback_on_failure)
            .field("allow_remote_locators", &self.allow_remote_locators)
            .field("request_options", &self.request_options)
            .finish()
    }
}

impl DownloadOptions {
    /// Creates options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress callback.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64, Option<u64>) + Send + Sync + 'static,
    {
        self.on_progress = Some(progress_callback(callback));
        self
    }

    /// Set an already shared progress callback.
    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Set whether to fall back to opening the address on failure.
    pub fn fallback_on_failure(mut self, fallback: bool) -> Self {
        self.fallback_on_failure = fallback;
        self
    }

    /// Set whether absolute locators are accepted.
    pub fn allow_remote_locators(mut self, allow: bool) -> Self {
        self.allow_remote_locators = allow;
        self
    }

    /// Set the options forwarded to the transport.
    pub fn request_options(mut self, request_options: RequestOptions) -> Self {
        self.request_options = request_options;
        self
    }
}

/// Capabilities and defaults of a [`FileDownloader`](super::FileDownloader).
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Network transport.
    pub transport: Arc<dyn Transport>,
    /// Host save surface.
    pub save_surface: Arc<dyn SaveSurface>,
    /// Host navigator used by the fallback.
    pub navigator: Arc<dyn Navigator>,
    /// Options used when a call does not bring its own.
    pub options: DownloadOptions,
}

impl fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
