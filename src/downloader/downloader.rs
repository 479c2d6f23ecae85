//! Core downloader implementation.
//!
//! [`FileDownloader`] chains the whole flow for one call: classify the locator,
//! fetch the bytes, hand them to the save surface, and fall back to opening the
//! address when anything fails.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fetch_save::downloader::{DownloadOptions, DownloaderBuilder};
//! use reqwest::Url;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .base_url(Url::parse("https://example.com/")?)
//!     .directory(PathBuf::from("./downloads"))
//!     .build()?;
//!
//! let options = DownloadOptions::new().on_progress(|loaded, total| {
//!     println!("{loaded} of {total:?} bytes");
//! });
//! let summary = downloader
//!     .download_file_with("guides/freeguide.pdf", "freeguide.pdf", &options)
//!     .await;
//! println!("{:?}", summary.status());
//! # Ok(())
//! # }
//! ```

use super::config::{DownloadOptions, DownloaderConfig};
use super::transfer::execute;
use crate::download::{FallbackStatus, ResolvedLocator, Status, Summary};
use crate::error::{Error, Result};
use crate::navigator::fallback;
use crate::save::trigger_save;

use std::fmt;
use tracing::{debug, error, info};

/// Fetches files and hands them to a save surface.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main() -> Result<(), fetch_save::Error> {
/// use fetch_save::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
///
/// The downloader holds no per-call state, so one instance can serve any
/// number of concurrent calls.
#[derive(Clone)]
pub struct FileDownloader {
    config: DownloaderConfig,
}

impl fmt::Debug for FileDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileDownloader")
            .field("config", &self.config)
            .finish()
    }
}

impl FileDownloader {
    /// Creates a new FileDownloader with the given configuration.
    pub fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the options used by [`FileDownloader::download_file`].
    pub fn options(&self) -> &DownloadOptions {
        &self.config.options
    }

    /// Download `locator` with the default options and save it as `display_name`.
    ///
    /// Never fails: the returned [`Summary`] only describes what happened.
    pub async fn download_file(&self, locator: &str, display_name: &str) -> Summary {
        self.download_file_with(locator, display_name, &self.config.options)
            .await
    }

    /// Download `locator` with `options` and save it as `display_name`.
    ///
    /// Never fails: the returned [`Summary`] only describes what happened.
    pub async fn download_file_with(
        &self,
        locator: &str,
        display_name: &str,
        options: &DownloadOptions,
    ) -> Summary {
        info!("Downloading {} from {}", display_name, locator);

        let resolved = ResolvedLocator::resolve(locator);
        let summary = Summary::new(resolved.clone(), display_name);

        let status = match self.fetch_and_save(&resolved, display_name, options).await {
            Ok(size) => Status::Saved { size },
            Err(e) if e.is_policy_violation() => {
                error!("{}", e);
                Status::from(&e)
            }
            Err(e) => {
                error!(
                    "Failed to download {} from {}: {}",
                    display_name, resolved.address, e
                );
                Status::from(&e)
            }
        };

        let fallback_status = match (&status, options.fallback_on_failure) {
            (Status::Saved { .. }, _) => FallbackStatus::NotNeeded,
            (_, false) => FallbackStatus::Disabled,
            (_, true) => self.open_fallback(&resolved.address),
        };

        summary.with_status(status).with_fallback(fallback_status)
    }

    /// Transfer the bytes and trigger the save, returning the payload size.
    async fn fetch_and_save(
        &self,
        resolved: &ResolvedLocator,
        display_name: &str,
        options: &DownloadOptions,
    ) -> Result<u64> {
        let payload = execute(self.config.transport.as_ref(), resolved, options).await?;
        let size = payload.size();
        debug!("Retrieved {} bytes from {}", size, resolved.address);

        // Save surfaces may block on disk or UI, keep them off the runtime workers.
        let surface = self.config.save_surface.clone();
        let name = display_name.to_string();
        tokio::task::spawn_blocking(move || trigger_save(surface.as_ref(), &payload, &name))
            .await
            .map_err(|e| Error::Save(format!("save task failed: {}", e)))??;
        Ok(size)
    }

    fn open_fallback(&self, address: &str) -> FallbackStatus {
        match fallback(self.config.navigator.as_ref(), address) {
            None => FallbackStatus::Opened(address.to_string()),
            Some(e) => FallbackStatus::Failed(e.to_string()),
        }
    }
}
