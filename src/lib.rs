//! fetch-save fetches a file over HTTP(S) and hands it to a "save as" surface,
//! optionally reporting byte-level progress, and falls back to asking the host
//! to open the address itself when fetching or saving fails.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fetch_save::{DownloadOptions, DownloaderBuilder, Error};
//! use reqwest::Url;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .base_url(Url::parse("https://example.com/").map_err(|e| Error::InvalidUrl(e.to_string()))?)
//!     .directory(PathBuf::from("output"))
//!     .build()?;
//!
//! let options = DownloadOptions::new().on_progress(|loaded, total| {
//!     println!("{loaded} / {total:?}");
//! });
//! let summary = downloader
//!     .download_file_with("report.pdf", "report.pdf", &options)
//!     .await;
//! println!("{:?}", summary.status());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`download`] - Locator handling, payloads and download summaries
//! - [`downloader`] - The [`FileDownloader`], its builder and the transfer executor
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - The network transport and HTTP client setup
//! - [`navigator`] - The fallback navigator
//! - [`progress`] - Progress callbacks and progress bars
//! - [`save`] - The save surface and save trigger
//! - [`utils`] - Shared utility functions
//!
//! # Logging
//!
//! Diagnostics go through [`tracing`]. Install any subscriber (globally, or
//! scoped with `tracing::subscriber::with_default`) to route them.

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod navigator;
pub mod progress;
pub mod save;
pub mod utils;

pub use download::{classify, normalize, Classification, FallbackStatus, Payload, ResolvedLocator, Status, Summary};
pub use downloader::{DownloadOptions, DownloaderBuilder, FileDownloader};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig, ReqwestTransport, RequestOptions, Transport};
pub use navigator::{Navigator, SystemNavigator};
pub use progress::{ProgressBarOpts, ProgressCallback};
pub use save::{DirectorySaveSurface, SaveSurface};
pub use utils::declared_total;
