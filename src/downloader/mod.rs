//! Downloader module containing the orchestration, builder and configuration.
//!
//! - `downloader` - [`FileDownloader`], running the fetch-and-save flow
//! - `builder` - [`DownloaderBuilder`] wiring capabilities and defaults
//! - `config` - [`DownloadOptions`] and [`DownloaderConfig`]
//! - `transfer` - The transfer executor
//!
//! # Examples
//!
//! ```rust,no_run
//! use fetch_save::downloader::DownloaderBuilder;
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .base_url(Url::parse("https://example.com/")?)
//!     .build()?;
//!
//! // Resolves to https://example.com/report.pdf and saves it as report.pdf.
//! let summary = downloader.download_file("report.pdf", "report.pdf").await;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;
pub mod transfer;

pub use builder::DownloaderBuilder;
pub use config::{DownloadOptions, DownloaderConfig};
pub use downloader::FileDownloader;
pub use transfer::execute;
