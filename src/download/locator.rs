//! Locator classification and normalization.
//!
//! A locator is the string a caller hands to
//! [`FileDownloader::download_file`](crate::downloader::FileDownloader::download_file).
//! It is either an absolute URL (any scheme, any host) or a path relative to the
//! host application's base address.
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::download::{classify, normalize, Classification};
//!
//! assert_eq!(classify("https://cdn.example.com/x.pdf"), Classification::Absolute);
//! assert_eq!(classify("report.pdf"), Classification::Relative);
//! assert_eq!(normalize("report.pdf", Classification::Relative), "/report.pdf");
//! ```

use reqwest::Url;

/// Separator prepended to relative locators.
const PATH_SEPARATOR: char = '/';

/// Kind of a locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A fully qualified URL.
    Absolute,
    /// A path interpreted against the host's base address.
    Relative,
}

/// Classify a locator.
///
/// Any string the URL parser accepts on its own is [`Classification::Absolute`];
/// everything else, including malformed URLs, is [`Classification::Relative`].
pub fn classify(locator: &str) -> Classification {
    match Url::parse(locator) {
        Ok(_) => Classification::Absolute,
        Err(_) => Classification::Relative,
    }
}

/// Turn a locator into a fetchable address.
///
/// Absolute locators are returned unchanged. Relative ones get exactly one
/// leading separator.
pub fn normalize(locator: &str, classification: Classification) -> String {
    match classification {
        Classification::Absolute => locator.to_string(),
        Classification::Relative if locator.starts_with(PATH_SEPARATOR) => locator.to_string(),
        Classification::Relative => format!("{PATH_SEPARATOR}{locator}"),
    }
}

/// A locator together with its classification and fetchable address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocator {
    /// The locator as supplied by the caller.
    pub original: String,
    /// Classification of [`ResolvedLocator::original`].
    pub classification: Classification,
    /// Address handed to the transport and to the fallback.
    pub address: String,
}

impl ResolvedLocator {
    /// Classify and normalize `locator` in one go.
    ///
    /// ## Example
    ///
    /// ```
    /// # use color_eyre::{eyre::Report, Result};
    /// use fetch_save::download::ResolvedLocator;
    ///
    /// # fn main() -> Result<(), Report> {
    /// let resolved = ResolvedLocator::resolve("docs/report.pdf");
    /// assert!(!resolved.is_absolute());
    /// assert_eq!(resolved.address, "/docs/report.pdf");
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve(locator: &str) -> Self {
        let classification = classify(locator);
        Self {
            original: locator.to_string(),
            classification,
            address: normalize(locator, classification),
        }
    }

    /// Whether the locator points at a remote resource.
    pub fn is_absolute(&self) -> bool {
        self.classification == Classification::Absolute
    }
}
