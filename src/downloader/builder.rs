//! Builder pattern implementation for creating FileDownloader instances.
//!
//! Any capability left unset gets a production default: a reqwest transport,
//! a directory save surface and the system navigator.
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::downloader::DownloaderBuilder;
//! use reqwest::header::{HeaderValue, USER_AGENT};
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .header(USER_AGENT, HeaderValue::from_static("MyApp/1.0"))
//!     .allow_remote_locators(false)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::config::{DownloadOptions, DownloaderConfig};
use super::downloader::FileDownloader;
use crate::error::Result;
use crate::http::{HttpClientConfig, ReqwestTransport, RequestOptions, Transport};
use crate::navigator::{Navigator, SystemNavigator};
use crate::save::{DirectorySaveSurface, SaveSurface};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::{Proxy, Url};
use std::env::current_dir;
use std::path::PathBuf;
use std::sync::Arc;

/// A builder used to create a [`FileDownloader`].
///
/// ```rust
/// # fn main() -> Result<(), fetch_save::Error> {
/// use fetch_save::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().directory("downloads".into()).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    transport: Option<Arc<dyn Transport>>,
    save_surface: Option<Arc<dyn SaveSurface>>,
    navigator: Option<Arc<dyn Navigator>>,
    opener: Option<Vec<String>>,
    http: HttpClientConfig,
    directory: Option<PathBuf>,
    overwrite: bool,
    options: DownloadOptions,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Use a custom network transport.
    ///
    /// The HTTP settings of this builder are ignored when one is set.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a custom save surface.
    ///
    /// [`directory()`](DownloaderBuilder::directory) and
    /// [`overwrite()`](DownloaderBuilder::overwrite) are ignored when one is set.
    pub fn save_surface<S: SaveSurface + 'static>(mut self, surface: S) -> Self {
        self.save_surface = Some(Arc::new(surface));
        self
    }

    /// Use a custom navigator for the fallback path.
    pub fn navigator<N: Navigator + 'static>(mut self, navigator: N) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    /// Program and leading arguments the default navigator opens addresses with.
    ///
    /// Ignored when a custom navigator is set.
    pub fn opener<I, S>(mut self, opener: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opener = Some(opener.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Set whether to overwrite existing files.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the base address relative locators are resolved against.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.http.base_url = Some(base_url);
        self
    }

    /// Set the number of transient-failure retries of the HTTP client.
    pub fn retries(mut self, retries: u32) -> Self {
        self.http.retries = retries;
        self
    }

    /// Route requests through a proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.http.proxy = Some(proxy);
        self
    }

    /// Add default http headers sent with every request.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.http.headers.take().unwrap_or_default();
        new.extend(headers);
        self.http.headers = Some(new);
        self
    }

    /// Add a default http header sent with every request.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.http.headers.take().unwrap_or_default();
        new.insert(name, value);
        self.http.headers = Some(new);
        self
    }

    /// Set the default progress callback.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64, Option<u64>) + Send + Sync + 'static,
    {
        self.options = self.options.on_progress(callback);
        self
    }

    /// Set whether to fall back to opening the address on failure.
    pub fn fallback_on_failure(mut self, fallback: bool) -> Self {
        self.options = self.options.fallback_on_failure(fallback);
        self
    }

    /// Set whether absolute locators are accepted.
    pub fn allow_remote_locators(mut self, allow: bool) -> Self {
        self.options = self.options.allow_remote_locators(allow);
        self
    }

    /// Set the default per-request options.
    pub fn request_options(mut self, request_options: RequestOptions) -> Self {
        self.options = self.options.request_options(request_options);
        self
    }

    /// Replace all default download options at once.
    pub fn options(mut self, options: DownloadOptions) -> Self {
        self.options = options;
        self
    }

    /// Create the [`FileDownloader`] with the specified options.
    ///
    /// Fails only when the default HTTP client cannot be built.
    pub fn build(self) -> Result<FileDownloader> {
        let base_url = self.http.base_url.clone();
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.http)?),
        };

        let save_surface: Arc<dyn SaveSurface> = match self.save_surface {
            Some(surface) => surface,
            None => {
                let directory = self
                    .directory
                    .unwrap_or_else(|| current_dir().unwrap_or_default());
                Arc::new(DirectorySaveSurface::new(directory).overwrite(self.overwrite))
            }
        };

        let navigator: Arc<dyn Navigator> = match self.navigator {
            Some(navigator) => navigator,
            None => {
                let navigator = match self.opener {
                    Some(opener) => SystemNavigator::with_opener(opener),
                    None => SystemNavigator::new(),
                };
                Arc::new(navigator.with_base_url(base_url))
            }
        };

        Ok(FileDownloader::new(DownloaderConfig {
            transport,
            save_surface,
            navigator,
            options: self.options,
        }))
    }
}
