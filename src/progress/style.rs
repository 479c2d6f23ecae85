//! Progress bar styling and configuration options.
//!
//! A terminal progress bar is just one possible consumer of progress signals:
//! [`ProgressBarOpts::to_callback`] turns a styled [`ProgressBar`] into a
//! [`ProgressCallback`] that can be passed to the downloader.
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::progress::ProgressBarOpts;
//!
//! let (bar, callback) = ProgressBarOpts::with_pip_style().to_callback();
//! callback(512, Some(1024));
//! assert_eq!(bar.position(), 512);
//! assert_eq!(bar.length(), Some(1024));
//! ```

use super::callback::{progress_callback, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Template which looks like the Python package installer pip.
    ///
    /// `━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ 211.23 KiB/211.23 KiB 1008.31 KiB/s eta 0s`
    pub const TEMPLATE_PIP: &'static str =
        "{bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue}";
    /// Template for transfers of unknown size.
    ///
    /// `⠁ 211.23 KiB 1008.31 KiB/s`
    pub const TEMPLATE_SPINNER: &'static str = "{spinner:.green} {bytes:>11.green} {bytes_per_sec:>13.red}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template is reported and replaced by the default bar.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            match ProgressStyle::default_bar().template(&template) {
                Ok(s) => style = s,
                Err(e) => warn!("invalid progress bar template {:?}: {}", template, e),
            }
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] based on the provided options.
    ///
    /// The bar has no length until a total becomes known.
    pub fn to_progress_bar(self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        let style = self.to_progress_style();
        ProgressBar::no_length().with_style(style)
    }

    /// Create a progress bar and a callback that drives it.
    pub fn to_callback(self) -> (ProgressBar, ProgressCallback) {
        let bar = self.to_progress_bar();
        let callback = progress_bar_callback(bar.clone());
        (bar, callback)
    }

    /// Finish a progress bar according to these options.
    pub fn finish(&self, pb: &ProgressBar) {
        if self.clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }

    /// Create a new [`ProgressBarOpts`] which looks like Python pip.
    pub fn with_pip_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PIP.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: true,
        }
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Return `false` if the bar is hidden.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bars.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}

/// Build a [`ProgressCallback`] that mirrors progress signals onto `pb`.
///
/// The bar length follows the declared total whenever there is one.
pub fn progress_bar_callback(pb: ProgressBar) -> ProgressCallback {
    progress_callback(move |loaded, total| {
        if let Some(total) = total {
            if pb.length() != Some(total) {
                pb.set_length(total);
            }
        }
        pb.set_position(loaded);
    })
}
