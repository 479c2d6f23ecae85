//! Download summary functionality.
//!
//! A [`Summary`] describes what happened during one call to
//! [`FileDownloader::download_file`](crate::downloader::FileDownloader::download_file).
//! It is purely observational: the call never fails, and callers may ignore the
//! summary entirely.
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::download::{FallbackStatus, ResolvedLocator, Status, Summary};
//!
//! let summary = Summary::new(ResolvedLocator::resolve("report.pdf"), "report.pdf")
//!     .saved(1024);
//!
//! match summary.status() {
//!     Status::Saved { size } => println!("handed {size} bytes to the save surface"),
//!     Status::TransferFailed { message, .. } => println!("transfer failed: {message}"),
//!     _ => {}
//! }
//! assert_eq!(summary.fallback(), &FallbackStatus::NotNeeded);
//! ```

use super::locator::ResolvedLocator;
use crate::error::Error;

/// Outcome of a download call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The download has not run yet.
    NotStarted,
    /// The payload was handed to the save surface.
    Saved {
        /// Size of the payload in bytes.
        size: u64,
    },
    /// A remote locator was refused by configuration; nothing was requested.
    PolicyViolation(String),
    /// The bytes could not be retrieved.
    TransferFailed {
        /// HTTP status, when the server answered.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },
    /// The save surface failed.
    SaveFailed(String),
}

impl Status {
    /// Whether the flow reached the save surface successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Saved { .. })
    }
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        if err.is_policy_violation() {
            Status::PolicyViolation(err.to_string())
        } else if err.is_save() {
            Status::SaveFailed(err.to_string())
        } else {
            Status::TransferFailed {
                status: err.status(),
                message: err.to_string(),
            }
        }
    }
}

/// What happened to the fallback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackStatus {
    /// The main flow succeeded.
    NotNeeded,
    /// The main flow failed but fallback is disabled.
    Disabled,
    /// The navigator was asked to open the address.
    Opened(String),
    /// The navigator failed.
    Failed(String),
}

/// Represents a download summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Where the file was fetched from.
    locator: ResolvedLocator,
    /// Name suggested to the save surface.
    display_name: String,
    /// Outcome of the main flow.
    status: Status,
    /// Outcome of the fallback path.
    fallback: FallbackStatus,
}

impl Summary {
    /// Create a new [`Summary`] for a download that has not run yet.
    pub fn new(locator: ResolvedLocator, display_name: &str) -> Self {
        Self {
            locator,
            display_name: display_name.to_string(),
            status: Status::NotStarted,
            fallback: FallbackStatus::NotNeeded,
        }
    }

    /// Attach a status to the [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Attach a fallback outcome to the [`Summary`].
    pub fn with_fallback(self, fallback: FallbackStatus) -> Self {
        Self { fallback, ..self }
    }

    /// Mark the summary as saved.
    pub fn saved(self, size: u64) -> Self {
        self.with_status(Status::Saved { size })
    }

    /// Mark the summary as failed with the given error.
    pub fn fail(self, err: &Error) -> Self {
        self.with_status(Status::from(err))
    }

    /// Get the resolved locator.
    pub fn locator(&self) -> &ResolvedLocator {
        &self.locator
    }

    /// Get the address that was requested (or would have been).
    pub fn address(&self) -> &str {
        &self.locator.address
    }

    /// Get the suggested file name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get a reference to the fallback outcome.
    pub fn fallback(&self) -> &FallbackStatus {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_summary() -> Summary {
        Summary::new(ResolvedLocator::resolve("test.zip"), "test.zip")
    }

    #[test]
    fn test_summary_creation() {
        let summary = create_test_summary();

        assert_eq!(summary.address(), "/test.zip");
        assert_eq!(summary.display_name(), "test.zip");
        assert_eq!(summary.status(), &Status::NotStarted);
        assert_eq!(summary.fallback(), &FallbackStatus::NotNeeded);
    }

    #[test]
    fn test_summary_saved() {
        let summary = create_test_summary().saved(1024);
        assert_eq!(summary.status(), &Status::Saved { size: 1024 });
        assert!(summary.status().is_success());
    }

    #[test]
    fn test_summary_fail_http_status() {
        let err = Error::HttpStatus {
            status: 404,
            status_text: "Not Found".into(),
        };
        let summary = create_test_summary()
            .fail(&err)
            .with_fallback(FallbackStatus::Opened("/test.zip".into()));

        match summary.status() {
            Status::TransferFailed { status, message } => {
                assert_eq!(*status, Some(404));
                assert!(message.contains("404"));
            }
            _ => panic!("Expected TransferFailed status"),
        }
        assert_eq!(
            summary.fallback(),
            &FallbackStatus::Opened("/test.zip".into())
        );
    }

    #[test]
    fn test_status_from_error() {
        assert!(matches!(
            Status::from(&Error::PolicyViolation("remote".into())),
            Status::PolicyViolation(_)
        ));
        assert!(matches!(
            Status::from(&Error::Save("denied".into())),
            Status::SaveFailed(_)
        ));
        assert!(matches!(
            Status::from(&Error::Transport("reset".into())),
            Status::TransferFailed { status: None, .. }
        ));
    }
}
