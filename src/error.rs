//! Error handling for the fetch-save library.
//!
//! Every stage of a download (classification, transfer, save, fallback) reports
//! its failure through the [`Error`] enum. The orchestrating
//! [`FileDownloader`](crate::downloader::FileDownloader) never lets these escape:
//! they are folded into a [`Summary`](crate::download::Summary) instead.

use std::io;
use thiserror::Error;

/// Errors that can happen while fetching and saving a file.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Captures internal failures that don't fit into other categories.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The address could not be turned into a URL the transport can request.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A remote locator was refused because remote locators are disabled.
    ///
    /// Raised before any network activity takes place.
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// The server answered with a status outside of the 200-299 range.
    ///
    /// `status_text` is the canonical reason phrase for `status`, not the
    /// text sent by the server.
    #[error("HTTP error: {status} {status_text}")]
    HttpStatus {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase, empty when unknown.
        status_text: String,
    },

    /// Transport-level failure such as a broken connection or an unreadable body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The save surface failed to create a handle or to present the save interaction.
    #[error("Save error: {0}")]
    Save(String),

    /// The navigator failed to open an address.
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

impl Error {
    /// Whether the error comes from the remote-locator policy check.
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Error::PolicyViolation(_))
    }

    /// Whether the error happened while retrieving the bytes.
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            Error::HttpStatus { .. }
                | Error::Transport(_)
                | Error::InvalidUrl(_)
                | Error::Reqwest { .. }
        )
    }

    /// Whether the error happened while handing the bytes to the save surface.
    pub fn is_save(&self) -> bool {
        matches!(self, Error::Save(_) | Error::IOError { .. })
    }

    /// The HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Reqwest { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(value: reqwest_middleware::Error) -> Self {
        match value {
            reqwest_middleware::Error::Reqwest(source) => Error::Reqwest { source },
            reqwest_middleware::Error::Middleware(e) => Error::Transport(format!("{e:#}")),
        }
    }
}

/// Result type alias for operations that can fail with a fetch-save error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let e = Error::HttpStatus {
            status: 404,
            status_text: "Not Found".into(),
        };
        assert_eq!(e.to_string(), "HTTP error: 404 Not Found");
        assert_eq!(e.status(), Some(404));
        assert!(e.is_transfer());
        assert!(!e.is_save());
    }

    #[test]
    fn test_taxonomy() {
        assert!(Error::PolicyViolation("remote".into()).is_policy_violation());
        assert!(Error::Transport("reset".into()).is_transfer());
        assert!(Error::Save("denied".into()).is_save());
        assert!(!Error::Navigation("blocked".into()).is_transfer());
    }
}
