//! Navigator capability and the fallback path.
//!
//! When fetching or saving fails, the downloader can ask the host to open the
//! address itself and decide how to present it.

use crate::error::{Error, Result};

use reqwest::Url;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, error, info};

/// Host able to open an address in a new, independent context.
pub trait Navigator: Send + Sync {
    /// Open `address`. The opened context must not be linked back to the caller.
    fn open(&self, address: &str) -> Result<()>;
}

/// [`Navigator`] handing addresses to the platform's default opener.
///
/// The opener runs detached with its standard streams closed, so the opened
/// context never talks back to this process. Host-relative addresses such as
/// `/missing.pdf` are joined onto the base URL, when one is set, before they
/// reach the opener.
#[derive(Debug, Clone, Default)]
pub struct SystemNavigator {
    /// Program and leading arguments used instead of the platform default.
    opener: Option<Vec<String>>,
    base_url: Option<Url>,
}

impl SystemNavigator {
    /// Creates a navigator using the platform default opener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom opener program, e.g. `["firefox", "--new-window"]`.
    pub fn with_opener<I, S>(opener: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            opener: Some(opener.into_iter().map(Into::into).collect()),
            base_url: None,
        }
    }

    /// Resolve relative addresses against `base_url`.
    pub fn with_base_url(mut self, base_url: Option<Url>) -> Self {
        self.base_url = base_url;
        self
    }

    /// The address handed to the opener for `address`.
    fn target(&self, address: &str) -> String {
        if Url::parse(address).is_ok() {
            return address.to_string();
        }
        match self.base_url.as_ref().map(|base| base.join(address)) {
            Some(Ok(url)) => url.to_string(),
            _ => address.to_string(),
        }
    }

    fn command(&self, address: &str) -> Result<Command> {
        let parts = match &self.opener {
            Some(parts) => parts.clone(),
            None => default_opener(),
        };
        let (program, args) = parts
            .split_first()
            .ok_or_else(|| Error::Navigation("no opener program configured".to_string()))?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg(self.target(address))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Ok(cmd)
    }
}

fn default_opener() -> Vec<String> {
    let parts: &[&str] = if cfg!(target_os = "windows") {
        &["cmd", "/C", "start", ""]
    } else if cfg!(target_os = "macos") {
        &["open"]
    } else {
        &["xdg-open"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}

impl Navigator for SystemNavigator {
    fn open(&self, address: &str) -> Result<()> {
        let mut cmd = self.command(address)?;
        let mut child = cmd
            .spawn()
            .map_err(|e| Error::Navigation(format!("cannot open {}: {}", address, e)))?;

        // Reap the opener once it exits.
        thread::spawn(move || match child.wait() {
            Ok(status) => debug!("opener exited with {}", status),
            Err(e) => debug!("failed to wait for opener: {}", e),
        });
        Ok(())
    }
}

/// Ask `navigator` to open `address`, logging and swallowing any failure.
///
/// Returns the failure, if any, for observational purposes only.
pub fn fallback(navigator: &dyn Navigator, address: &str) -> Option<Error> {
    info!("Falling back to opening {}", address);
    match navigator.open(address) {
        Ok(()) => None,
        Err(e) => {
            error!("fallback open of {} failed: {}", address, e);
            Some(e)
        }
    }
}
