//! Filesystem-backed save surface.
//!
//! Each handle is a staged temporary file in the target directory. Presenting
//! the save moves it to its final name; releasing an unsaved handle deletes the
//! staged file.
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::download::Payload;
//! use fetch_save::save::{trigger_save, DirectorySaveSurface};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let surface = DirectorySaveSurface::new(dir.path().to_path_buf());
//! trigger_save(&surface, &Payload::from(b"%PDF-1.7".to_vec()), "report.pdf")?;
//! assert!(dir.path().join("report.pdf").exists());
//! # Ok(())
//! # }
//! ```

use super::surface::{HandleId, SaveSurface};
use crate::download::Payload;
use crate::error::{Error, Result};

use std::collections::HashMap;
use std::env::current_dir;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Name used when the caller suggests none.
pub const DEFAULT_FILE_NAME: &str = "download";

/// [`SaveSurface`] writing files into a directory.
#[derive(Debug)]
pub struct DirectorySaveSurface {
    /// Directory where files are saved.
    directory: PathBuf,
    /// Name used for an empty suggestion.
    default_name: String,
    /// Replace existing files.
    overwrite: bool,
    /// Staged files keyed by handle.
    staged: Mutex<HashMap<HandleId, NamedTempFile>>,
}

impl Default for DirectorySaveSurface {
    fn default() -> Self {
        Self::new(current_dir().unwrap_or_default())
    }
}

impl DirectorySaveSurface {
    /// Creates a surface saving into `directory`.
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            default_name: DEFAULT_FILE_NAME.to_string(),
            overwrite: false,
            staged: Mutex::new(HashMap::new()),
        }
    }

    /// Set the name used when no name is suggested.
    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    /// Set whether to overwrite existing files.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Gets the directory where files are saved.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Number of handles currently staged.
    pub fn staged_count(&self) -> usize {
        self.staged.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Where a file suggested as `suggested_name` ends up.
    ///
    /// Only the final path component of the suggestion is kept.
    pub fn target_path(&self, suggested_name: &str) -> PathBuf {
        let name = Path::new(suggested_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(self.default_name.as_str());
        self.directory.join(name)
    }

    fn lock_staged(&self) -> Result<std::sync::MutexGuard<'_, HashMap<HandleId, NamedTempFile>>> {
        self.staged
            .lock()
            .map_err(|e| Error::Internal(format!("staged handles lock poisoned: {}", e)))
    }
}

impl SaveSurface for DirectorySaveSurface {
    fn create_handle(&self, payload: &Payload) -> Result<HandleId> {
        debug!("Creating destination directory {:?}", self.directory);
        fs::create_dir_all(&self.directory)?;

        let mut file = tempfile::Builder::new()
            .prefix(".fetch-save-")
            .suffix(".part")
            .tempfile_in(&self.directory)?;
        file.write_all(payload.as_bytes())?;
        file.flush()?;

        let id = HandleId::new(file.path().display().to_string());
        self.lock_staged()?.insert(id.clone(), file);
        Ok(id)
    }

    fn present_save(&self, handle: &HandleId, suggested_name: &str) -> Result<()> {
        let file = self
            .lock_staged()?
            .remove(handle)
            .ok_or_else(|| Error::Save(format!("unknown save handle {}", handle)))?;
        let target = self.target_path(suggested_name);

        let persisted = if self.overwrite {
            file.persist(&target)
        } else {
            file.persist_noclobber(&target)
        };

        match persisted {
            Ok(_) => {
                info!("Saved {:?}", target);
                Ok(())
            }
            Err(e) => {
                let message = format!("cannot save {:?}: {}", target, e.error);
                // Hand the staged file back so releasing the handle removes it.
                self.lock_staged()?.insert(handle.clone(), e.file);
                Err(Error::Save(message))
            }
        }
    }

    fn release_handle(&self, handle: &HandleId) {
        if let Ok(mut staged) = self.staged.lock() {
            if let Some(file) = staged.remove(handle) {
                debug!("Discarding staged file {:?}", file.path());
            }
        }
    }
}
