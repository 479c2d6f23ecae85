//! Save surface capability and the save trigger.

use crate::download::Payload;
use crate::error::{Error, Result};

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;

/// Short-lived address of a payload registered with a [`SaveSurface`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandleId(String);

impl HandleId {
    /// Create a handle identifier.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Get the address the handle stands for.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host surface able to present a "save as" interaction for in-memory bytes.
pub trait SaveSurface: Send + Sync {
    /// Register `payload` and return an address for it.
    fn create_handle(&self, payload: &Payload) -> Result<HandleId>;

    /// Start the save interaction for `handle`, suggesting `suggested_name`.
    ///
    /// `suggested_name` may be empty, in which case the surface picks a name.
    /// Returning does not mean the user saved anything: the surface stays in
    /// charge of whether and where the file lands.
    fn present_save(&self, handle: &HandleId, suggested_name: &str) -> Result<()>;

    /// Invalidate `handle`. Must tolerate handles that were already consumed.
    fn release_handle(&self, handle: &HandleId);
}

/// Exclusively owned save handle, released when dropped.
pub struct SaveHandle<'a> {
    surface: &'a dyn SaveSurface,
    id: HandleId,
}

impl<'a> SaveHandle<'a> {
    /// Register `payload` with `surface`.
    pub fn create(surface: &'a dyn SaveSurface, payload: &Payload) -> Result<Self> {
        let id = surface.create_handle(payload)?;
        debug!(handle = %id, size = payload.size(), "created save handle");
        Ok(Self { surface, id })
    }

    /// Get the handle identifier.
    pub fn id(&self) -> &HandleId {
        &self.id
    }

    /// Start the save interaction for this handle.
    pub fn present(&self, suggested_name: &str) -> Result<()> {
        self.surface.present_save(&self.id, suggested_name)
    }
}

impl Drop for SaveHandle<'_> {
    fn drop(&mut self) {
        debug!(handle = %self.id, "releasing save handle");
        self.surface.release_handle(&self.id);
    }
}

/// Hand `payload` to `surface` under the name `display_name`.
///
/// Exactly one handle is created and it is released on every path, including
/// when the surface fails or panics. A panic is reported as [`Error::Save`].
pub fn trigger_save(surface: &dyn SaveSurface, payload: &Payload, display_name: &str) -> Result<()> {
    match catch_unwind(AssertUnwindSafe(|| {
        let handle = SaveHandle::create(surface, payload)?;
        handle.present(display_name)
    })) {
        Ok(result) => result,
        Err(_) => Err(Error::Save("save surface panicked".to_string())),
    }
}
