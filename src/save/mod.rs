//! Save module handing payloads to the host's "save as" surface.
//!
//! - `surface` - The [`SaveSurface`] capability, the RAII [`SaveHandle`] and [`trigger_save`]
//! - `directory` - [`DirectorySaveSurface`], saving into a local directory

pub(crate) mod directory;
pub(crate) mod surface;

pub use directory::{DirectorySaveSurface, DEFAULT_FILE_NAME};
pub use surface::{trigger_save, HandleId, SaveHandle, SaveSurface};
