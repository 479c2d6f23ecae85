//! Progress callbacks and their isolation.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// Progress callback, invoked with `(loaded, total)`.
///
/// `loaded` is the cumulative number of bytes received so far. `total` is the
/// size declared by the server, or `None` when it declared none.
pub type ProgressCallback = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;

/// Wrap a closure into a [`ProgressCallback`].
pub fn progress_callback<F>(f: F) -> ProgressCallback
where
    F: Fn(u64, Option<u64>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Invoke `callback`, containing any panic it raises.
///
/// Progress reporting is best effort: a misbehaving callback is logged and the
/// transfer carries on. Returns `false` when the callback panicked.
pub fn report(callback: &ProgressCallback, loaded: u64, total: Option<u64>) -> bool {
    match catch_unwind(AssertUnwindSafe(|| callback(loaded, total))) {
        Ok(()) => true,
        Err(cause) => {
            let message = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            warn!(loaded, ?total, "progress callback panicked: {}", message);
            false
        }
    }
}
