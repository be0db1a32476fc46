//! Logging setup for the binaries.
//!
//! The terminal belongs to the renderer, so logs go to a file. The filter
//! comes from `RUST_LOG` (e.g. `RUST_LOG=engine=trace,viewport=debug`).

use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install a file subscriber writing to `file`.
///
/// Returns the writer guard; keep it alive until exit so buffered lines are
/// flushed. Returns `None` if a global subscriber was already installed.
pub fn init(file: impl AsRef<Path>) -> Result<Option<WorkerGuard>> {
    let path = file.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    match tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // Already installed; dropping the guard shuts the unused writer down.
        Err(_) => Ok(None),
    }
}

/// Log panics before the default hook prints them.
pub fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}
