//! Cross-platform OS services behind one process-wide facade.
//!
//! A backend for the host OS is selected from the OS identifier, loaded, and checked
//! against the facade version exactly once. After that every call is a direct forward:
//! high-resolution timer, modal alert, best-effort URL launch, clipboard read.
//!
//! ```no_run
//! let sys = sys_services::global()?;
//! let start = sys.time();
//! sys.alert(Some("Error"), Some("Disk full"));
//! let waited = sys.ticks_to_duration(sys_services::Sys::time_delta(start, sys.time()));
//! # Ok::<(), sys_services::SysError>(())
//! ```

/// Debug-gated diagnostic. Nothing is emitted when the flag is off.
macro_rules! diag {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            log::debug!(target: "sys_services", $($arg)+);
        }
    };
}

mod config;
mod error;
mod grab;
mod launch;
pub mod logging;
pub mod platform;
mod sys;

#[cfg(test)]
mod testing;

pub use config::{parse_flag, SysConfig};
pub use error::{ConfigError, SysError};
pub use grab::{AtomicGrab, GrabCoordinator, NoGrab};
pub use launch::{BrowserEnvLaunch, LaunchError, LaunchService};
pub use platform::{OsFamily, SysBackend};
pub use sys::{InitState, Sys, SysBuilder, SysCell, TIME_MASK, VERSION};

static GLOBAL: SysCell = SysCell::new();

/// The process-wide facade, initialized from the environment on first use.
pub fn global() -> Result<&'static Sys, SysError> {
    GLOBAL.get_or_init(SysBuilder::from_env)
}

/// Initialize the process-wide facade from `builder`. If initialization already
/// happened, `builder` is dropped and the existing outcome is returned.
pub fn init_global(builder: SysBuilder) -> Result<&'static Sys, SysError> {
    if GLOBAL.is_initialized() {
        log::warn!("[Sys] already initialized; ignoring the new builder");
    }
    GLOBAL.get_or_init(move || builder)
}

/// Where the process-wide initialization currently stands.
pub fn init_state() -> InitState {
    GLOBAL.state()
}
