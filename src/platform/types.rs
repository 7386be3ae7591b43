// Backend contract: implemented by every platform module and by any out-of-tree backend
// handed to the facade.

use std::fmt;

/// Operating system family a backend is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Linux,
    Windows,
    MacOs,
}

impl OsFamily {
    /// Known OS identifier prefixes, in match order. The prefixes are disjoint.
    pub const TOKENS: [(&'static str, OsFamily); 3] = [
        ("Linux", OsFamily::Linux),
        ("Windows", OsFamily::Windows),
        ("Mac", OsFamily::MacOs),
    ];

    /// Stable name used in diagnostics and errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::MacOs => "macos",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait that each platform backend must implement.
///
/// The facade owns exactly one backend for the life of the process. Methods taking
/// `&mut self` are only called during initialization; everything else may be called from
/// any thread, with whatever thread-safety the backend itself provides.
pub trait SysBackend: Send + Sync {
    /// Version tag of the backend. Must equal the facade's compiled version exactly.
    fn native_library_version(&self) -> String;

    /// Prepare whatever the backend needs at run time (helper discovery, session probing).
    /// Called once, before the version check.
    fn load_native_support(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Timer ticks per second, or 0 if no high-resolution timer is available.
    fn timer_resolution(&self) -> u64;

    /// Free-running tick counter. May wrap.
    fn time(&self) -> u64;

    /// Enable or disable diagnostic output.
    fn set_debug(&mut self, debug: bool);

    /// Show a blocking modal alert. Backends without a windowing system may degrade to a
    /// console message and return `Ok`.
    fn alert(&self, title: &str, message: &str) -> Result<(), String>;

    /// Open `url` in the system browser. `false` only when failure is certain.
    fn open_url(&self, url: &str) -> bool;

    /// Clipboard text. `None` means there is no clipboard; `Some("")` is an empty one.
    fn clipboard(&self) -> Option<String>;
}
