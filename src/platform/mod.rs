// Platform abstraction layer: maps the host OS identifier to one backend variant.
//
// Every backend implements `SysBackend` from `types.rs`. All variants compile on every
// target because the choice is made at run time from the OS identifier; the Cargo
// `backend-*` features decide which variants a build is allowed to instantiate.

pub mod types;

mod clipboard;
mod clock;
pub(crate) mod command;

pub mod linux;
pub mod macos;
pub mod windows;

pub use types::*;

use crate::error::SysError;
use linux::LinuxSys;
use macos::MacOsSys;
use windows::WindowsSys;

/// Version tag every bundled backend reports.
pub const NATIVE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// OS identifier of the running host, in the form the selector matches against.
pub fn host_os_name() -> String {
    match std::env::consts::OS {
        "linux" => "Linux".to_string(),
        "windows" => "Windows".to_string(),
        "macos" => "Mac OS X".to_string(),
        other => other.to_string(),
    }
}

/// Prefix-match `os_name` against the known OS tokens. First match wins.
pub fn select(os_name: &str) -> Result<OsFamily, SysError> {
    OsFamily::TOKENS
        .iter()
        .find(|(token, _)| os_name.starts_with(*token))
        .map(|(_, family)| *family)
        .ok_or_else(|| SysError::UnsupportedPlatform {
            os_name: os_name.to_string(),
        })
}

/// Whether this build ships the backend for `family`.
pub const fn is_bundled(family: OsFamily) -> bool {
    match family {
        OsFamily::Linux => cfg!(feature = "backend-linux"),
        OsFamily::Windows => cfg!(feature = "backend-windows"),
        OsFamily::MacOs => cfg!(feature = "backend-macos"),
    }
}

/// Construct the backend for `family`. Single attempt, no retry.
pub fn instantiate(family: OsFamily) -> Result<PlatformBackend, SysError> {
    if !is_bundled(family) {
        return Err(SysError::BackendUnavailable {
            backend: family.to_string(),
            reason: format!("built without the `backend-{}` feature", family),
        });
    }
    Ok(match family {
        OsFamily::Linux => PlatformBackend::Linux(LinuxSys::new()),
        OsFamily::Windows => PlatformBackend::Windows(WindowsSys::new()),
        OsFamily::MacOs => PlatformBackend::MacOs(MacOsSys::new()),
    })
}

/// Print an alert to stderr when no windowing system can show it.
pub(crate) fn console_alert(title: &str, message: &str) {
    if title.is_empty() {
        eprintln!("{}", message);
    } else {
        eprintln!("{}: {}", title, message);
    }
}

/// The closed set of bundled backends.
pub enum PlatformBackend {
    Linux(LinuxSys),
    Windows(WindowsSys),
    MacOs(MacOsSys),
}

impl PlatformBackend {
    pub fn family(&self) -> OsFamily {
        match self {
            Self::Linux(_) => OsFamily::Linux,
            Self::Windows(_) => OsFamily::Windows,
            Self::MacOs(_) => OsFamily::MacOs,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $backend:ident => $call:expr) => {
        match $self {
            PlatformBackend::Linux($backend) => $call,
            PlatformBackend::Windows($backend) => $call,
            PlatformBackend::MacOs($backend) => $call,
        }
    };
}

impl SysBackend for PlatformBackend {
    fn native_library_version(&self) -> String {
        dispatch!(self, b => b.native_library_version())
    }

    fn load_native_support(&mut self) -> Result<(), String> {
        dispatch!(self, b => b.load_native_support())
    }

    fn timer_resolution(&self) -> u64 {
        dispatch!(self, b => b.timer_resolution())
    }

    fn time(&self) -> u64 {
        dispatch!(self, b => b.time())
    }

    fn set_debug(&mut self, debug: bool) {
        dispatch!(self, b => b.set_debug(debug))
    }

    fn alert(&self, title: &str, message: &str) -> Result<(), String> {
        dispatch!(self, b => b.alert(title, message))
    }

    fn open_url(&self, url: &str) -> bool {
        dispatch!(self, b => b.open_url(url))
    }

    fn clipboard(&self) -> Option<String> {
        dispatch!(self, b => b.clipboard())
    }
}
