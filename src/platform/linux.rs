// Linux platform implementation.
// Uses external commands (zenity/kdialog/xmessage, xdg-open) chosen once from what is
// installed and which display session is running. Clipboard goes through arboard.

use super::{clipboard, clock};
use super::command::{first_available, run_status};
use super::types::*;
use std::env;
use std::process::Command;

/// Display session the process is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Wayland,
    X11,
    Headless,
}

#[derive(Debug, Default)]
struct LinuxTools {
    dialog: Option<&'static str>,
    opener: Option<&'static str>,
}

pub struct LinuxSys {
    debug: bool,
    session: Session,
    tools: LinuxTools,
}

// ============ Internal helpers ============

/// Detect whether the current session is Wayland, X11, or has no display at all.
fn detect_session() -> Session {
    let has = |name: &str| env::var_os(name).map_or(false, |v| !v.is_empty());

    let session_type = env::var("XDG_SESSION_TYPE")
        .unwrap_or_default()
        .to_lowercase();

    if has("WAYLAND_DISPLAY") || session_type.contains("wayland") {
        Session::Wayland
    } else if has("DISPLAY") {
        Session::X11
    } else {
        Session::Headless
    }
}

impl LinuxSys {
    pub fn new() -> Self {
        Self {
            debug: false,
            session: Session::Headless,
            tools: LinuxTools::default(),
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    fn show_dialog(&self, dialog: &str, title: &str, message: &str) -> Result<(), String> {
        let result = match dialog {
            "zenity" => run_status(Command::new("zenity").args([
                "--info",
                "--no-markup",
                "--title",
                title,
                "--text",
                message,
            ])),
            "kdialog" => run_status(Command::new("kdialog").args(["--title", title, "--msgbox", message])),
            _ => {
                let text = format!("{}\n\n{}", title, message);
                run_status(Command::new("xmessage").args(["-center", "-buttons", "OK:0", &text]))
            }
        };
        result.map_err(|e| e.to_string())
    }
}

impl Default for LinuxSys {
    fn default() -> Self {
        Self::new()
    }
}

// ============ SysBackend implementation ============

impl SysBackend for LinuxSys {
    fn native_library_version(&self) -> String {
        super::NATIVE_VERSION.to_string()
    }

    fn load_native_support(&mut self) -> Result<(), String> {
        self.session = detect_session();
        self.tools = LinuxTools {
            dialog: first_available(&["zenity", "kdialog", "xmessage"]),
            opener: first_available(&["xdg-open", "gio"]),
        };
        Ok(())
    }

    fn timer_resolution(&self) -> u64 {
        clock::NANOS_PER_SECOND
    }

    fn time(&self) -> u64 {
        clock::monotonic_nanos()
    }

    fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        diag!(
            self.debug,
            "[LinuxSys] session={:?} dialog={:?} opener={:?}",
            self.session,
            self.tools.dialog,
            self.tools.opener
        );
    }

    fn alert(&self, title: &str, message: &str) -> Result<(), String> {
        match (self.session, self.tools.dialog) {
            (Session::Headless, _) | (_, None) => {
                super::console_alert(title, message);
                Ok(())
            }
            (_, Some(dialog)) => self.show_dialog(dialog, title, message),
        }
    }

    fn open_url(&self, url: &str) -> bool {
        let result = match self.tools.opener {
            Some("gio") => run_status(Command::new("gio").args(["open", url])),
            Some(opener) => run_status(Command::new(opener).arg(url)),
            None => {
                diag!(self.debug, "[LinuxSys] open_url: no URL opener installed (xdg-open, gio)");
                return false;
            }
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                diag!(self.debug, "[LinuxSys] open_url failed: {}", e);
                false
            }
        }
    }

    fn clipboard(&self) -> Option<String> {
        // No display server, nothing for arboard to connect to.
        if self.session == Session::Headless {
            return None;
        }
        clipboard::read_text(self.debug)
    }
}
