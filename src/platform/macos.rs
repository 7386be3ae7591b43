// macOS platform implementation. AppleScript alerts, LaunchServices via `open`,
// pasteboard through arboard.

use super::{clipboard, clock};
use super::command::{find_program, run_status};
use super::types::*;
use std::process::Command;

// Title and message arrive as argv so they never need AppleScript quoting.
const ALERT_SCRIPT: [&str; 6] = [
    "-e",
    "on run argv",
    "-e",
    "display alert (item 1 of argv) message (item 2 of argv) as critical buttons {\"OK\"} default button \"OK\"",
    "-e",
    "end run",
];

#[derive(Debug, Default)]
struct MacTools {
    osascript: bool,
    open: bool,
}

pub struct MacOsSys {
    debug: bool,
    tools: MacTools,
}

impl MacOsSys {
    pub fn new() -> Self {
        Self {
            debug: false,
            tools: MacTools::default(),
        }
    }
}

impl Default for MacOsSys {
    fn default() -> Self {
        Self::new()
    }
}

impl SysBackend for MacOsSys {
    fn native_library_version(&self) -> String {
        super::NATIVE_VERSION.to_string()
    }

    fn load_native_support(&mut self) -> Result<(), String> {
        self.tools = MacTools {
            osascript: find_program("osascript").is_some(),
            open: find_program("open").is_some(),
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
        diag!(self.debug, "[MacOsSys] tools: {:?}", self.tools);
    }

    fn alert(&self, title: &str, message: &str) -> Result<(), String> {
        if !self.tools.osascript {
            super::console_alert(title, message);
            return Ok(());
        }
        run_status(
            Command::new("osascript")
                .args(ALERT_SCRIPT)
                .args([title, message]),
        )
        .map_err(|e| e.to_string())
    }

    fn open_url(&self, url: &str) -> bool {
        if !self.tools.open {
            diag!(self.debug, "[MacOsSys] open_url: `open` is not installed");
            return false;
        }
        match run_status(Command::new("open").arg(url)) {
            Ok(()) => true,
            Err(e) => {
                diag!(self.debug, "[MacOsSys] open_url failed: {}", e);
                false
            }
        }
    }

    fn clipboard(&self) -> Option<String> {
        clipboard::read_text(self.debug)
    }
}
