// Windows platform implementation.
// PowerShell for the message box, the URL protocol handler for links, arboard for the
// clipboard.

use super::{clipboard, clock};
use super::command::{find_program, run_status};
use super::types::*;
use std::process::{Command, Stdio};

const TITLE_VAR: &str = "SYS_SERVICES_ALERT_TITLE";
const MESSAGE_VAR: &str = "SYS_SERVICES_ALERT_MESSAGE";

// Text is passed through the environment so it never has to be quoted for PowerShell.
const ALERT_COMMAND: &str = "Add-Type -AssemblyName System.Windows.Forms; \
    [void][System.Windows.Forms.MessageBox]::Show($env:SYS_SERVICES_ALERT_MESSAGE, $env:SYS_SERVICES_ALERT_TITLE, 'OK', 'Error')";

pub struct WindowsSys {
    debug: bool,
    powershell: Option<&'static str>,
}

impl WindowsSys {
    pub fn new() -> Self {
        Self {
            debug: false,
            powershell: None,
        }
    }

    fn powershell_command(&self, program: &str, script: &str) -> Command {
        let mut command = Command::new(program);
        command.args(["-NoProfile", "-NonInteractive", "-Command", script]);
        command
    }
}

impl Default for WindowsSys {
    fn default() -> Self {
        Self::new()
    }
}

impl SysBackend for WindowsSys {
    fn native_library_version(&self) -> String {
        super::NATIVE_VERSION.to_string()
    }

    fn load_native_support(&mut self) -> Result<(), String> {
        self.powershell = ["powershell", "pwsh"]
            .into_iter()
            .find(|p| find_program(p).is_some());
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
        diag!(self.debug, "[WindowsSys] powershell={:?}", self.powershell);
    }

    fn alert(&self, title: &str, message: &str) -> Result<(), String> {
        let Some(program) = self.powershell else {
            super::console_alert(title, message);
            return Ok(());
        };
        run_status(
            self.powershell_command(program, ALERT_COMMAND)
                .env(TITLE_VAR, title)
                .env(MESSAGE_VAR, message),
        )
        .map_err(|e| e.to_string())
    }

    fn open_url(&self, url: &str) -> bool {
        // rundll32 exit codes say nothing about the browser; only a failed launch is certain.
        match Command::new("rundll32")
            .args(["url.dll,FileProtocolHandler", url])
            .stdin(Stdio::null())
            .status()
        {
            Ok(_) => true,
            Err(e) => {
                diag!(self.debug, "[WindowsSys] Failed to run rundll32: {}", e);
                false
            }
        }
    }

    fn clipboard(&self) -> Option<String> {
        clipboard::read_text(self.debug)
    }
}
