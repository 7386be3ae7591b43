//! URL launching: an optional managed launch service first, the backend second.

use crate::platform::command::run_status;
use crate::platform::SysBackend;
use std::env;
use std::process::Command;
use url::Url;

/// A managed launch path the environment may supply (tier 1 of `open_url`).
pub trait LaunchService: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Ask the service to open `url`. Any error makes the facade fall back to the backend.
    fn show_document(&self, url: &Url) -> Result<(), LaunchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    #[error("launch service unreachable: {0}")]
    Unreachable(String),

    #[error("launch service did not open the document: {0}")]
    NotOpened(String),
}

/// Launch service built from the `BROWSER` environment convention: a list of commands
/// tried in order, each either containing `%s` for the URL or taking it as last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEnvLaunch {
    commands: Vec<String>,
}

#[cfg(windows)]
const LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const LIST_SEPARATOR: char = ':';

impl BrowserEnvLaunch {
    pub const VAR: &'static str = "BROWSER";

    /// Read the environment. Absent when `BROWSER` is unset or empty.
    pub fn discover() -> Option<Self> {
        let value = env::var(Self::VAR).ok()?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &str) -> Option<Self> {
        let commands: Vec<String> = value
            .split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        if commands.is_empty() {
            None
        } else {
            Some(Self { commands })
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Split a command template into program and arguments with the URL substituted.
    fn expand(template: &str, url: &str) -> Option<(String, Vec<String>)> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let mut program = parts.next()?;
        let mut args: Vec<String> = parts.collect();

        let mut substituted = program.contains("%s");
        if substituted {
            program = program.replace("%s", url);
        }
        for arg in args.iter_mut() {
            if arg.contains("%s") {
                *arg = arg.replace("%s", url);
                substituted = true;
            }
        }
        if !substituted {
            args.push(url.to_string());
        }
        Some((program, args))
    }
}

impl LaunchService for BrowserEnvLaunch {
    fn name(&self) -> &str {
        Self::VAR
    }

    fn show_document(&self, url: &Url) -> Result<(), LaunchError> {
        let mut errors = Vec::new();
        let mut any_started = false;

        for template in &self.commands {
            let Some((program, args)) = Self::expand(template, url.as_str()) else {
                continue;
            };
            match run_status(Command::new(&program).args(&args)) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    any_started |= e.started();
                    errors.push(e.to_string());
                }
            }
        }

        let detail = errors.join("; ");
        if any_started {
            Err(LaunchError::NotOpened(detail))
        } else {
            Err(LaunchError::Unreachable(detail))
        }
    }
}

/// Two-tier URL open. A URL that does not parse is a certain failure and reaches neither
/// tier; any tier-1 error falls through to the backend, whose answer is final.
pub(crate) fn open_url(
    url: &str,
    service: Option<&dyn LaunchService>,
    backend: &dyn SysBackend,
    debug: bool,
) -> bool {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            diag!(debug, "[Sys] open_url: malformed URL {:?}: {}", url, e);
            return false;
        }
    };

    if let Some(service) = service {
        match service.show_document(&parsed) {
            Ok(()) => return true,
            Err(e) => diag!(
                debug,
                "[Sys] open_url: {} failed ({}), falling back to backend",
                service.name(),
                e
            ),
        }
    }

    backend.open_url(url)
}
