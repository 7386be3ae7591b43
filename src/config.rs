//! Process-wide configuration, read once at startup.

use crate::error::ConfigError;
use crate::platform::host_os_name;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SysConfig {
    /// Route internal diagnostics to stderr.
    pub debug: bool,
    /// OS identifier override; the detected host name is used when unset.
    pub os_name: Option<String>,
    /// Use the `BROWSER` environment launch service as the first URL-open tier.
    pub browser_launch: bool,
}

impl Default for SysConfig {
    fn default() -> Self {
        Self {
            debug: false,
            os_name: None,
            browser_launch: true,
        }
    }
}

/// Boolean environment values: `true` (any case) or `1`.
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

impl SysConfig {
    pub const DEBUG_VAR: &'static str = "SYS_SERVICES_DEBUG";
    pub const OS_NAME_VAR: &'static str = "SYS_SERVICES_OS_NAME";
    pub const CONFIG_VAR: &'static str = "SYS_SERVICES_CONFIG";

    /// `<config dir>/sys-services/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sys-services").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the config file, then environment overrides.
    /// A broken config file is reported and otherwise ignored.
    pub fn from_env() -> Self {
        let explicit = env::var_os(Self::CONFIG_VAR).map(PathBuf::from);
        let path = match explicit {
            Some(path) => Some(path),
            None => Self::default_path().filter(|p| p.is_file()),
        };

        let mut config = match path {
            Some(path) => Self::load(&path).unwrap_or_else(|e| {
                log::warn!("[Sys] {}; using defaults", e);
                Self::default()
            }),
            None => Self::default(),
        };
        config.apply_env(|name| env::var(name).ok());
        config
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(value) = var(Self::DEBUG_VAR) {
            self.debug = parse_flag(&value);
        }
        if let Some(value) = var(Self::OS_NAME_VAR).filter(|v| !v.is_empty()) {
            self.os_name = Some(value);
        }
    }

    /// The OS identifier handed to backend selection.
    pub fn os_name(&self) -> String {
        self.os_name.clone().unwrap_or_else(host_os_name)
    }
}
