use std::path::PathBuf;

/// Fatal initialization failure. Raised once, then handed to every later caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SysError {
    #[error("The platform {os_name} is not supported")]
    UnsupportedPlatform { os_name: String },

    #[error("Backend {backend} is unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("Version mismatch: facade version is '{expected}', native library version is '{found}'")]
    VersionMismatch { expected: String, found: String },
}

/// Configuration file problems. Never fatal for environment-driven startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
