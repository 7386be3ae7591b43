//! stderr logger setup.

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Install a stderr logger at `level`. Keeps whatever logger the host already installed.
pub fn init(level: LevelFilter) -> bool {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("sys_services", level)
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}

/// Logger used when debug diagnostics are switched on.
pub(crate) fn init_debug() {
    if !init(LevelFilter::Debug) {
        log::debug!(target: "sys_services", "[Sys] logger already installed, keeping it");
    }
}
