// Helpers for backends that delegate to external programs.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Why an external program did not complete successfully.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },
}

impl CommandError {
    /// The program was started, so it exists and may have done part of its work.
    pub fn started(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}

/// Locate `program` on `PATH`. On Windows the `.exe` suffix is also tried.
pub fn find_program(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path).find_map(|dir| candidate(&dir, program))
}

fn candidate(dir: &Path, program: &str) -> Option<PathBuf> {
    let plain = dir.join(program);
    if plain.is_file() {
        return Some(plain);
    }
    if cfg!(windows) {
        let exe = dir.join(format!("{}.exe", program));
        if exe.is_file() {
            return Some(exe);
        }
    }
    None
}

/// Return the first program of `programs` found on `PATH`.
pub fn first_available(programs: &[&'static str]) -> Option<&'static str> {
    programs.iter().copied().find(|p| find_program(p).is_some())
}

/// Run a command to completion and fail on a non-zero exit. All stdio is detached:
/// launched browsers inherit it and would otherwise hold our pipes open.
pub fn run_status(command: &mut Command) -> Result<(), CommandError> {
    let program = program_name(command);
    let status = match command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status,
        Err(source) => return Err(CommandError::Spawn { program, source }),
    };

    if status.success() {
        Ok(())
    } else {
        Err(CommandError::Exit { program, status })
    }
}

fn program_name(command: &Command) -> String {
    command.get_program().to_string_lossy().into_owned()
}
