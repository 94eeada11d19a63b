//! External-tool plumbing shared by the poppler and tesseract wrappers.

use std::process::Command;

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Failure of an external command invocation.
#[derive(Debug)]
pub(crate) enum CmdFailure {
    /// Binary missing from PATH.
    NotFound,
    /// Ran but exited nonzero; carries trimmed stderr.
    Failed(String),
    /// Spawn or I/O error.
    Io(std::io::Error),
}

/// Run a command, capturing stdout on success.
pub(crate) fn capture_stdout(cmd: &mut Command) -> Result<String, CmdFailure> {
    match cmd.output() {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        }
        Ok(output) => Err(CmdFailure::Failed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CmdFailure::NotFound),
        Err(e) => Err(CmdFailure::Io(e)),
    }
}

/// Run a command for its exit status alone.
pub(crate) fn run_status(cmd: &mut Command) -> Result<(), CmdFailure> {
    match cmd.status() {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(CmdFailure::Failed(String::new())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CmdFailure::NotFound),
        Err(e) => Err(CmdFailure::Io(e)),
    }
}
