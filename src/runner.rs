//! Blocking shell command runner with captured output.

use std::process::Command;
use tracing::warn;

pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Run a shell-interpreted command and capture stdout/stderr/status.
/// No retries and no timeout; a spawn failure degrades to empty output
/// so discovery falls through to "nothing found" instead of aborting.
pub fn run_shell(command: &str) -> CmdOutput {
    match Command::new("sh").arg("-c").arg(command).output() {
        Ok(out) => CmdOutput {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            success: out.status.success(),
        },
        Err(e) => {
            warn!("failed to spawn {command:?}: {e}");
            CmdOutput {
                stdout: String::new(),
                stderr: String::new(),
                success: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_status() {
        let out = run_shell("echo hello");
        assert!(out.success);
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn nonzero_exit_reported() {
        let out = run_shell("exit 3");
        assert!(!out.success);
    }

    #[test]
    fn unreachable_binary_degrades_to_empty() {
        let out = run_shell("/definitely/not/a/binary 2>/dev/null");
        assert!(!out.success);
        assert!(out.stdout.is_empty());
    }
}
