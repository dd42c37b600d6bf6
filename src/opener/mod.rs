//! OS-level "open with default handler" collaborator
//!
//! The console only needs "open this path or URL"; the trait keeps the
//! process-spawning part out of the dispatch logic so tests can observe
//! open calls without touching the desktop.

use anyhow::{Context, Result};
use tracing::debug;

/// Opens a path or URL with the system default application
pub trait Opener {
    fn open(&self, target: &str) -> Result<()>;
}

/// Opener backed by the platform's opener command
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, target: &str) -> Result<()> {
        debug!("opening {target} with system handler");

        #[cfg(target_os = "macos")]
        {
            let mut command = std::process::Command::new("open");
            command.arg(target);
            run(command, "open")
        }
        #[cfg(target_os = "linux")]
        {
            let mut command = std::process::Command::new("xdg-open");
            command.arg(target);
            run(command, "xdg-open")
        }
        #[cfg(target_os = "windows")]
        {
            let mut command = std::process::Command::new("cmd");
            command.args(["/C", "start", "", target]);
            run(command, "start")
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            let _ = target;
            anyhow::bail!("no system opener on this platform");
        }
    }
}

// Waits for the opener to finish so "no handler" and "path not found"
// exits surface as errors and no child is left unreaped.
fn run(mut command: std::process::Command, name: &str) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("failed to run {name}"))?;
    if !status.success() {
        anyhow::bail!("{name} failed: {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_reported() {
        let command = std::process::Command::new("false");
        let err = run(command, "false").unwrap_err();
        assert!(err.to_string().contains("false failed"));
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_ok() {
        assert!(run(std::process::Command::new("true"), "true").is_ok());
    }

    #[test]
    fn test_missing_binary_is_reported() {
        let command = std::process::Command::new("no-such-opener-binary");
        assert!(run(command, "no-such-opener-binary").is_err());
    }
}
