//! Privileged copy for system files the current user cannot write.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use prism_common::PlatformError;
use tracing::info;

/// Copies a file with elevated rights.
pub trait PrivilegedCopy {
    fn copy(&self, src: &Path, dst: &Path) -> Result<(), PlatformError>;
}

/// Escalates through `sudo`, which prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SudoCopy;

impl PrivilegedCopy for SudoCopy {
    fn copy(&self, src: &Path, dst: &Path) -> Result<(), PlatformError> {
        if let Some(parent) = dst.parent() {
            run_sudo(&[
                OsStr::new("mkdir"),
                OsStr::new("-p"),
                OsStr::new("--"),
                parent.as_os_str(),
            ])?;
        }
        run_sudo(&[
            OsStr::new("cp"),
            OsStr::new("--"),
            src.as_os_str(),
            dst.as_os_str(),
        ])?;
        info!(path = %dst.display(), "restored with sudo");
        Ok(())
    }
}

fn run_sudo(args: &[&OsStr]) -> Result<(), PlatformError> {
    let status = Command::new("sudo")
        .args(args)
        .status()
        .map_err(|e| PlatformError::CommandError(format!("failed to run sudo: {e}")))?;

    if !status.success() {
        return Err(PlatformError::CommandError(format!(
            "sudo {} exited with {status}",
            args.first().map(|a| a.to_string_lossy()).unwrap_or_default()
        )));
    }
    Ok(())
}
