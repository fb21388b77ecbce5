//! Reload hooks: tell running programs to pick up the new colors.
//!
//! Notifications are fire-and-forget. A failing hook is logged and the rest
//! still run; nothing here fails a theme operation.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use prism_common::PlatformError;
use prism_config::schema::ReloadConfig;
use tokio::process::Command;
use tracing::{debug, warn};

#[async_trait]
pub trait ReloadNotifier: Send + Sync {
    async fn notify(&self, hook: &ReloadConfig) -> Result<(), PlatformError>;
}

/// Runs each hook's command directly (no shell) under its own timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandNotifier;

#[async_trait]
impl ReloadNotifier for CommandNotifier {
    async fn notify(&self, hook: &ReloadConfig) -> Result<(), PlatformError> {
        let (program, args) = hook
            .command
            .split_first()
            .ok_or_else(|| PlatformError::CommandError(format!("{}: empty command", hook.name)))?;

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        let status = tokio::time::timeout(Duration::from_secs(hook.timeout_secs), status)
            .await
            .map_err(|_| {
                PlatformError::CommandError(format!(
                    "{}: timed out after {}s",
                    hook.name, hook.timeout_secs
                ))
            })?
            .map_err(|e| PlatformError::CommandError(format!("{}: {e}", hook.name)))?;

        // pkill-style hooks exit non-zero when the target isn't running.
        if !status.success() {
            return Err(PlatformError::CommandError(format!(
                "{}: exited with {status}",
                hook.name
            )));
        }
        Ok(())
    }
}

/// Run every hook in order. Returns how many failed.
pub async fn notify_all(notifier: &dyn ReloadNotifier, hooks: &[ReloadConfig]) -> usize {
    let mut failures = 0;
    for hook in hooks {
        match notifier.notify(hook).await {
            Ok(()) => debug!(hook = %hook.name, "reload hook ran"),
            Err(e) => {
                warn!(hook = %hook.name, "reload hook failed: {e}");
                failures += 1;
            }
        }
    }
    failures
}
