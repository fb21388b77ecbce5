//! The shared "change the theme" pipeline used by generate and apply:
//! snapshot, render every template, then fire the reload hooks.

use std::io::Write;

use prism_common::{BackupError, PrismError};
use prism_config::{render_to_file, Palette};
use prism_platform::{notify_all, ReloadNotifier};
use tracing::info;

use super::emit;
use crate::context::Context;

#[derive(Debug)]
pub(crate) struct Applied {
    pub snapshot_id: String,
    pub rendered: usize,
}

pub(crate) async fn apply_palette(
    ctx: &Context,
    notifier: &dyn ReloadNotifier,
    palette: &Palette,
    out: &mut dyn Write,
) -> Result<Applied, PrismError> {
    let snapshot = ctx.backup_manager().snapshot(&ctx.tracked_files())?;
    emit(
        out,
        format_args!(
            "Backed up {} file(s) to {}",
            snapshot.files.len(),
            snapshot.path.display()
        ),
    );

    // Nothing is rendered unless every existing target is in the snapshot.
    for template in &ctx.config.templates {
        let target = ctx.expand(&template.target);
        if target.exists() && !snapshot.files.iter().any(|entry| entry.source == target) {
            return Err(BackupError::Uncovered(target).into());
        }
    }

    for template in &ctx.config.templates {
        let source = ctx.expand(&template.source);
        let target = ctx.expand(&template.target);
        render_to_file(&source, &target, template.style, palette).map_err(|err| {
            PrismError::RenderAfterBackup {
                snapshot: snapshot.path.clone(),
                source: err,
            }
        })?;
    }

    let failures = notify_all(notifier, &ctx.config.reload).await;
    if failures > 0 {
        emit(out, format_args!("{failures} reload hook(s) failed; see log"));
    }

    info!(
        palette = %palette.name,
        templates = ctx.config.templates.len(),
        "theme applied"
    );
    Ok(Applied {
        snapshot_id: snapshot.id,
        rendered: ctx.config.templates.len(),
    })
}
