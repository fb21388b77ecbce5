//! `prism backup` and `prism backups`.

use std::io::Write;

use prism_common::PrismError;

use super::emit;
use crate::context::Context;

pub(crate) fn backup(ctx: &Context, out: &mut dyn Write) -> Result<(), PrismError> {
    let snapshot = ctx.backup_manager().snapshot(&ctx.tracked_files())?;
    emit(
        out,
        format_args!(
            "Backup {} created at {} ({} file(s))",
            snapshot.id,
            snapshot.path.display(),
            snapshot.files.len()
        ),
    );
    Ok(())
}

pub(crate) fn list(ctx: &Context, out: &mut dyn Write) -> Result<(), PrismError> {
    let ids = ctx.backup_manager().list()?;
    if ids.is_empty() {
        emit(out, "No backups found.");
    }
    for id in ids {
        emit(out, id);
    }
    Ok(())
}
