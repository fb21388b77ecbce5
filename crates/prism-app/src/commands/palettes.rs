//! Saved palette commands: list, show, delete, apply.

use std::io::Write;

use prism_common::PrismError;
use prism_config::describe_palette;
use prism_platform::ReloadNotifier;

use super::{emit, theme};
use crate::context::Context;

pub(crate) fn list(ctx: &Context, out: &mut dyn Write) -> Result<(), PrismError> {
    let names = ctx.palettes.list()?;
    if names.is_empty() {
        emit(out, "No saved palettes.");
    }
    for name in names {
        emit(out, name);
    }
    Ok(())
}

pub(crate) fn show(ctx: &Context, name: &str, out: &mut dyn Write) -> Result<(), PrismError> {
    emit(out, ctx.palettes.describe(name)?);
    Ok(())
}

pub(crate) fn delete(ctx: &Context, name: &str, out: &mut dyn Write) -> Result<(), PrismError> {
    ctx.palettes.delete(name)?;
    emit(out, format_args!("Deleted palette '{name}'"));
    Ok(())
}

pub(crate) async fn apply(
    ctx: &Context,
    notifier: &dyn ReloadNotifier,
    name: &str,
    dry_run: bool,
    out: &mut dyn Write,
) -> Result<(), PrismError> {
    let palette = ctx.palettes.load(name)?;
    emit(out, describe_palette(&palette));
    if dry_run {
        return Ok(());
    }
    let applied = theme::apply_palette(ctx, notifier, &palette, out).await?;
    emit(
        out,
        format_args!(
            "Applied palette '{name}' to {} template(s) (backup {})",
            applied.rendered, applied.snapshot_id
        ),
    );
    Ok(())
}
