//! `prism <IMAGE>`: extract, derive, apply, save.

use std::io::Write;
use std::path::Path;

use prism_common::{ExtractionError, PaletteError, PrismError};
use prism_config::store::validate_name;
use prism_config::{describe_palette, Palette, SourceImage};
use prism_platform::{ColorExtractor, ReloadNotifier};
use tracing::warn;

use super::{emit, theme};
use crate::context::Context;

pub(crate) struct Request<'a> {
    pub image: &'a Path,
    pub name: Option<&'a str>,
    pub dry_run: bool,
}

pub(crate) async fn run(
    ctx: &Context,
    extractor: &dyn ColorExtractor,
    notifier: &dyn ReloadNotifier,
    request: Request<'_>,
    out: &mut dyn Write,
) -> Result<(), PrismError> {
    // Without an image there is nothing to fall back from.
    if !request.image.is_file() {
        return Err(ExtractionError::MissingImage(request.image.to_path_buf()).into());
    }
    let image =
        std::fs::canonicalize(request.image).unwrap_or_else(|_| request.image.to_path_buf());

    let name = match request.name {
        Some(name) => name.to_string(),
        None => default_name(&image)?,
    };
    validate_name(&name)?;

    let candidates = match extractor.extract(&image).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("color extraction failed, using fallback palette: {e}");
            Vec::new()
        }
    };

    let palette = Palette::derive(name.as_str(), SourceImage::Path(image), &candidates);
    emit(out, describe_palette(&palette));
    if request.dry_run {
        return Ok(());
    }

    theme::apply_palette(ctx, notifier, &palette, out).await?;
    let saved = ctx.palettes.save(&palette, &name)?;
    emit(out, format_args!("Saved palette '{name}' to {}", saved.display()));
    Ok(())
}

fn default_name(image: &Path) -> Result<String, PaletteError> {
    image
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| PaletteError::InvalidName(image.display().to_string()))
}
