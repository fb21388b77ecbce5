//! Command dispatch.

mod backups;
mod generate;
mod palettes;
mod restore;
mod theme;

use std::io::{self, Write};

use prism_common::PrismError;
use prism_platform::{CommandNotifier, ImageMagickExtractor};

use crate::cli::{Action, Command};
use crate::context::Context;

pub async fn run(action: Action, ctx: &Context) -> Result<(), PrismError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match action {
        Action::Generate {
            image,
            name,
            dry_run,
        } => {
            let extractor = ImageMagickExtractor::from_config(&ctx.config.extractor);
            let request = generate::Request {
                image: &image,
                name: name.as_deref(),
                dry_run,
            };
            generate::run(ctx, &extractor, &CommandNotifier, request, &mut out).await
        }
        Action::Run(Command::Apply { name, dry_run }) => {
            palettes::apply(ctx, &CommandNotifier, &name, dry_run, &mut out).await
        }
        Action::Run(Command::List) => palettes::list(ctx, &mut out),
        Action::Run(Command::Show { name }) => palettes::show(ctx, &name, &mut out),
        Action::Run(Command::Delete { name }) => palettes::delete(ctx, &name, &mut out),
        Action::Run(Command::Backup) => backups::backup(ctx, &mut out),
        Action::Run(Command::Backups) => backups::list(ctx, &mut out),
        Action::Run(Command::Restore { id, yes }) => {
            let engine = ctx.restore_engine();
            let stdin = io::stdin();
            let mut flow = restore::RestoreFlow::new(&engine, stdin.lock(), &mut out, yes);
            flow.run(id)
        }
    }
}

/// Terminal output is best-effort; a closed pipe is not worth failing over.
pub(crate) fn emit(out: &mut dyn Write, text: impl std::fmt::Display) {
    let _ = writeln!(out, "{text}");
}
