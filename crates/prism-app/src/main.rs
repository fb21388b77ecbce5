mod cli;
mod commands;
mod context;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::context::Context;

fn init_logging(level: Option<&str>) {
    let directive = level.unwrap_or("prism=info");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "prism=info".parse().unwrap()),
            ),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());
    tracing::debug!("prism v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.clone();
    let Some(action) = args.action() else {
        tracing::error!("nothing to do: pass an image or a subcommand (see --help)");
        return ExitCode::FAILURE;
    };

    let result = match Context::load(config_path.as_deref()) {
        Ok(ctx) => commands::run(action, &ctx).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
