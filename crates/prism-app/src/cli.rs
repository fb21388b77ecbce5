use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

/// prism: derive a color palette from an image and theme your desktop with it.
#[derive(Parser, Debug)]
#[command(name = "prism", version, about, arg_required_else_help = true)]
pub struct Args {
    /// Image to derive a new palette from.
    pub image: Option<PathBuf>,

    /// Name to save the generated palette under (default: image file stem).
    #[arg(long)]
    pub name: Option<String>,

    /// Derive and print the palette without backing up or rendering.
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List saved palettes.
    List,
    /// Print a saved palette.
    Show { name: String },
    /// Apply a saved palette.
    Apply {
        name: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete a saved palette.
    Delete { name: String },
    /// Snapshot the tracked config files without changing anything.
    Backup,
    /// List snapshots, newest first.
    Backups,
    /// Restore a snapshot; prompts for one when no id is given.
    Restore {
        id: Option<String>,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// What a parsed command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Generate {
        image: PathBuf,
        name: Option<String>,
        dry_run: bool,
    },
    Run(Command),
}

impl Args {
    pub fn action(self) -> Option<Action> {
        match (self.command, self.image) {
            (Some(command), _) => Some(Action::Run(command)),
            (None, Some(image)) => Some(Action::Generate {
                image,
                name: self.name,
                dry_run: self.dry_run,
            }),
            (None, None) => None,
        }
    }
}

impl Args {
    /// Generate options only make sense without a subcommand.
    fn reject_mixed(self) -> Result<Self, clap::Error> {
        if self.command.is_none() {
            return Ok(self);
        }
        let stray = if self.image.is_some() {
            Some("<IMAGE>")
        } else if self.name.is_some() {
            Some("--name")
        } else if self.dry_run {
            Some("--dry-run")
        } else {
            None
        };
        match stray {
            Some(arg) => Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                format!("{arg} cannot be used with a subcommand"),
            )),
            None => Ok(self),
        }
    }
}

pub fn parse() -> Args {
    Args::parse().reject_mixed().unwrap_or_else(|err| err.exit())
}

pub fn try_parse_from<I, T>(argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(argv)?.reject_mixed()
}
