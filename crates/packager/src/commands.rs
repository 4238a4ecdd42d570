/// `build` action.
mod build;

/// `clean` action.
mod clean;

/// `test-upload` and `upload` actions.
mod upload;

pub(crate) use build::{build, BuildError};
pub(crate) use clean::clean;
pub(crate) use upload::{upload, Index, UploadError};

use std::{io, path::PathBuf, str::FromStr};

use clap::Parser;
use derive_more::{Display, Error, From};

use crate::{cleaner::CleanError, pipeline::Context};

/// Available actions together with their descriptions, as shown by the interactive menu.
const ACTIONS: [(&str, &str); 4] = [
    ("build", "Clean, build, and check package"),
    ("test-upload", "Upload to Test PyPI"),
    ("upload", "Upload to PyPI"),
    ("clean", "Clean build artifacts only"),
];

/// CLI configuration.
#[derive(Parser)]
#[command(about, version)]
pub(crate) struct Cli {
    /// Action to perform: build, test-upload, upload or clean.
    ///
    /// Asked interactively when omitted.
    pub action: Option<String>,

    /// Project root containing the package sources.
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

/// Top-level action selected for this run.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Remove build artifacts only.
    #[display(fmt = "clean")]
    Clean,

    /// Clean, build and check the package.
    #[display(fmt = "build")]
    Build,

    /// Build, then upload to the test package index.
    #[display(fmt = "test-upload")]
    TestUpload,

    /// Build, then upload to the package index.
    #[display(fmt = "upload")]
    Upload,
}

/// Action name is not one of the supported ones.
#[derive(Debug, Display, Error)]
#[display(fmt = "unknown action: {}", action)]
pub(crate) struct UnknownModeError {
    /// Action name as passed by the user.
    pub action: String,
}

impl FromStr for Mode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clean" => Ok(Mode::Clean),
            "build" => Ok(Mode::Build),
            "test-upload" => Ok(Mode::TestUpload),
            "upload" => Ok(Mode::Upload),
            _ => Err(UnknownModeError {
                action: s.to_owned(),
            }),
        }
    }
}

/// Errors of any action.
#[derive(Debug, Display, From, Error)]
pub(crate) enum CommandError {
    /// Unable to read the interactive answer.
    Io(#[error(not(source))] io::Error),

    /// Unsupported action name.
    UnknownMode(#[error(not(source))] UnknownModeError),

    /// `clean` action error.
    Clean(#[error(not(source))] CleanError),

    /// `build` action error.
    Build(#[error(not(source))] BuildError),

    /// Upload action error.
    Upload(#[error(not(source))] UploadError),
}

/// Resolve the action name, asking for it when it wasn't passed as an argument.
///
/// Empty answer selects the `build` action.
pub(crate) fn select_mode(ctx: &Context, action: Option<String>) -> Result<Mode, CommandError> {
    let action = match action {
        Some(action) => action,
        None => {
            ctx.println("Available actions:");

            for (name, description) in ACTIONS {
                ctx.println(format!("  {name:<12}- {description}"));
            }

            let answer = ctx.ask("Enter action (or press Enter for 'build'): ")?;

            if answer.trim().is_empty() {
                Mode::Build.to_string()
            } else {
                answer
            }
        }
    };

    Ok(action.parse::<Mode>()?)
}

/// Execute the selected action.
pub(crate) fn run(ctx: &Context, mode: Mode) -> Result<(), CommandError> {
    match mode {
        Mode::Clean => {
            clean(ctx)?;
            return Ok(());
        }
        Mode::Build => {
            build(ctx)?;
        }
        Mode::TestUpload => {
            upload(ctx, Index::Test)?;
        }
        Mode::Upload => {
            upload(ctx, Index::Production)?;
        }
    }

    ctx.println("🎉 Build process completed!");

    Ok(())
}
