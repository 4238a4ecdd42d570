//! # Packager
//!
//! Build automation for Python distributions. A run cleans previous build output,
//! makes sure the `build` and `twine` packages are available, builds the package
//! and verifies the produced distribution files. Upload actions additionally
//! publish the files to the package index (or its test counterpart) once
//! the user confirms the upload.
//!
//! Every step shells out to an external tool. The first failed step halts the run,
//! and the process exits with a non-zero status code.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use std::env;

use clap::Parser;
use commands::Cli;
use common::logging;
use indicatif::ProgressBar;

use crate::{
    config::PackagerConfig, pipeline::Context, process::SystemRunner, prompt::StdinPrompt,
};

/// Distribution files discovery and reporting.
mod artifacts;

/// Build output cleanup.
mod cleaner;

/// CLI actions.
mod commands;

/// Runtime configuration.
mod config;

/// Ordered build steps.
mod pipeline;

/// External tool invocation.
mod process;

/// Interactive input.
mod prompt;

/// Test doubles for external tools and user input.
#[cfg(test)]
mod testing;

/// CLI entrypoint.
fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let config = PackagerConfig::new()?;

    logging::init(&config.logging);

    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir()?,
    };

    let ctx = Context {
        config: &config,
        root,
        runner: &SystemRunner,
        prompt: &StdinPrompt,
        progress: ProgressBar::new_spinner(),
    };

    ctx.println("📦 Packager - build script");
    ctx.println("=".repeat(60));

    let result =
        commands::select_mode(&ctx, cli.action).and_then(|mode| commands::run(&ctx, mode));

    ctx.progress.finish_and_clear();

    Ok(result?)
}
