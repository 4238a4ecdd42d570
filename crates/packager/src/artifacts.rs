use std::{fs, io, path::PathBuf};

use byte_unit::Byte;
use common::hash;
use derive_more::{Display, Error, From};
use tracing::warn;
use walkdir::WalkDir;

use crate::pipeline::Context;

/// Distribution file lookup errors.
#[derive(Debug, Display, From, Error)]
pub(crate) enum ArtifactsError {
    /// [`walkdir`]-crate specific error.
    WalkDir(#[error(not(source))] walkdir::Error),

    /// IO error.
    Io(#[error(not(source))] io::Error),

    /// Build tool produced no distribution files.
    #[display(fmt = "no distribution files found in {}", dir)]
    #[from(ignore)]
    Empty {
        /// Distribution directory, relative to the project root.
        dir: String,
    },
}

/// A distribution file produced by the build tool.
#[derive(Debug)]
pub(crate) struct Artifact {
    /// Path relative to the project root, as passed to external tools.
    pub relative_path: String,

    /// Absolute file location.
    pub path: PathBuf,
}

/// Collect regular files located directly inside of the distribution directory.
///
/// Files are sorted by their names, which mirrors the shell `dist/*` expansion.
pub(crate) fn collect_artifacts(ctx: &Context) -> Result<Vec<Artifact>, ArtifactsError> {
    let dist_dir = ctx.root.join(&ctx.config.dist_dir);

    let empty = || ArtifactsError::Empty {
        dir: ctx.config.dist_dir.display().to_string(),
    };

    if !dist_dir.is_dir() {
        return Err(empty());
    }

    let mut artifacts = Vec::new();

    let entries = WalkDir::new(&dist_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in entries {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative_path = ctx.config.dist_dir.join(entry.file_name());

        let Some(relative_path) = relative_path.to_str() else {
            warn!(path = %entry.path().display(), "skipping artifact with non-unicode path");
            continue;
        };

        artifacts.push(Artifact {
            relative_path: relative_path.to_owned(),
            path: entry.into_path(),
        });
    }

    if artifacts.is_empty() {
        return Err(empty());
    }

    Ok(artifacts)
}

/// Print size and BLAKE2b-256 digest of every artifact.
pub(crate) fn report_artifacts(
    ctx: &Context,
    artifacts: &[Artifact],
) -> Result<(), ArtifactsError> {
    ctx.println("📦 Distribution files:");

    for artifact in artifacts {
        let contents = fs::read(&artifact.path)?;
        let size = Byte::from_bytes((contents.len() as u64).into()).get_appropriate_unit(true);

        ctx.println(format!(
            "   {} ({size}, blake2b-256 {})",
            artifact.relative_path,
            hash::blake2_hex(&contents)
        ));
    }

    Ok(())
}
