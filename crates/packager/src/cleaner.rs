use std::{
    fs, io,
    path::{Path, PathBuf},
};

use derive_more::{Display, Error, From};
use glob::{Pattern, PatternError};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::pipeline::Context;

/// Errors that may occur during the artifact cleanup.
#[derive(Debug, Display, From, Error)]
pub(crate) enum CleanError {
    /// Invalid artifact glob pattern.
    #[display(fmt = "invalid artifact pattern: {}", _0)]
    Pattern(#[error(not(source))] PatternError),

    /// [`walkdir`]-crate specific error.
    WalkDir(#[error(not(source))] walkdir::Error),

    /// IO error.
    Io(#[error(not(source))] io::Error),
}

/// Remove entries of the project root that match any of the `patterns`.
///
/// Directories are removed recursively, files and symbolic links are unlinked.
/// Entries that are already gone are skipped, which makes the cleanup idempotent.
///
/// Returns removed paths relative to the project root.
pub(crate) fn clean_artifacts(
    ctx: &Context,
    patterns: &[String],
) -> Result<Vec<PathBuf>, CleanError> {
    ctx.println("🧹 Cleaning previous build artifacts...");

    let patterns = patterns
        .iter()
        .map(|pattern| Pattern::new(pattern))
        .collect::<Result<Vec<_>, _>>()?;

    let mut removed = Vec::new();

    for entry in root_entries(&ctx.root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) if is_not_found(&error) => continue,
            Err(error) => return Err(error.into()),
        };

        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "skipping path with non-unicode symbols");
            continue;
        };

        if !patterns.iter().any(|pattern| pattern.matches(name)) {
            continue;
        }

        let relative = PathBuf::from(name);

        if entry.file_type().is_dir() {
            if ignore_not_found(fs::remove_dir_all(entry.path()))? {
                ctx.println(format!("   Removed directory: {}", relative.display()));
                removed.push(relative);
            }
        } else if ignore_not_found(fs::remove_file(entry.path()))? {
            ctx.println(format!("   Removed file: {}", relative.display()));
            removed.push(relative);
        }
    }

    debug!(count = removed.len(), "artifact cleanup finished");

    Ok(removed)
}

/// Iterate over direct children of the `root` directory, without following symbolic links.
fn root_entries(root: &Path) -> impl Iterator<Item = Result<DirEntry, walkdir::Error>> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
}

/// Convert [`io::ErrorKind::NotFound`] into `Ok(false)`.
fn ignore_not_found(result: io::Result<()>) -> io::Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}

/// Check whether directory traversal failed because of a vanished entry.
fn is_not_found(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .map(|error| error.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}
