use std::io;

use derive_more::{Display, Error, From};
use tracing::debug;

use crate::{
    artifacts::Artifact,
    commands::{build, BuildError},
    pipeline::Context,
    process::{run_command, Invocation, ProcessError},
};

/// Package index that receives the built distribution files.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Index {
    /// Test counterpart of the package index.
    #[display(fmt = "Test PyPI")]
    Test,

    /// Production package index.
    #[display(fmt = "PyPI")]
    Production,
}

impl Index {
    /// Confirmation question asked before the upload.
    fn question(self) -> &'static str {
        match self {
            Index::Test => "⚠️  This will upload to Test PyPI. Continue? (y/N): ",
            Index::Production => {
                "⚠️  This will upload to PyPI. This action cannot be undone! Continue? (y/N): "
            }
        }
    }

    /// Upload tool invocation for the provided `artifacts`.
    fn invocation(self, ctx: &Context, artifacts: &[Artifact]) -> Invocation {
        let mut invocation = Invocation::new(&ctx.config.twine).args(["upload"]);

        if self == Index::Test {
            invocation = invocation.args(["--repository", &ctx.config.test_repository]);
        }

        invocation.args(artifacts.iter().map(|artifact| artifact.relative_path.clone()))
    }
}

/// Result of a finished upload flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UploadOutcome {
    /// Distribution files were uploaded.
    Uploaded,

    /// User declined the upload.
    Cancelled,
}

/// Upload actions errors.
#[derive(Debug, Display, From, Error)]
pub(crate) enum UploadError {
    /// Unable to read the confirmation answer.
    Io(#[error(not(source))] io::Error),

    /// Package build error.
    Build(#[error(not(source))] BuildError),

    /// Upload tool error.
    Process(#[error(not(source))] ProcessError),
}

/// Upload flow entrypoint.
///
/// The package is built and checked first. Declining the confirmation
/// is not considered an error.
pub(crate) fn upload(ctx: &Context, index: Index) -> Result<UploadOutcome, UploadError> {
    let artifacts = build(ctx)?;

    if !ctx.confirm(index.question())? {
        ctx.println("Upload cancelled.");
        return Ok(UploadOutcome::Cancelled);
    }

    debug!(%index, count = artifacts.len(), "uploading distribution files");

    run_command(
        ctx,
        &index.invocation(ctx, &artifacts),
        &format!("Uploading to {index}"),
    )?;

    Ok(UploadOutcome::Uploaded)
}
