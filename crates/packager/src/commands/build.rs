use derive_more::{Display, Error, From};

use crate::{
    artifacts::{collect_artifacts, report_artifacts, Artifact, ArtifactsError},
    pipeline::{run_steps, Context, PipelineError, CORE_STEPS},
};

/// `build` action errors.
#[derive(Debug, Display, From, Error)]
pub(crate) enum BuildError {
    /// One of the core steps failed.
    Pipeline(#[error(not(source))] PipelineError),

    /// Unable to inspect produced distribution files.
    Artifacts(#[error(not(source))] ArtifactsError),
}

/// Build flow entrypoint.
///
/// Runs every core step and reports the produced distribution files,
/// which are returned for further processing.
pub(crate) fn build(ctx: &Context) -> Result<Vec<Artifact>, BuildError> {
    run_steps(ctx, &CORE_STEPS)?;

    ctx.println("✅ Package built successfully!");

    let artifacts = collect_artifacts(ctx)?;
    report_artifacts(ctx, &artifacts)?;

    Ok(artifacts)
}
