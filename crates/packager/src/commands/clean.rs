use crate::{
    cleaner::{clean_artifacts, CleanError},
    pipeline::Context,
};

/// Clean flow entrypoint.
///
/// Only removes previous build output, no external tools are invoked.
pub(crate) fn clean(ctx: &Context) -> Result<(), CleanError> {
    clean_artifacts(ctx, &ctx.config.artifact_patterns)?;

    ctx.println("✅ Clean completed!");

    Ok(())
}
