use std::path::PathBuf;

use derive_more::{Display, Error, From};
use indicatif::ProgressBar;
use tracing::debug;

use crate::{
    artifacts::{collect_artifacts, ArtifactsError},
    cleaner::{clean_artifacts, CleanError},
    config::PackagerConfig,
    process::{ensure_packages_installed, run_command, CommandRunner, Invocation, ProcessError},
    prompt::Prompt,
};

/// Steps executed before any mode-specific action, in order.
pub(crate) const CORE_STEPS: [Step; 4] = [
    Step::CleanArtifacts,
    Step::CheckRequirements,
    Step::BuildPackage,
    Step::CheckPackage,
];

/// Everything a pipeline run needs to reach the outside world.
pub(crate) struct Context<'a> {
    /// Runtime configuration.
    pub config: &'a PackagerConfig,

    /// Project root, where artifacts are cleaned and tools are run.
    pub root: PathBuf,

    /// External program executor.
    pub runner: &'a dyn CommandRunner,

    /// Interactive input source.
    pub prompt: &'a dyn Prompt,

    /// Spinner displayed while external tools are running.
    pub progress: ProgressBar,
}

impl Context<'_> {
    /// Print a console line without tearing the spinner.
    pub fn println(&self, line: impl AsRef<str>) {
        self.progress.suspend(|| println!("{}", line.as_ref()));
    }

    /// Ask a question with the spinner hidden.
    pub fn ask(&self, question: &str) -> std::io::Result<String> {
        self.progress.suspend(|| self.prompt.ask(question))
    }

    /// Ask a yes/no question with the spinner hidden.
    pub fn confirm(&self, question: &str) -> std::io::Result<bool> {
        self.progress
            .suspend(|| crate::prompt::confirm(self.prompt, question))
    }
}

/// Single unit of work with a pass/fail outcome.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Remove previous build output.
    #[display(fmt = "Clean build artifacts")]
    CleanArtifacts,

    /// Make sure the build and verification tools are installed.
    #[display(fmt = "Check requirements")]
    CheckRequirements,

    /// Produce distribution files.
    #[display(fmt = "Build package")]
    BuildPackage,

    /// Verify produced distribution files.
    #[display(fmt = "Check package")]
    CheckPackage,
}

/// Errors produced by a single step.
#[derive(Debug, Display, From, Error)]
pub(crate) enum StepError {
    /// Artifact cleanup error.
    Clean(#[error(not(source))] CleanError),

    /// External program error.
    Process(#[error(not(source))] ProcessError),

    /// Distribution files lookup error.
    Artifacts(#[error(not(source))] ArtifactsError),
}

/// Pipeline run halted at a failed step.
#[derive(Debug, Display, Error)]
#[display(fmt = "build failed at step: {}", step)]
pub(crate) struct PipelineError {
    /// Step that halted the pipeline.
    pub step: Step,

    /// Underlying step failure.
    pub source: StepError,
}

impl Step {
    /// Execute the step action.
    pub fn execute(self, ctx: &Context) -> Result<(), StepError> {
        match self {
            Step::CleanArtifacts => {
                clean_artifacts(ctx, &ctx.config.artifact_patterns)?;
            }
            Step::CheckRequirements => {
                ensure_packages_installed(ctx, &ctx.config.required_packages)?;
            }
            Step::BuildPackage => {
                let build = Invocation::new(&ctx.config.python).args(["-m", "build"]);
                run_command(ctx, &build, "Building package")?;
            }
            Step::CheckPackage => {
                let artifacts = collect_artifacts(ctx)?;
                let check = Invocation::new(&ctx.config.twine)
                    .args(["check"])
                    .args(artifacts.iter().map(|artifact| artifact.relative_path.clone()));
                run_command(ctx, &check, "Checking package")?;
            }
        }

        Ok(())
    }
}

/// Execute `steps` in order, halting on the first failure.
pub(crate) fn run_steps(ctx: &Context, steps: &[Step]) -> Result<(), PipelineError> {
    for &step in steps {
        debug!(%step, "starting step");

        if let Err(source) = step.execute(ctx) {
            debug!(%step, error = %source, "step failed");
            return Err(PipelineError { step, source });
        }
    }

    Ok(())
}
