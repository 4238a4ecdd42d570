use std::{
    fmt, io,
    path::Path,
    process::{Command, Stdio},
    time::Duration,
};

use derive_more::{Display, Error, From};
use itertools::Itertools;
use tracing::debug;

use crate::pipeline::Context;

/// A single external program call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    /// Program name, resolved using `PATH`.
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl Invocation {
    /// Create new invocation of `program` without any arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append arguments to this invocation.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;

        for arg in &self.args {
            write!(f, " {arg}")?;
        }

        Ok(())
    }
}

/// Outcome of a finished external program.
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedOutput {
    /// Whether the program exited with a zero status code.
    pub success: bool,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,
}

impl CapturedOutput {
    /// Text that explains the program failure.
    ///
    /// Some tools report problems on stdout only, so it is used when stderr is empty.
    pub fn error_text(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// External process errors.
#[derive(Debug, Display, From, Error)]
pub(crate) enum ProcessError {
    /// IO-related error.
    Io(#[error(not(source))] io::Error),

    /// [`which`] crate was unable to determine location of the program.
    #[display(fmt = "unable to locate {}: {}", program, error)]
    #[from(ignore)]
    Locate {
        /// Program name.
        program: String,

        /// Lookup error.
        error: which::Error,
    },

    /// Program exited with a non-zero status code.
    #[display(fmt = "{} failed", description)]
    #[from(ignore)]
    Failed {
        /// Human-readable description of the failed action.
        description: String,
    },
}

/// Executor of external programs.
pub(crate) trait CommandRunner {
    /// Run `invocation` inside of the `root` directory until completion.
    fn run(&self, root: &Path, invocation: &Invocation) -> Result<CapturedOutput, ProcessError>;
}

/// [`CommandRunner`] that spawns real processes.
pub(crate) struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, root: &Path, invocation: &Invocation) -> Result<CapturedOutput, ProcessError> {
        let program =
            which::which(&invocation.program).map_err(|error| ProcessError::Locate {
                program: invocation.program.clone(),
                error,
            })?;

        debug!(program = %program.display(), root = %root.display(), "spawning {invocation}");

        let output = Command::new(program)
            .current_dir(root)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        debug!(status = %output.status, "{} exited", invocation.program);

        Ok(CapturedOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run an external program, reporting its progress and captured output.
///
/// Non-zero exit status is converted into [`ProcessError::Failed`] after
/// the captured error text is printed.
pub(crate) fn run_command(
    ctx: &Context,
    invocation: &Invocation,
    description: &str,
) -> Result<CapturedOutput, ProcessError> {
    ctx.progress.enable_steady_tick(Duration::from_millis(150));
    ctx.progress.set_message(format!("{description}..."));

    let output = ctx.runner.run(&ctx.root, invocation)?;

    ctx.progress.set_message("");

    if output.success {
        ctx.println(format!("✅ {description} completed successfully"));

        if !output.stdout.is_empty() {
            ctx.println(output.stdout.trim_end());
        }

        Ok(output)
    } else {
        ctx.println(format!("❌ {description} failed:"));
        ctx.println(output.error_text().trim_end());

        Err(ProcessError::Failed {
            description: description.to_owned(),
        })
    }
}

/// Ensure that all `packages` are importable, installing the missing ones with `pip`.
///
/// Already installed packages are never reinstalled.
pub(crate) fn ensure_packages_installed(
    ctx: &Context,
    packages: &[String],
) -> Result<(), ProcessError> {
    ctx.println("📋 Checking build requirements...");

    let mut missing = Vec::new();

    for package in packages {
        let probe =
            Invocation::new(&ctx.config.python).args(["-c", &format!("import {package}")]);

        if ctx.runner.run(&ctx.root, &probe)?.success {
            ctx.println(format!("   ✅ {package} is installed"));
        } else {
            ctx.println(format!("   ❌ {package} is missing"));
            missing.push(package.as_str());
        }
    }

    if missing.is_empty() {
        return Ok(());
    }

    ctx.println(format!(
        "📦 Installing missing packages: {}",
        missing.iter().join(", ")
    ));

    let install = Invocation::new(&ctx.config.python)
        .args(["-m", "pip", "install"])
        .args(missing);

    run_command(ctx, &install, "Installing build dependencies")?;

    Ok(())
}
