use std::{
    cell::RefCell,
    collections::VecDeque,
    fs, io,
    path::Path,
};

use indicatif::ProgressBar;
use tempfile::TempDir;

use crate::{
    config::PackagerConfig,
    pipeline::Context,
    process::{CapturedOutput, CommandRunner, Invocation, ProcessError},
    prompt::Prompt,
};

/// Files the fake build tool writes into `dist`.
pub(crate) const BUILT_ARTIFACTS: [&str; 2] = [
    "dist/sample-0.1.0-py3-none-any.whl",
    "dist/sample-0.1.0.tar.gz",
];

/// [`CommandRunner`] that records invocations instead of spawning processes.
#[derive(Default)]
pub(crate) struct FakeRunner {
    /// Received invocations, rendered as command lines.
    calls: RefCell<Vec<String>>,

    /// Substrings of command lines that exit with a failure.
    failing: Vec<String>,

    /// Whether the fake build tool leaves `dist` empty.
    skip_artifacts: bool,
}

impl FakeRunner {
    /// Invocations received so far, rendered as command lines.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, root: &Path, invocation: &Invocation) -> Result<CapturedOutput, ProcessError> {
        let line = invocation.to_string();
        self.calls.borrow_mut().push(line.clone());

        if self.failing.iter().any(|pattern| line.contains(pattern)) {
            return Ok(CapturedOutput {
                success: false,
                stdout: String::new(),
                stderr: format!("error: {line} exited with status 1"),
            });
        }

        if invocation.args == ["-m", "build"] && !self.skip_artifacts {
            for artifact in BUILT_ARTIFACTS {
                write_file(&root.join(artifact))?;
            }
        }

        Ok(CapturedOutput {
            success: true,
            stdout: format!("{line}: ok\n"),
            stderr: String::new(),
        })
    }
}

/// [`Prompt`] that replays predefined answers.
///
/// Once the answers are exhausted, an empty line is returned, as with closed stdin.
#[derive(Default)]
pub(crate) struct ScriptedPrompt {
    /// Answers left to replay.
    answers: RefCell<VecDeque<String>>,

    /// Questions asked so far.
    questions: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    /// Create a prompt replaying `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            questions: RefCell::default(),
        }
    }

    /// Questions asked so far.
    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str) -> io::Result<String> {
        self.questions.borrow_mut().push(question.to_owned());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or_default())
    }
}

/// Temporary project directory together with test doubles.
pub(crate) struct TestEnv {
    /// Project root, removed on drop.
    dir: TempDir,

    /// Configuration passed to the context.
    pub config: PackagerConfig,

    /// Recording external program executor.
    pub runner: FakeRunner,

    /// Scripted interactive input.
    pub prompt: ScriptedPrompt,
}

impl TestEnv {
    /// Create an empty project with default configuration and passing tools.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("unable to create temporary directory"),
            config: PackagerConfig::default(),
            runner: FakeRunner::default(),
            prompt: ScriptedPrompt::default(),
        }
    }

    /// Make every invocation containing `pattern` exit with a failure.
    pub fn failing(mut self, pattern: &str) -> Self {
        self.runner.failing.push(pattern.to_owned());
        self
    }

    /// Make the fake build tool produce no distribution files.
    pub fn without_artifacts(mut self) -> Self {
        self.runner.skip_artifacts = true;
        self
    }

    /// Replace interactive answers.
    pub fn answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt = ScriptedPrompt::new(answers);
        self
    }

    /// Project root location.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Pipeline context bound to this environment, with a hidden spinner.
    pub fn context(&self) -> Context<'_> {
        Context {
            config: &self.config,
            root: self.dir.path().to_path_buf(),
            runner: &self.runner,
            prompt: &self.prompt,
            progress: ProgressBar::hidden(),
        }
    }

    /// Create a directory, relative to the project root.
    pub fn create_dir(&self, path: &str) {
        fs::create_dir_all(self.root().join(path)).expect("unable to create directory");
    }

    /// Create a file with its own path as contents, relative to the project root.
    pub fn create_file(&self, path: &str) {
        write_file(&self.root().join(path)).expect("unable to create file");
    }
}

/// Write `path` as its own contents, creating parent directories.
fn write_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, path.to_string_lossy().as_bytes())
}
