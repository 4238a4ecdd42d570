use std::path::PathBuf;

use common::config::Logging;
use figment::{providers::Env, Figment};
use serde::Deserialize;

/// Packaging pipeline configuration.
#[derive(Deserialize)]
pub struct PackagerConfig {
    /// Python interpreter used to probe, install and build packages.
    #[serde(default = "default_python")]
    pub python: String,

    /// Package verification and upload tool.
    #[serde(default = "default_twine")]
    pub twine: String,

    /// Packages that must be importable before the build starts.
    #[serde(default = "default_required_packages")]
    pub required_packages: Vec<String>,

    /// Glob patterns of previous build output, relative to the project root.
    #[serde(default = "default_artifact_patterns")]
    pub artifact_patterns: Vec<String>,

    /// Directory where the build tool places distribution files.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Repository name used for test index uploads.
    #[serde(default = "default_test_repository")]
    pub test_repository: String,

    /// Logging configuration.
    #[serde(default)]
    pub logging: Logging,
}

/// Interpreter available on most Unix hosts.
fn default_python() -> String {
    String::from("python3")
}

/// Upload tool invoked by its command name.
fn default_twine() -> String {
    String::from("twine")
}

/// Build frontend and verification tool packages.
fn default_required_packages() -> Vec<String> {
    vec![String::from("build"), String::from("twine")]
}

/// Output of `build`, `dist` and setuptools metadata directories.
fn default_artifact_patterns() -> Vec<String> {
    vec![
        String::from("build"),
        String::from("dist"),
        String::from("*.egg-info"),
    ]
}

/// Output directory of `python -m build`.
fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// Repository name `twine` uses for Test PyPI.
fn default_test_repository() -> String {
    String::from("testpypi")
}

impl PackagerConfig {
    /// Create new config from environment variables, falling back to defaults.
    ///
    /// Variables are prefixed with `PACKAGER_`, nested keys are separated with `__`
    /// (for example, `PACKAGER_LOGGING__LEVEL=debug`).
    /// See [`Env`] for more details on how to use environment variables configuration.
    ///
    /// [`Env`]: figment::providers::Env
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::prefixed("PACKAGER_").split("__"))
            .extract()
    }
}

#[cfg(test)]
impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            twine: default_twine(),
            required_packages: default_required_packages(),
            artifact_patterns: default_artifact_patterns(),
            dist_dir: default_dist_dir(),
            test_repository: default_test_repository(),
            logging: Logging::default(),
        }
    }
}
