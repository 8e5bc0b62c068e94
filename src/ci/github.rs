//! GitHub Actions build provider.

use crate::ci::{truthy, BuildProvider};
use crate::error::Result;
use anyhow::{anyhow, Context};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable used to detect GitHub Actions.
pub const DETECT_ENV_VAR: &str = "GITHUB_ACTIONS";

/// Environment variable naming the file where variable assignments are
/// published.
pub const ENV_FILE_VAR: &str = "GITHUB_ENV";

/// Environment variable naming the file where PATH prepends are
/// published.
pub const PATH_FILE_VAR: &str = "GITHUB_PATH";

/// Publishes environment changes by appending lines to the workflow
/// command files GitHub Actions provides.
pub struct GitHubActions {
    env_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
}

impl GitHubActions {
    /// Detect GitHub Actions from the process environment, capturing the
    /// command file locations.
    pub fn detect() -> Option<Self> {
        if !truthy(std::env::var(DETECT_ENV_VAR).ok()) {
            return None;
        }
        Some(Self::with_files(
            std::env::var_os(ENV_FILE_VAR).map(PathBuf::from),
            std::env::var_os(PATH_FILE_VAR).map(PathBuf::from),
        ))
    }

    /// Build a provider against explicit command files.
    pub fn with_files(env_file: Option<PathBuf>, path_file: Option<PathBuf>) -> Self {
        Self { env_file, path_file }
    }

    fn append(file: &Option<PathBuf>, var_name: &str, line: &str) -> Result<()> {
        let path = file
            .as_deref()
            .ok_or_else(|| anyhow!("{var_name} is not set"))?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("could not open the file referenced by {var_name}"))?;
        writeln!(f, "{line}")
            .with_context(|| format!("could not write to the file referenced by {var_name}"))?;
        Ok(())
    }
}

impl BuildProvider for GitHubActions {
    fn name(&self) -> &'static str {
        "github-actions"
    }

    fn set_env(&self, name: &str, value: &str) -> Result<()> {
        Self::append(&self.env_file, ENV_FILE_VAR, &format!("{name}={value}"))
    }

    fn prepend_path(&self, dir: &Path) -> Result<()> {
        Self::append(&self.path_file, PATH_FILE_VAR, &dir.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn set_env_appends_assignment_lines() {
        let temp = TempDir::new().unwrap();
        let env_file = temp.path().join("env");
        let provider = GitHubActions::with_files(Some(env_file.clone()), None);

        provider.set_env("FOO", "bar").unwrap();
        provider.set_env("BAZ", "qux").unwrap();

        let contents = fs::read_to_string(env_file).unwrap();
        assert_eq!(contents, "FOO=bar\nBAZ=qux\n");
    }

    #[test]
    fn prepend_path_appends_directory_lines() {
        let temp = TempDir::new().unwrap();
        let path_file = temp.path().join("path");
        let provider = GitHubActions::with_files(None, Some(path_file.clone()));

        provider.prepend_path(Path::new("/opt/tools")).unwrap();

        let contents = fs::read_to_string(path_file).unwrap();
        assert_eq!(contents, "/opt/tools\n");
    }

    #[test]
    fn set_env_without_env_file_is_an_error() {
        let provider = GitHubActions::with_files(None, None);
        let err = provider.set_env("FOO", "bar").unwrap_err();
        assert!(err.to_string().contains(ENV_FILE_VAR));
    }

    #[test]
    fn files_are_created_when_missing() {
        let temp = TempDir::new().unwrap();
        let path_file = temp.path().join("does-not-exist-yet");
        let provider = GitHubActions::with_files(None, Some(path_file.clone()));

        provider.prepend_path(Path::new("/a")).unwrap();
        assert!(path_file.exists());
    }
}
