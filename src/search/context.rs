//! Caller-owned search path.
//!
//! A [`SearchContext`] is an ordered list of directories used to resolve
//! bare command names, plus the directory installed tools should land
//! in. It is seeded from the real environment exactly once
//! ([`SearchContext::from_env`]) and mutated as an ordinary value;
//! nothing in this crate reaches for the `PATH` environment variable
//! behind the caller's back. Callers that need the process environment
//! to reflect the context (for child processes resolved by the OS) call
//! [`SearchContext::export`].

use crate::search::style::PathStyle;
use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not
/// permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// An explicit, ordered search path with a designated bin directory.
#[derive(Debug, Clone)]
pub struct SearchContext {
    dirs: Vec<PathBuf>,
    bin_dir: PathBuf,
    style: PathStyle,
}

impl SearchContext {
    /// Seed a context from the process environment: the `PATH` variable
    /// for the directory list, `GOBIN` (falling back to `GOPATH/bin`,
    /// then `~/go/bin`) for the bin directory, and the detected
    /// [`PathStyle`].
    pub fn from_env() -> Self {
        let dirs = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();
        Self {
            dirs,
            bin_dir: default_bin_dir(),
            style: PathStyle::detect(),
        }
    }

    /// Build a context from explicit parts.
    pub fn new(dirs: Vec<PathBuf>, bin_dir: impl Into<PathBuf>, style: PathStyle) -> Self {
        Self {
            dirs,
            bin_dir: bin_dir.into(),
            style,
        }
    }

    /// Override the bin directory.
    pub fn with_bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = dir.into();
        self
    }

    /// The ordered search directories.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// The directory installed tools land in.
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// The active path style.
    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Resolve a bare command name to the first matching executable.
    ///
    /// Does NOT shell out to `which`: its behavior varies across
    /// systems and it is sometimes a shell builtin with inconsistent
    /// error handling.
    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        let suffix = self.style.exe_suffix();
        for dir in &self.dirs {
            let candidate = dir.join(command);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
            if !suffix.is_empty() {
                let candidate = dir.join(format!("{command}{suffix}"));
                if candidate.is_file() && is_executable(&candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Whether a directory is already on the search path. The
    /// comparison ignores trailing separators.
    pub fn contains(&self, dir: &Path) -> bool {
        let target = normalize(dir);
        self.dirs.iter().any(|d| normalize(d) == target)
    }

    /// Put a directory at the front of the search path, removing any
    /// existing occurrence so the new position wins.
    pub fn prepend(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        let target = normalize(&dir);
        self.dirs.retain(|d| normalize(d) != target);
        self.dirs.insert(0, dir);
    }

    /// Prepend `dir` only if it is not already on the search path.
    /// Returns whether the path changed.
    pub fn ensure_on_path(&mut self, dir: &Path) -> bool {
        if self.contains(dir) {
            return false;
        }
        self.prepend(dir.to_path_buf());
        tracing::info!("added {} to the search path", self.style.render(dir));
        true
    }

    /// The search path as a single PATH-style value, joined with the
    /// style's list separator.
    pub fn path_value(&self) -> String {
        let sep = self.style.list_separator();
        let mut value = String::new();
        for dir in &self.dirs {
            if !value.is_empty() {
                value.push(sep);
            }
            value.push_str(&self.style.render(dir));
        }
        value
    }

    /// Write the context back to the process `PATH` so child processes
    /// resolved by the OS see the same search path. This is the single
    /// process-boundary adapter; no other code mutates `PATH`.
    pub fn export(&self) {
        std::env::set_var("PATH", self.path_value());
    }
}

/// The standard tool-binary directory: `GOBIN`, else `GOPATH/bin`, else
/// `~/go/bin`.
fn default_bin_dir() -> PathBuf {
    if let Some(gobin) = std::env::var_os("GOBIN").filter(|v| !v.is_empty()) {
        return PathBuf::from(gobin);
    }
    if let Some(gopath) = std::env::var_os("GOPATH").filter(|v| !v.is_empty()) {
        return PathBuf::from(gopath).join("bin");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/"))
        .join("go")
        .join("bin")
}

fn normalize(path: &Path) -> PathBuf {
    PathBuf::from(
        path.to_string_lossy()
            .trim_end_matches(['/', '\\'])
            .to_string(),
    )
}
