//! Path formatting strategy.
//!
//! Exactly two variants exist: the platform's native conventions, and
//! posix-emulated-on-native for shells like Git Bash (MinGW) on Windows,
//! where paths are written linux-style (`/c/Users/...`) and the PATH
//! list separator is `:` even though the operating system is Windows.
//! The variant is selected once by inspecting the environment, not per
//! call site.

use std::path::Path;

/// How paths and path lists are rendered for the current shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// The operating system's own conventions.
    Native,

    /// Posix conventions emulated on a non-posix host (Git Bash/MinGW).
    Posix,
}

impl PathStyle {
    /// Select the style for the current process by inspecting the
    /// environment. Called once at startup; everything downstream takes
    /// the selected style as a value.
    pub fn detect() -> Self {
        Self::from_path_value(&std::env::var("PATH").unwrap_or_default())
    }

    /// Select the style from a PATH-shaped string. MinGW mounts its own
    /// tree into PATH, which is the observable marker for the emulated
    /// shell.
    pub fn from_path_value(path_value: &str) -> Self {
        if cfg!(windows) && path_value.contains("/mingw") {
            PathStyle::Posix
        } else {
            PathStyle::Native
        }
    }

    /// The path component separator.
    pub fn separator(self) -> char {
        match self {
            PathStyle::Native => std::path::MAIN_SEPARATOR,
            PathStyle::Posix => '/',
        }
    }

    /// The separator between entries of a PATH-style list.
    pub fn list_separator(self) -> char {
        match self {
            PathStyle::Native => {
                if cfg!(windows) {
                    ';'
                } else {
                    ':'
                }
            }
            PathStyle::Posix => ':',
        }
    }

    /// The executable file-name suffix. Determined by the operating
    /// system, not the shell: Git Bash still runs `.exe` files.
    pub fn exe_suffix(self) -> &'static str {
        if cfg!(windows) {
            ".exe"
        } else {
            ""
        }
    }

    /// Join path elements with this style's separator, dropping empty
    /// elements and trailing separators.
    pub fn join(self, elems: &[&str]) -> String {
        let sep = self.separator();
        let mut joined = String::new();
        for elem in elems {
            let trimmed = elem.trim_end_matches(['/', '\\']);
            if trimmed.is_empty() {
                continue;
            }
            if !joined.is_empty() {
                joined.push(sep);
            }
            joined.push_str(trimmed);
        }
        joined
    }

    /// Render a path the way the active shell writes it. For `Posix` on
    /// Windows this strips the volume separator and converts to forward
    /// slashes (`C:\Users\x` becomes `/C/Users/x`).
    pub fn render(self, path: &Path) -> String {
        let raw = path.display().to_string();
        match self {
            PathStyle::Native => raw,
            PathStyle::Posix => {
                let converted = raw.replace('\\', "/").replace(':', "");
                if converted.starts_with('/') {
                    converted
                } else {
                    format!("/{converted}")
                }
            }
        }
    }
}
