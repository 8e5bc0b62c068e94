//! Error types for toolshed operations.
//!
//! This module defines [`ToolshedError`], the primary error type used
//! throughout the library, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - "Not installed" is never an error; availability checks report it as
//!   a boolean result.
//! - Malformed version or constraint syntax is deliberately fail-open and
//!   does not produce an error (see [`crate::install::is_available`]).
//! - Use `anyhow::Error` (via `ToolshedError::Other`) for unexpected errors.

use thiserror::Error;

/// Core error type for toolshed operations.
#[derive(Debug, Error)]
pub enum ToolshedError {
    /// The version probe could not run or exited non-zero.
    #[error("could not determine the installed version of {tool} with '{command}': {message}")]
    ProbeFailed {
        tool: String,
        command: String,
        message: String,
    },

    /// Probe output lacked a recognizable version token.
    #[error("version output of {tool} did not contain a recognizable version: {output}")]
    VersionUnrecognized { tool: String, output: String },

    /// The underlying install mechanism failed, or the tool is still
    /// absent after a successful install invocation.
    #[error("could not install {tool}: {message}")]
    InstallFailed { tool: String, message: String },

    /// A download did not complete.
    #[error("could not download {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// An external command failed.
    #[error("command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for toolshed operations.
pub type Result<T> = std::result::Result<T, ToolshedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_failed_displays_tool_and_command() {
        let err = ToolshedError::ProbeFailed {
            tool: "yq".into(),
            command: "yq --version".into(),
            message: "exit code 2".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("yq"));
        assert!(msg.contains("yq --version"));
        assert!(msg.contains("exit code 2"));
    }

    #[test]
    fn version_unrecognized_displays_output() {
        let err = ToolshedError::VersionUnrecognized {
            tool: "widget".into(),
            output: "no numbers here".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("widget"));
        assert!(msg.contains("no numbers here"));
    }

    #[test]
    fn install_failed_displays_tool_and_message() {
        let err = ToolshedError::InstallFailed {
            tool: "packr2".into(),
            message: "install it manually".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("packr2"));
        assert!(msg.contains("install it manually"));
    }

    #[test]
    fn download_failed_displays_url() {
        let err = ToolshedError::DownloadFailed {
            url: "https://example.com/kubectl".into(),
            message: "HTTP 404 Not Found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/kubectl"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = ToolshedError::CommandFailed {
            command: "go install example.com/tool@latest".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("go install"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ToolshedError = io_err.into();
        assert!(matches!(err, ToolshedError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ToolshedError::VersionUnrecognized {
                tool: "test".into(),
                output: "".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
