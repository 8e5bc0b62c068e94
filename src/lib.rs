//! Toolshed - build-automation helpers.
//!
//! Toolshed is a library for build scripts and CI bootstrap binaries: it
//! detects which continuous-integration provider the process runs under,
//! installs command-line tools into a well-known binary directory,
//! downloads prebuilt executables, and wraps external process execution
//! with configurable output verbosity.
//!
//! # Modules
//!
//! - [`ci`] - CI build provider detection and environment publication
//! - [`download`] - Prebuilt executable downloads into the bin directory
//! - [`error`] - Error types and result aliases
//! - [`exec`] - External process execution
//! - [`install`] - Version-gated tool installation
//! - [`search`] - Explicit search-path context and path-style strategy
//!
//! # Example
//!
//! ```no_run
//! use toolshed::install::EnsureOptions;
//! use toolshed::SearchContext;
//!
//! let mut ctx = SearchContext::from_env();
//! let opts = EnsureOptions {
//!     default_version: "4.4.1".to_string(),
//!     version_args: vec!["--version".to_string()],
//!     ..EnsureOptions::new("github.com/mikefarah/yq/v4")
//! };
//! toolshed::install::ensure(&mut ctx, &opts).expect("could not install yq");
//! ```

pub mod ci;
pub mod download;
pub mod error;
pub mod exec;
pub mod install;
pub mod search;

pub use error::{Result, ToolshedError};
pub use exec::{PreparedCommand, Verbosity};
pub use search::{PathStyle, SearchContext};
