//! Version-gated tool installation.
//!
//! The core flow is [`ensure`]: determine whether a command-line tool is
//! already reachable through the [`crate::SearchContext`] at an
//! acceptable version, and if not, install it into the context's bin
//! directory and re-verify.
//!
//! # Modules
//!
//! - [`spec`] - Tool identifiers and command-name derivation
//! - [`constraint`] - Version-constraint derivation and version scraping
//! - [`check`] - Availability checks against a search context
//! - [`ensure`] - Orchestration: check, install, re-verify

pub mod check;
pub mod constraint;
pub mod ensure;
pub mod spec;

pub use check::is_available;
pub use constraint::{derive_constraint, extract_version, parse_constraint, parse_version_lenient};
pub use ensure::{ensure, ensure_bin_dir, install, EnsureOptions, InstallOptions};
pub use spec::{command_name, ToolSpec};

/// Version sentinel meaning "no pin, take the newest".
pub const LATEST: &str = "latest";
