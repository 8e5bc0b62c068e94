//! CI build provider detection and environment publication.
//!
//! Changes published through a [`BuildProvider`] become visible to
//! *subsequent* steps of the CI pipeline; the current process must still
//! update its own [`crate::SearchContext`] (and
//! [`crate::SearchContext::export`] it) to see them immediately.

pub mod azure;
pub mod github;

pub use azure::AzurePipelines;
pub use github::GitHubActions;

use crate::error::Result;
use std::path::Path;

/// A CI build provider that can publish environment changes to later
/// pipeline steps.
pub trait BuildProvider {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Export an environment variable to subsequent pipeline steps.
    fn set_env(&self, name: &str, value: &str) -> Result<()>;

    /// Add a directory to the front of the PATH seen by subsequent
    /// pipeline steps.
    fn prepend_path(&self, dir: &Path) -> Result<()>;
}

/// A build provider that publishes nothing. Used outside CI.
pub struct NoopProvider;

impl BuildProvider for NoopProvider {
    fn name(&self) -> &'static str {
        "none"
    }

    fn set_env(&self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn prepend_path(&self, _dir: &Path) -> Result<()> {
        Ok(())
    }
}

/// Determine the build provider the process is running under, if any.
pub fn detect() -> Option<Box<dyn BuildProvider>> {
    if let Some(provider) = GitHubActions::detect() {
        return Some(Box::new(provider));
    }
    if let Some(provider) = AzurePipelines::detect() {
        return Some(Box::new(provider));
    }
    None
}

/// Like [`detect`], falling back to [`NoopProvider`] when nothing is
/// detected.
pub fn current() -> Box<dyn BuildProvider> {
    detect().unwrap_or_else(|| Box::new(NoopProvider))
}

/// Interpret a detection environment variable the way CI systems set
/// them: `"true"` (any case) or `"1"`.
pub(crate) fn truthy(value: Option<String>) -> bool {
    match value {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => false,
    }
}
