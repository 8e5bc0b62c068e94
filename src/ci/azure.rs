//! Azure DevOps Pipelines build provider.
//!
//! Azure publishes environment changes through logging commands: lines
//! written to stdout in the `##vso[...]` format are interpreted by the
//! agent and applied to subsequent steps.

use crate::ci::{truthy, BuildProvider};
use crate::error::Result;
use std::path::Path;

/// Environment variable used to detect Azure Pipelines.
pub const DETECT_ENV_VAR: &str = "TF_BUILD";

/// Publishes environment changes via `##vso` logging commands.
pub struct AzurePipelines;

impl AzurePipelines {
    /// Detect Azure Pipelines from the process environment.
    pub fn detect() -> Option<Self> {
        if truthy(std::env::var(DETECT_ENV_VAR).ok()) {
            Some(Self)
        } else {
            None
        }
    }

    /// The logging command for a variable assignment.
    pub fn set_env_command(name: &str, value: &str) -> String {
        format!("##vso[task.setvariable variable={name}]{value}")
    }

    /// The logging command for a PATH prepend.
    pub fn prepend_path_command(dir: &Path) -> String {
        format!("##vso[task.prependpath]{}", dir.display())
    }
}

impl BuildProvider for AzurePipelines {
    fn name(&self) -> &'static str {
        "azure-pipelines"
    }

    fn set_env(&self, name: &str, value: &str) -> Result<()> {
        println!("{}", Self::set_env_command(name, value));
        Ok(())
    }

    fn prepend_path(&self, dir: &Path) -> Result<()> {
        println!("{}", Self::prepend_path_command(dir));
        Ok(())
    }
}
