//! Ensure orchestration: check, install, re-verify.

use crate::ci;
use crate::error::{Result, ToolshedError};
use crate::exec::PreparedCommand;
use crate::install::check::is_available;
use crate::install::constraint::{derive_constraint, extract_version};
use crate::install::spec::ToolSpec;
use crate::install::LATEST;
use crate::search::SearchContext;
use std::fs;
use std::path::PathBuf;

/// Options for [`ensure`].
#[derive(Debug, Clone, Default)]
pub struct EnsureOptions {
    /// Slash-delimited tool identifier, e.g. `github.com/mikefarah/yq/v4`.
    pub identifier: String,

    /// Version to install when the tool is missing or unsatisfactory.
    /// Also the source of the derived constraint when `constraint` is
    /// empty. Empty means `latest`.
    pub default_version: String,

    /// Arguments that make the tool report its version (`--version`,
    /// `version`, sometimes nothing at all). Empty means "no probe":
    /// presence alone satisfies the check.
    pub version_args: Vec<String>,

    /// Explicit version range (`^1.2.3`, `2.x`). Overrides the
    /// constraint derived from `default_version`.
    pub constraint: String,

    /// Where the installed binary should land. Empty means the
    /// context's bin directory.
    pub destination: Option<PathBuf>,
}

impl EnsureOptions {
    /// Options for a tool identified by `identifier`, with no version
    /// pin and no probe.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }
}

/// Options for [`install`].
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Slash-delimited tool identifier.
    pub identifier: String,

    /// Version to install. Empty means `latest`; a bare version is
    /// normalized to its `v`-prefixed form.
    pub version: String,

    /// Where the installed binary should land. Empty means the
    /// context's bin directory.
    pub destination: Option<PathBuf>,
}

impl InstallOptions {
    /// Options to install the latest version of `identifier` into the
    /// context's bin directory.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }
}

/// Make sure a tool is available at an acceptable version, installing
/// it if needed.
///
/// The effective constraint is `opts.constraint` when non-empty,
/// otherwise derived from `opts.default_version`. A satisfied check is
/// a no-op, so repeated calls spawn nothing beyond the probe. Probe
/// errors propagate without attempting an install: an ambiguous probe
/// failure must not be papered over by reinstalling.
pub fn ensure(ctx: &mut SearchContext, opts: &EnsureOptions) -> Result<()> {
    let spec = ToolSpec::new(opts.identifier.clone());
    let command = spec.command_name().to_string();
    let constraint = if opts.constraint.is_empty() {
        derive_constraint(&opts.default_version)
    } else {
        opts.constraint.clone()
    };

    if is_available(ctx, &command, &opts.version_args, &constraint)? {
        tracing::debug!("{} is already available", command);
        return Ok(());
    }

    install(
        ctx,
        &InstallOptions {
            identifier: opts.identifier.clone(),
            version: install_version(&opts.constraint, &opts.default_version),
            destination: opts.destination.clone(),
        },
    )
}

/// The version to install when a check came back unsatisfied. An
/// explicit constraint is authoritative over the default: when it names
/// a concrete version, that version is installed.
fn install_version(explicit_constraint: &str, default_version: &str) -> String {
    if !explicit_constraint.is_empty() {
        if let Some(token) = extract_version(explicit_constraint) {
            return token.to_string();
        }
    }
    if default_version.is_empty() {
        LATEST.to_string()
    } else {
        default_version.to_string()
    }
}

/// Install a tool through the Go toolchain, then re-verify that the
/// command resolves.
///
/// The toolchain itself is resolved through the search context; the
/// target directory is handed to it via `GOBIN`. Install failures are
/// propagated and never retried. A tool that still cannot be resolved
/// after a successful install invocation is reported as
/// [`ToolshedError::InstallFailed`] rather than silently accepted.
pub fn install(ctx: &mut SearchContext, opts: &InstallOptions) -> Result<()> {
    let spec = ToolSpec::new(opts.identifier.clone());
    let command = spec.command_name().to_string();
    let version = normalize_version(&opts.version);

    let destination = match &opts.destination {
        Some(dir) => std::path::absolute(dir)?,
        None => ensure_bin_dir(ctx)?,
    };

    let module = format!("{}@{}", opts.identifier, version);
    tracing::info!(
        "installing {} into {}",
        module,
        ctx.style().render(&destination)
    );

    let toolchain = ctx.resolve("go").ok_or_else(|| ToolshedError::InstallFailed {
        tool: command.clone(),
        message: "the go toolchain is not on the search path".to_string(),
    })?;

    PreparedCommand::new(toolchain.to_string_lossy())
        .args(["install", module.as_str()])
        .env("GOBIN", destination.to_string_lossy())
        // Run outside any local module so the invocation is not
        // rewritten by a go.mod in the working tree.
        .current_dir(std::env::temp_dir())
        .run()
        .map_err(|err| ToolshedError::InstallFailed {
            tool: command.clone(),
            message: err.to_string(),
        })?;

    let binary = destination.join(format!("{}{}", command, ctx.style().exe_suffix()));
    if ctx.resolve(&command).is_none() && !binary.is_file() {
        return Err(ToolshedError::InstallFailed {
            tool: command,
            message: format!(
                "{} is still not available after installing; install it manually",
                opts.identifier
            ),
        });
    }
    Ok(())
}

/// Create the context's bin directory and make sure it is on the search
/// path. Newly added directories are also published to the detected CI
/// provider so later pipeline steps see them.
pub fn ensure_bin_dir(ctx: &mut SearchContext) -> Result<PathBuf> {
    let dir = ctx.bin_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    if ctx.ensure_on_path(&dir) {
        if let Some(provider) = ci::detect() {
            // Publication reaches later pipeline steps only; the current
            // process already sees the directory through the context.
            if let Err(err) = provider.prepend_path(&dir) {
                tracing::warn!(
                    "could not publish {} to {}: {}",
                    ctx.style().render(&dir),
                    provider.name(),
                    err
                );
            }
        }
    }
    Ok(dir)
}

fn normalize_version(version: &str) -> String {
    if version.is_empty() {
        return LATEST.to_string();
    }
    if version == LATEST || version.starts_with('v') {
        return version.to_string();
    }
    format!("v{version}")
}
