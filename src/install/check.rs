//! Availability checks against a search context.

use crate::error::{Result, ToolshedError};
use crate::exec::{PreparedCommand, Verbosity};
use crate::install::constraint::{extract_version, parse_constraint, parse_version_lenient};
use crate::search::SearchContext;

/// Determine whether `command` is reachable through the search context
/// at a version satisfying `constraint`.
///
/// - Not resolvable → `Ok(false)`. "Not installed" is not an error.
/// - `version_args` empty → no probe was requested; presence alone
///   satisfies the check.
/// - Probe spawn failure or non-zero exit → [`ToolshedError::ProbeFailed`].
///   The caller cannot distinguish "tool too old" from "tool crashed"
///   here, and must not mask a broken tool by reinstalling over it.
/// - Probe output without a semver-shaped token →
///   [`ToolshedError::VersionUnrecognized`].
/// - Fail-open is intentional: an unparseable version or constraint
///   must never block a tool that is present and responding, so both
///   cases report satisfied.
pub fn is_available(
    ctx: &SearchContext,
    command: &str,
    version_args: &[String],
    constraint: &str,
) -> Result<bool> {
    let Some(resolved) = ctx.resolve(command) else {
        return Ok(false);
    };

    if version_args.is_empty() {
        return Ok(true);
    }

    let probe = PreparedCommand::new(resolved.to_string_lossy())
        .args(version_args.iter().cloned())
        .verbosity(Verbosity::Silent);
    let output = probe.output().map_err(|err| ToolshedError::ProbeFailed {
        tool: command.to_string(),
        command: probe_display(command, version_args),
        message: err.to_string(),
    })?;

    let Some(token) = extract_version(&output) else {
        return Err(ToolshedError::VersionUnrecognized {
            tool: command.to_string(),
            output: truncate(output.trim(), 120),
        });
    };
    tracing::debug!("{} reports version {}", command, token);

    // Fail-open: a version we cannot parse satisfies any constraint.
    let Some(installed) = parse_version_lenient(token) else {
        return Ok(true);
    };

    // Fail-open: a constraint that is not a valid range ("", "latest",
    // a tag) is treated as "no constraint".
    let Some(range) = parse_constraint(constraint) else {
        return Ok(true);
    };

    Ok(range.matches(&installed))
}

fn probe_display(command: &str, version_args: &[String]) -> String {
    let mut parts = vec![command.to_string()];
    parts.extend(version_args.iter().cloned());
    parts.join(" ")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
