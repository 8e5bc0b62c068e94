//! Version-constraint derivation and version scraping.
//!
//! Constraints travel as plain strings (`"^1.2.3"`, `"2.x"`, `""` for
//! "anything goes") so callers can pass them straight through from
//! their own configuration. Parsing happens at the last moment, in
//! [`crate::install::is_available`], and a parse failure there reports
//! the check as satisfied rather than erroring.

use crate::install::LATEST;
use regex::Regex;
use semver::{Version, VersionReq};
use std::sync::OnceLock;

/// First semver-shaped token in a block of text: optional `v`, 1-3
/// numeric parts, optional pre-release and build suffixes.
fn semver_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"v?\d+(\.\d+){0,2}(-[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?(\+[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?",
        )
        .expect("semver pattern is valid")
    })
}

/// Like [`semver_pattern`], anchored to the whole string.
fn exact_semver_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^v?\d+(\.\d+){0,2}(-[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?(\+[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?$",
        )
        .expect("anchored semver pattern is valid")
    })
}

/// Derive a version constraint from a default version.
///
/// A parseable version yields the caret constraint "at least this
/// version, within the same major version". Anything else (empty,
/// `"latest"`, a branch name, garbage) degrades to the empty
/// no-constraint sentinel. This function never fails.
///
/// ```
/// use toolshed::install::derive_constraint;
///
/// assert_eq!(derive_constraint("2.0.3"), "^2.0.3");
/// assert_eq!(derive_constraint("v1.2"), "^1.2");
/// assert_eq!(derive_constraint("latest"), "");
/// assert_eq!(derive_constraint("main"), "");
/// ```
pub fn derive_constraint(default_version: &str) -> String {
    let trimmed = default_version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(LATEST) {
        return String::new();
    }
    if exact_semver_pattern().is_match(trimmed) && parse_version_lenient(trimmed).is_some() {
        format!("^{trimmed}")
    } else {
        String::new()
    }
}

/// Extract the first semver-shaped token from probe output.
pub fn extract_version(output: &str) -> Option<&str> {
    semver_pattern().find(output).map(|m| m.as_str())
}

/// Parse a version token, padding partial forms (`2`, `2.1`) out to
/// three parts. Pre-release and build suffixes survive the padding.
pub fn parse_version_lenient(token: &str) -> Option<Version> {
    let token = token.strip_prefix('v').unwrap_or(token);
    if let Ok(version) = Version::parse(token) {
        return Some(version);
    }

    let (base, suffix) = match token.find(['-', '+']) {
        Some(at) => token.split_at(at),
        None => (token, ""),
    };
    let missing = 2usize.checked_sub(base.matches('.').count())?;
    let padded = format!("{}{}{}", base, ".0".repeat(missing), suffix);
    Version::parse(&padded).ok()
}

/// Parse a constraint string as a semantic-version range. The
/// no-constraint sentinels (empty, `"latest"`) and anything that is not
/// a valid range expression return `None`.
pub fn parse_constraint(constraint: &str) -> Option<VersionReq> {
    let constraint = constraint.trim();
    if constraint.is_empty() || constraint.eq_ignore_ascii_case(LATEST) {
        return None;
    }
    VersionReq::parse(constraint).ok()
}
