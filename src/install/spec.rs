//! Tool identifiers and command-name derivation.

/// Identifies an installable tool by its slash-delimited module path,
/// e.g. `github.com/mikefarah/yq/v4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    identifier: String,
}

impl ToolSpec {
    /// Wrap a non-empty identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// The raw identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The command name the installed binary answers to.
    pub fn command_name(&self) -> &str {
        command_name(&self.identifier)
    }
}

/// Derive the command name from a slash-delimited identifier.
///
/// Trailing segments that are a bare major-version marker (`v` followed
/// only by digits) or the conventional `cmd` grouping segment are
/// stripped, repeating until the last segment is a plausible command
/// name. Pure and idempotent; never returns an empty segment for a
/// non-empty identifier.
///
/// ```
/// use toolshed::install::command_name;
///
/// assert_eq!(command_name("github.com/foo/bar/v2"), "bar");
/// assert_eq!(command_name("github.com/foo/bar/cmd/baz"), "baz");
/// assert_eq!(command_name("github.com/foo/verynotsemver"), "verynotsemver");
/// ```
pub fn command_name(identifier: &str) -> &str {
    let mut rest = identifier.trim_end_matches('/');
    loop {
        let (parent, last) = match rest.rsplit_once('/') {
            Some(split) => split,
            None => ("", rest),
        };
        if parent.is_empty() {
            return last;
        }
        if is_major_version_segment(last) || last == "cmd" {
            rest = parent;
            continue;
        }
        return last;
    }
}

/// A bare major-version path segment: the letter `v` followed by one or
/// more digits and nothing else. The match is anchored and exact, so a
/// tool literally named `verynotsemver` is not a version marker.
fn is_major_version_segment(segment: &str) -> bool {
    match segment.strip_prefix('v') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
