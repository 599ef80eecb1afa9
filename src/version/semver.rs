use std::cmp::Ordering;

use semver::Version;

/// Strip a single leading `v` or `V` from a version string.
///
/// Examples:
/// - "v1.2.3" -> "1.2.3"
/// - "V1.2.3" -> "1.2.3"
/// - "1.2.3" -> "1.2.3"
pub fn normalize_version(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

/// Parse a version string into a semver::Version.
///
/// Only full `major.minor.patch` versions are accepted, optionally followed by
/// pre-release and build metadata. A leading `v`/`V` is stripped first.
/// Partial versions such as "1.2" and surrounding whitespace are rejected.
pub fn parse_version(version: &str) -> Option<Version> {
    Version::parse(normalize_version(version)).ok()
}

/// Compare two versions by SemVer precedence.
///
/// Build metadata does not take part in the ordering, so `1.0.0+a` and
/// `1.0.0+b` compare as equal.
pub fn compare(a: &Version, b: &Version) -> Ordering {
    a.cmp_precedence(b)
}
