//! Wildcard version patterns
//!
//! A pattern has exactly three dot-separated components, each either a
//! wildcard (`x`/`X`) or a literal number:
//! - `1.2.3` - exact major, minor and patch
//! - `1.2.x` - any patch of 1.2
//! - `x.x.x` - any version
//! - `v2.x.x` - a leading `v` is ignored

use semver::Version;

use crate::version::error::VersionError;

const WILDCARD: &str = "x";

/// One position of a [`VersionPattern`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternComponent {
    /// Matches any value
    Wildcard,
    /// Matches only when the text parses to the same unsigned integer.
    /// Text that is not an unsigned integer never matches.
    Literal(String),
}

impl PatternComponent {
    fn parse(component: &str) -> Self {
        if component == WILDCARD {
            PatternComponent::Wildcard
        } else {
            PatternComponent::Literal(component.to_string())
        }
    }

    fn matches(&self, value: u64) -> bool {
        match self {
            PatternComponent::Wildcard => true,
            PatternComponent::Literal(text) => text.parse::<u64>().is_ok_and(|n| n == value),
        }
    }
}

/// A parsed `major.minor.patch` pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPattern {
    pub major: PatternComponent,
    pub minor: PatternComponent,
    pub patch: PatternComponent,
}

impl VersionPattern {
    /// Parse a pattern string.
    ///
    /// The pattern is lower-cased and a single leading `v` is removed before
    /// splitting. Only the shape is validated here: anything but three
    /// components is an error, while odd component contents simply never match.
    pub fn parse(pattern: &str) -> Result<Self, VersionError> {
        let lowered = pattern.to_lowercase();
        let stripped = lowered.strip_prefix('v').unwrap_or(&lowered);

        let parts: Vec<&str> = stripped.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(VersionError::InvalidPattern {
                pattern: pattern.to_string(),
                components: parts.len(),
            });
        };

        Ok(Self {
            major: PatternComponent::parse(major),
            minor: PatternComponent::parse(minor),
            patch: PatternComponent::parse(patch),
        })
    }

    /// Check whether a parsed version satisfies this pattern.
    ///
    /// Pre-release and build metadata are ignored.
    pub fn matches(&self, version: &Version) -> bool {
        self.major.matches(version.major)
            && self.minor.matches(version.minor)
            && self.patch.matches(version.patch)
    }
}

impl std::str::FromStr for VersionPattern {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
