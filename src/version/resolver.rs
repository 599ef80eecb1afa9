//! Latest version resolution
//!
//! Selects the newest element of a collection of versioned objects, either
//! overall or restricted to a [`VersionPattern`].
//!
//! Both selections share the same fold: elements are visited in iteration
//! order and the running best is replaced whenever the candidate is not
//! strictly less than it. Elements with equal precedence therefore resolve
//! to the one visited last. Elements whose version does not parse are
//! skipped without error.

use std::cmp::Ordering;

use semver::Version;
use tracing::debug;

use crate::version::error::VersionError;
use crate::version::matcher::VersionPattern;
use crate::version::semver::{compare, parse_version};

/// Anything that carries a version string
pub trait Versioned {
    fn version(&self) -> &str;
}

impl Versioned for String {
    fn version(&self) -> &str {
        self
    }
}

impl Versioned for &str {
    fn version(&self) -> &str {
        self
    }
}

/// Result of [`latest_matched_version`]
#[derive(Debug)]
pub struct LatestMatch<'a, T> {
    /// Latest parseable element overall
    pub latest: Option<&'a T>,
    /// Latest parseable element satisfying the pattern
    pub matched: Option<&'a T>,
}

/// Running best of the fold
struct Best<'a, T> {
    item: &'a T,
    version: Version,
}

impl<'a, T> Best<'a, T> {
    fn offer(slot: &mut Option<Self>, item: &'a T, version: &Version) {
        let replace = match slot {
            None => true,
            Some(best) => compare(version, &best.version) != Ordering::Less,
        };

        if replace {
            *slot = Some(Best {
                item,
                version: version.clone(),
            });
        }
    }
}

fn parsed<'a, T, I>(collection: I) -> impl Iterator<Item = (&'a T, Version)>
where
    T: Versioned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    collection.into_iter().filter_map(|item| {
        let parsed = parse_version(item.version());
        if parsed.is_none() {
            debug!("Skipping unparseable version '{}'", item.version());
        }
        parsed.map(|version| (item, version))
    })
}

/// Find the element with the greatest semantic version.
///
/// Returns `None` for an empty collection or when no element parses.
pub fn latest_version<'a, T, I>(collection: I) -> Option<&'a T>
where
    T: Versioned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut best = None;
    for (item, version) in parsed(collection) {
        Best::offer(&mut best, item, &version);
    }
    best.map(|best| best.item)
}

/// Find both the overall latest element and the latest element matching `pattern`.
///
/// The only error is a malformed pattern; an empty collection yields
/// `LatestMatch { latest: None, matched: None }`.
pub fn latest_matched_version<'a, T, I>(
    collection: I,
    pattern: &str,
) -> Result<LatestMatch<'a, T>, VersionError>
where
    T: Versioned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let pattern = VersionPattern::parse(pattern)?;

    let mut latest = None;
    let mut matched = None;
    for (item, version) in parsed(collection) {
        Best::offer(&mut latest, item, &version);
        if pattern.matches(&version) {
            Best::offer(&mut matched, item, &version);
        }
    }

    Ok(LatestMatch {
        latest: latest.map(|best| best.item),
        matched: matched.map(|best| best.item),
    })
}
