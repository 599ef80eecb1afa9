//! Version resolution layer
//!
//! Picks versions out of collections of versioned objects. Everything here is
//! pure computation with no I/O and no shared state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │  Resolver   │────▶│   Matcher   │
//! │ (fold/pick) │     │ (x.x.x pat) │
//! └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   Semver    │
//! │(parse, cmp) │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`resolver`]: latest and latest-matching selection
//! - [`matcher`]: wildcard version patterns
//! - [`semver`]: lenient `v` prefix handling and precedence comparison
//! - [`error`]: Error types for pattern parsing

pub mod error;
pub mod matcher;
pub mod resolver;
pub mod semver;

pub use error::VersionError;
pub use matcher::VersionPattern;
pub use resolver::{LatestMatch, Versioned, latest_matched_version, latest_version};
