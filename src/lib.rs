//! Template version resolution and persisted CLI defaults
//!
//! - [`version`]: picks the latest version of a collection, optionally
//!   restricted to an `x`-wildcard pattern
//! - [`defaults`]: whitelisted key/value defaults persisted as JSON
//! - [`template`]: template catalogs, version selection and parameter filling
//! - [`cli`]: command-line front end

pub mod cli;
pub mod config;
pub mod defaults;
pub mod logging;
pub mod template;
pub mod version;
