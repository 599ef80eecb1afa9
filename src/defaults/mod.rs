//! Persisted CLI defaults
//!
//! A small whitelisted key/value store kept as a flat JSON object on disk.
//! The set of accepted keys is passed in when the store is opened.
//!
//! # Modules
//!
//! - [`store`]: the [`Defaults`] store and its well-known keys
//! - [`error`]: Error types for open, read and write failures

pub mod error;
pub mod store;

pub use error::DefaultsError;
pub use store::{DEFAULT_KEYS, Defaults, KEY_PROJECT};
