//! Templates, their versions and parameters
//!
//! # Modules
//!
//! - [`types`]: Template, version and parameter types
//! - [`source`]: Source trait for fetching templates from a catalog
//! - [`sources`]: Concrete sources (catalog file, HTTP catalog)
//! - [`resolve`]: Selects a template version for a requested version pattern
//! - [`parameters`]: Fills and validates parameter values
//! - [`error`]: Error types for sources, selection and parameters

pub mod error;
pub mod parameters;
pub mod resolve;
pub mod source;
pub mod sources;
pub mod types;

pub use error::{ParameterError, SourceError, TemplateError};
pub use resolve::{LATEST, resolve_version, select_parameters};
pub use source::TemplateSource;
pub use types::{AppParameter, Template, TemplateVersion};
