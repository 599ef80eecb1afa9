use std::path::PathBuf;

use thiserror::Error;

use crate::version::VersionError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Template {name} not found in project {project}")]
    NotFound { project: String, name: String },

    #[error("Template {name} has no version {version}")]
    VersionNotFound { name: String, version: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid catalog: {0}")]
    Catalog(String),
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("couldn't find any version in template {name}")]
    NoVersions { name: String },

    #[error(
        "couldn't find any matching version to {requested} in template {name}{}",
        latest_hint(.latest)
    )]
    NoMatchingVersion {
        name: String,
        requested: String,
        latest: Option<String>,
    },

    #[error(transparent)]
    Version(#[from] VersionError),
}

fn latest_hint(latest: &Option<String>) -> String {
    latest
        .as_ref()
        .map(|latest| format!(" (latest available is {latest})"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("error parsing --set {0}: need parameter=value format")]
    InvalidSet(String),

    #[error("parameter {0} doesn't exist on template")]
    UnknownParameter(String),

    #[error("parameter {label} ({variable}) is required")]
    Required { label: String, variable: String },

    #[error("compile regex {pattern}: {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    #[error("parameter {label} ({variable}) needs to match regex {pattern}")]
    ValidationMismatch {
        label: String,
        variable: String,
        pattern: String,
    },

    #[error("parameter {label} ({variable}) cannot match regex {pattern}")]
    InvalidationMatch {
        label: String,
        variable: String,
        pattern: String,
    },

    #[error("parse value {value:?} for parameter {label} ({variable}) as {kind}")]
    InvalidValue {
        label: String,
        variable: String,
        kind: &'static str,
        value: String,
    },

    #[error("parameter {label} ({variable}) cannot be smaller than {min}")]
    BelowMin {
        label: String,
        variable: String,
        min: i64,
    },

    #[error("parameter {label} ({variable}) cannot be greater than {max}")]
    AboveMax {
        label: String,
        variable: String,
        max: i64,
    },

    #[error("unrecognized type {kind} for parameter {label} ({variable})")]
    UnknownType {
        kind: String,
        label: String,
        variable: String,
    },

    #[error("unrecognized type for parameter {label} ({variable}) in file: {value}")]
    UnsupportedFileValue {
        label: String,
        variable: String,
        value: serde_json::Value,
    },

    #[error("read parameters file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse parameters file {path:?}: {source}")]
    ParseFile {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error("marshal parameters: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),
}
