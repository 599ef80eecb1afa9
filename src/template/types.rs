//! Common types for templates

use serde::{Deserialize, Serialize};

use crate::version::Versioned;

/// A single configurable parameter declared by a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppParameter {
    /// Dotted path of the value in the resolved output (e.g. "sync.ingress")
    pub variable: String,
    /// Human-readable name
    pub label: String,
    pub description: String,
    /// One of "", "string", "password", "multiline", "boolean", "number"
    #[serde(rename = "type")]
    pub kind: String,
    pub options: Vec<String>,
    pub default_value: String,
    pub required: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Regex a string value has to match
    pub validation: String,
    /// Regex a string value must not match
    pub invalidation: String,
    pub section: String,
}

/// One published version of a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateVersion {
    pub version: String,
    pub parameters: Vec<AppParameter>,
}

impl Versioned for TemplateVersion {
    fn version(&self) -> &str {
        &self.version
    }
}

/// A named template, optionally with versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Parameters used when the template has no versions
    #[serde(default)]
    pub parameters: Vec<AppParameter>,
    #[serde(default)]
    pub versions: Vec<TemplateVersion>,
}
