//! Template parameter filling and validation
//!
//! Values come from `--set variable=value` flags and an optional YAML
//! parameters file. Flags win over the file. Each declared parameter is
//! validated against its type and constraints, then written back at its
//! dotted path, and the whole value tree is rendered as YAML.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::template::error::ParameterError;
use crate::template::types::AppParameter;

/// Option descriptor printed for tooling that renders template forms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionDescriptor {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Describe `parameters` as option descriptors.
///
/// The description falls back to the label, and an empty type is reported
/// as `string`.
pub fn option_descriptors(parameters: &[AppParameter]) -> Vec<OptionDescriptor> {
    parameters
        .iter()
        .map(|p| OptionDescriptor {
            name: p.variable.clone(),
            description: if p.description.is_empty() {
                p.label.clone()
            } else {
                p.description.clone()
            },
            default: p.default_value.clone(),
            options: p.options.clone(),
            required: p.required,
            kind: if p.kind.is_empty() {
                "string".to_string()
            } else {
                p.kind.clone()
            },
        })
        .collect()
}

/// Read the optional YAML parameters file and fill `parameters`.
pub fn resolve_template_parameters(
    set: &[String],
    parameters: &[AppParameter],
    file: Option<&Path>,
) -> Result<String, ParameterError> {
    let values = match file {
        Some(path) => Some(read_parameters_file(path)?),
        None => None,
    };

    fill_parameters(parameters, set, values)
}

fn read_parameters_file(path: &Path) -> Result<Map<String, Value>, ParameterError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParameterError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    serde_yaml_ng::from_str(&content).map_err(|source| ParameterError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply `set` overrides and file `values` to `parameters`, returning YAML.
pub fn fill_parameters(
    parameters: &[AppParameter],
    set: &[String],
    values: Option<Map<String, Value>>,
) -> Result<String, ParameterError> {
    let mut values = Value::Object(values.unwrap_or_default());
    let set_values = parse_set(parameters, set)?;

    for parameter in parameters {
        let raw = match set_values.get(&parameter.variable) {
            Some(value) => value.clone(),
            None => match get_deep_value(&values, &parameter.variable) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
                Some(other) => {
                    return Err(ParameterError::UnsupportedFileValue {
                        label: parameter.label.clone(),
                        variable: parameter.variable.clone(),
                        value: other.clone(),
                    });
                }
            },
        };

        let verified = verify_value(&raw, parameter)?;
        set_deep_value(&mut values, &parameter.variable, verified);
    }

    serde_yaml_ng::to_string(&values).map_err(ParameterError::Serialize)
}

/// Parse `variable=value` entries. The value may itself contain `=`.
pub fn parse_set(
    parameters: &[AppParameter],
    set: &[String],
) -> Result<HashMap<String, String>, ParameterError> {
    let mut values = HashMap::new();
    for entry in set {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(ParameterError::InvalidSet(entry.clone()));
        };

        if !parameters.iter().any(|p| p.variable == key) {
            return Err(ParameterError::UnknownParameter(key.to_string()));
        }

        values.insert(key.to_string(), value.to_string());
    }

    Ok(values)
}

/// Validate and convert a raw value according to the parameter's type.
pub fn verify_value(value: &str, parameter: &AppParameter) -> Result<Value, ParameterError> {
    let has_default = !parameter.default_value.is_empty() && value.is_empty();

    match parameter.kind.as_str() {
        "" | "password" | "string" | "multiline" => {
            let value = if has_default {
                parameter.default_value.as_str()
            } else {
                value
            };
            check_required(value, parameter)?;

            // options short-circuit the regex checks
            if parameter.options.iter().any(|option| option == value) {
                return Ok(Value::String(value.to_string()));
            }

            if !parameter.validation.is_empty()
                && !compile(&parameter.validation)?.is_match(value)
            {
                return Err(ParameterError::ValidationMismatch {
                    label: parameter.label.clone(),
                    variable: parameter.variable.clone(),
                    pattern: parameter.validation.clone(),
                });
            }

            if !parameter.invalidation.is_empty()
                && compile(&parameter.invalidation)?.is_match(value)
            {
                return Err(ParameterError::InvalidationMatch {
                    label: parameter.label.clone(),
                    variable: parameter.variable.clone(),
                    pattern: parameter.invalidation.clone(),
                });
            }

            Ok(Value::String(value.to_string()))
        }
        "boolean" => {
            if has_default {
                return parse_bool(&parameter.default_value, parameter).map(Value::Bool);
            }
            check_required(value, parameter)?;
            parse_bool(value, parameter).map(Value::Bool)
        }
        "number" => {
            if has_default {
                return parse_number(&parameter.default_value, parameter).map(Value::from);
            }
            check_required(value, parameter)?;

            let number = parse_number(value, parameter)?;
            if let Some(min) = parameter.min.filter(|min| number < *min) {
                return Err(ParameterError::BelowMin {
                    label: parameter.label.clone(),
                    variable: parameter.variable.clone(),
                    min,
                });
            }
            if let Some(max) = parameter.max.filter(|max| number > *max) {
                return Err(ParameterError::AboveMax {
                    label: parameter.label.clone(),
                    variable: parameter.variable.clone(),
                    max,
                });
            }

            Ok(Value::from(number))
        }
        other => Err(ParameterError::UnknownType {
            kind: other.to_string(),
            label: parameter.label.clone(),
            variable: parameter.variable.clone(),
        }),
    }
}

fn check_required(value: &str, parameter: &AppParameter) -> Result<(), ParameterError> {
    if parameter.required && value.is_empty() {
        return Err(ParameterError::Required {
            label: parameter.label.clone(),
            variable: parameter.variable.clone(),
        });
    }
    Ok(())
}

fn compile(pattern: &str) -> Result<Regex, ParameterError> {
    Regex::new(pattern).map_err(|source| ParameterError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

fn parse_bool(value: &str, parameter: &AppParameter) -> Result<bool, ParameterError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(invalid_value(value, parameter, "boolean")),
    }
}

fn parse_number(value: &str, parameter: &AppParameter) -> Result<i64, ParameterError> {
    value
        .parse::<i64>()
        .map_err(|_| invalid_value(value, parameter, "number"))
}

fn invalid_value(value: &str, parameter: &AppParameter, kind: &'static str) -> ParameterError {
    ParameterError::InvalidValue {
        label: parameter.label.clone(),
        variable: parameter.variable.clone(),
        kind,
        value: value.to_string(),
    }
}

/// Look up a dotted path. Numeric segments index into sequences.
pub fn get_deep_value<'a>(values: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(values, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Write `value` at a dotted path, creating intermediate mappings.
///
/// Nothing is written when an intermediate segment holds a non-mapping value.
pub fn set_deep_value(values: &mut Value, path: &str, value: Value) {
    let Value::Object(map) = values else {
        return;
    };

    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            set_deep_value(child, rest, value);
        }
    }
}
