//! Raw text to generic tree.
//!
//! Documents arrive as JSON or YAML text. Both are read into a
//! `serde_json::Value` so that every later stage works on one tree type.

use std::fmt;

use serde_json::Value;

use crate::error::{TypeError, TypeResult};

/// Text encoding of a raw document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawFormat {
    Json,
    Yaml,
}

impl RawFormat {
    /// Guess the encoding from the first significant character.
    pub fn detect(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('{') | Some('[') => Self::Json,
            _ => Self::Yaml,
        }
    }
}

impl fmt::Display for RawFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Parse JSON text.
pub fn parse_json(text: &str) -> TypeResult<Value> {
    serde_json::from_str(text).map_err(|e| TypeError::Parse {
        format: RawFormat::Json.to_string(),
        message: e.to_string(),
    })
}

/// Parse YAML text.
pub fn parse_yaml(text: &str) -> TypeResult<Value> {
    serde_yaml::from_str(text).map_err(|e| TypeError::Parse {
        format: RawFormat::Yaml.to_string(),
        message: e.to_string(),
    })
}

/// Parse text as JSON, falling back to YAML.
///
/// When both fail, the error of the format the text looks like is reported.
pub fn parse_value(text: &str) -> TypeResult<(RawFormat, Value)> {
    let json_err = match parse_json(text) {
        Ok(value) => return Ok((RawFormat::Json, value)),
        Err(e) => e,
    };
    match parse_yaml(text) {
        Ok(value) => Ok((RawFormat::Yaml, value)),
        Err(yaml_err) => match RawFormat::detect(text) {
            RawFormat::Json => Err(json_err),
            RawFormat::Yaml => Err(yaml_err),
        },
    }
}
