use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Int(_) => "integer",
            OptionValue::Str(_) => "string",
        }
    }

    /// Parses `text` as a value of the same kind as `self`.
    pub fn parse_like(&self, text: &str) -> Option<OptionValue> {
        match self {
            OptionValue::Bool(_) => match text.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(OptionValue::Bool(true)),
                "false" | "no" | "off" | "0" => Some(OptionValue::Bool(false)),
                _ => None,
            },
            OptionValue::Int(_) => text.parse().ok().map(OptionValue::Int),
            OptionValue::Str(_) => Some(OptionValue::Str(text.to_string())),
        }
    }

    fn same_kind(&self, other: &OptionValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{value}"),
            OptionValue::Int(value) => write!(f, "{value}"),
            OptionValue::Str(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option: '{0}'")]
    Unknown(String),
    #[error("option '{key}' takes a {expected} value, got a {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Typed option table. The set of names and each option's type are fixed
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        let values = [
            ("center", OptionValue::Bool(false)),
            ("wrapscroll", OptionValue::Bool(false)),
            ("columns", OptionValue::Str("artist,track,title,album,year,time".to_string())),
            ("sort", OptionValue::Str("track,disc,album,albumartist".to_string())),
            ("topbar", OptionValue::Str("${tag|artist} - ${tag|title}".to_string())),
            ("volumestep", OptionValue::Int(5)),
            ("seekstep", OptionValue::Int(5)),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            OptionValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Stores `value` and reports whether it differs from the old one.
    pub fn set(&mut self, key: &str, value: OptionValue) -> Result<bool, OptionError> {
        let current = self
            .values
            .get_mut(key)
            .ok_or_else(|| OptionError::Unknown(key.to_string()))?;
        if !current.same_kind(&value) {
            return Err(OptionError::TypeMismatch {
                key: key.to_string(),
                expected: current.kind(),
                found: value.kind(),
            });
        }
        let changed = *current != value;
        *current = value;
        Ok(changed)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_bool(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(OptionValue::Bool(_)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
