//! Entry map decoding.
//!
//! The entry map arrives as a JSON object whose keys are form labels and
//! whose values are either a destination key (`"entry.123"`) or a date group
//! (`{"year": "...", "month": "...", "day": "..."}`). Decoding happens once,
//! when the relay settings load, so an unusable shape is rejected before any
//! submission is looked at.

use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while decoding an entry map.
#[derive(Debug, Error)]
pub enum EntryMapError {
    #[error("entry map is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry map must be a JSON object")]
    NotAnObject,

    #[error("unsupported mapping for '{label}': {reason}")]
    UnsupportedTarget { label: String, reason: String },
}

/// Where a submitted field lands in the outbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingTarget {
    /// Value is copied verbatim under a single destination key.
    SimpleField(String),
    /// Value is parsed as a date and split across up to three keys.
    DateGroup(DateGroup),
}

/// Destination keys for the parts of a date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateGroup {
    pub year_key: Option<String>,
    pub month_key: Option<String>,
    pub day_key: Option<String>,
}

/// One `label -> target` pair. `target` is `None` for labels configured with
/// a falsy value; those are skipped during remapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMapping {
    pub label: String,
    pub target: Option<MappingTarget>,
}

/// Ordered entry map. Iteration follows the key order of the source JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMap {
    entries: Vec<EntryMapping>,
}

impl EntryMap {
    /// Decode from the serialized JSON form.
    pub fn from_json(raw: &str) -> Result<Self, EntryMapError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Decode from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, EntryMapError> {
        let Value::Object(object) = value else {
            return Err(EntryMapError::NotAnObject);
        };

        let entries = object
            .into_iter()
            .map(|(label, def)| {
                let target = decode_target(&label, def)?;
                Ok(EntryMapping { label, target })
            })
            .collect::<Result<Vec<_>, EntryMapError>>()?;

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryMapping> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for EntryMap {
    type Err = EntryMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn decode_target(label: &str, def: Value) -> Result<Option<MappingTarget>, EntryMapError> {
    if is_falsy(&def) {
        return Ok(None);
    }

    match def {
        Value::String(key) => Ok(Some(MappingTarget::SimpleField(key))),
        Value::Object(fields) => decode_date_group(label, fields).map(|g| Some(MappingTarget::DateGroup(g))),
        other => Err(unsupported(label, format!("expected a string or an object, got {}", kind(&other)))),
    }
}

fn decode_date_group(label: &str, fields: Map<String, Value>) -> Result<DateGroup, EntryMapError> {
    let mut group = DateGroup::default();

    for (part, key) in fields {
        let key = match key {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            other => {
                return Err(unsupported(
                    label,
                    format!("date part '{}' must be a string, got {}", part, kind(&other)),
                ))
            }
        };

        match part.as_str() {
            "year" => group.year_key = key,
            "month" => group.month_key = key,
            "day" => group.day_key = key,
            _ => return Err(unsupported(label, format!("unknown date part '{}'", part))),
        }
    }

    Ok(group)
}

fn unsupported(label: &str, reason: String) -> EntryMapError {
    EntryMapError::UnsupportedTarget {
        label: label.to_string(),
        reason,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
