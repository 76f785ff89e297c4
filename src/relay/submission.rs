//! Inbound submission.

use serde_json::{Map, Value};

/// Label whose value must be non-empty for a submission to be relayed.
pub const APPLICATION_LINK: &str = "Application Link";

/// Field carrying the shared secret.
pub const SECRET_FIELD: &str = "secret";

/// A JSON object of `label -> value` posted by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    fields: Map<String, Value>,
}

impl Submission {
    /// Anything other than a JSON object is treated as an empty submission.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Parse a raw request body. Unparseable bodies become empty submissions
    /// and are then turned away by the secret check.
    pub fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .map(Self::from_value)
            .unwrap_or_default()
    }

    /// Submitted secret, only when it was sent as a string.
    pub fn secret(&self) -> Option<&str> {
        self.fields.get(SECRET_FIELD).and_then(Value::as_str)
    }

    /// Field value as the form service will see it.
    ///
    /// `None` for absent or `null` labels. Strings come back verbatim, other
    /// scalars in their JSON text form, arrays and objects as compact JSON.
    pub fn field(&self, label: &str) -> Option<String> {
        match self.fields.get(label)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// True unless the label is absent, `null`, `false`, zero or `""`.
    pub fn has_value(&self, label: &str) -> bool {
        match self.fields.get(label) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(_) => true,
        }
    }
}

impl From<Map<String, Value>> for Submission {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
