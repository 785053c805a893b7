use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One structured key/value pair attached to a log event.
///
/// The value keeps its original JSON type (number, string, bool, array,
/// object) rather than being stringified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, display_value(&self.value))
    }
}

/// Renders a value the way it reads in a log line: string contents verbatim,
/// everything else as its JSON text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Serializes an ordered field slice as a JSON object.
///
/// Unlike collecting into a map first, this keeps call order and emits
/// duplicate keys as they were given.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a>(pub &'a [Field]);

impl Serialize for Fields<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|field| (&field.key, &field.value)))
    }
}

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
