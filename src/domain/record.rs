use super::field::{Field, Fields};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::panic::Location;

/// An owned snapshot of one log event as accepted by a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(serialize_with = "serialize_fields")]
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
}

impl Record {
    /// Captures an event now. `caller` is only kept when `show_caller` is set.
    pub fn capture(
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
        show_caller: bool,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            fields: fields.to_vec(),
            caller: show_caller.then(|| format_caller(caller)),
        }
    }

    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| &field.value)
    }
}

/// `file:line` form of a call site.
pub fn format_caller(caller: &Location<'_>) -> String {
    format!("{}:{}", caller.file(), caller.line())
}

fn serialize_fields<S>(fields: &[Field], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Fields(fields).serialize(serializer)
}
