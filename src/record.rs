//! Records displayed by the table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row the table can display.
///
/// The table never mutates records; it only reads their identifier, their
/// route and whatever the column formatters extract.
pub trait Record: Clone {
    /// The stable unique identifier used when no identifier resolver is set.
    fn uuid(&self) -> String;

    /// The navigable route for this record, if any.
    fn route(&self) -> Option<String> {
        None
    }
}

/// A record backed by a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRecord(pub Value);

impl JsonRecord {
    /// Get a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Render a field as display text.
    ///
    /// Strings are shown without quotes; missing and null fields are empty.
    pub fn display(&self, field: &str) -> String {
        match self.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Whether a field holds `true`.
    pub fn flag(&self, field: &str) -> bool {
        matches!(self.get(field), Some(Value::Bool(true)))
    }

    /// Field names of the underlying object.
    pub fn field_names(&self) -> Vec<String> {
        match &self.0 {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

impl Record for JsonRecord {
    fn uuid(&self) -> String {
        ["uuid", "id"]
            .iter()
            .find_map(|field| self.get(field).filter(|v| !v.is_null()))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    }

    fn route(&self) -> Option<String> {
        self.get("route").and_then(Value::as_str).map(str::to_string)
    }
}

/// Parse a JSON array of objects into records.
pub fn parse_records(json: &str) -> serde_json::Result<Vec<JsonRecord>> {
    serde_json::from_str(json)
}
