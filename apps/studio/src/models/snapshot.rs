//! Snapshot loading: deep-merges a partial JSON document over a base.
//!
//! Objects merge key by key, arrays and scalars replace, `null` keeps the base
//! value. Unknown keys survive the merge and are dropped by serde.

use serde_json::Value;
use thiserror::Error;

use crate::models::document::Document;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not UTF-8 text: {0}")]
    InvalidUtf8(#[source] std::str::Utf8Error),

    #[error("snapshot is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("snapshot root must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("snapshot does not match the resume shape: {0}")]
    Shape(#[source] serde_json::Error),
}

impl Document {
    /// Overlays `partial` onto this document and returns the merged result.
    /// `self` is never modified, so a failed load leaves the caller's state
    /// as it was.
    pub fn load_from(&self, mut partial: Value) -> Result<Document, SnapshotError> {
        if !partial.is_object() {
            return Err(SnapshotError::NotAnObject(kind_of(&partial)));
        }
        strip_nulls(&mut partial);
        let mut merged = serde_json::to_value(self).map_err(SnapshotError::Shape)?;
        merge_json(&mut merged, partial);
        serde_json::from_value(merged).map_err(SnapshotError::Shape)
    }

    /// Parses snapshot text and overlays it onto an empty document.
    pub fn from_snapshot(text: &str) -> Result<Document, SnapshotError> {
        let value: Value = serde_json::from_str(text).map_err(SnapshotError::InvalidJson)?;
        Document::default().load_from(value)
    }

    /// Same as [`Document::from_snapshot`] for an uploaded file's raw bytes.
    pub fn from_snapshot_bytes(bytes: &[u8]) -> Result<Document, SnapshotError> {
        let text = std::str::from_utf8(bytes).map_err(SnapshotError::InvalidUtf8)?;
        Self::from_snapshot(text)
    }

    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Drops `null` object members and array elements at any depth, so a null
/// inside a list entry reads as a missing field.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
