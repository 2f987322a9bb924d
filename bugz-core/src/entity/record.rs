//! # Entity Record
//!
//! The mutable key-value record every entity is backed by.
//!
//! Values are plain `serde_json::Value`s. Accessors perform a checked downcast: an absent key
//! or a `null` value reads as `None`, a value of the wrong shape is a
//! [`FieldAccessError::TypeMismatch`].
use crate::Record;
use serde_json::Value;

/// Errors that can occur when reading a field with a typed accessor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldAccessError {
    #[error("Field '{field}' holds {found}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl FieldAccessError {
    pub(crate) fn mismatch(field: &str, expected: &'static str, found: &Value) -> Self {
        FieldAccessError::TypeMismatch {
            field: field.to_string(),
            expected,
            found: value_kind(found),
        }
    }
}

/// A named key-value record with typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord {
    fields: Record,
}

impl EntityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value stored under `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Stores `value` under `field`, replacing any previous value.
    ///
    /// No validation happens here, required fields are only checked when a builder session
    /// is finished.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Reads `field` as a string.
    pub fn get_str(&self, field: &str) -> Result<Option<&str>, FieldAccessError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(FieldAccessError::mismatch(field, "a string", other)),
        }
    }

    /// Reads `field` as an owned string.
    pub fn get_string(&self, field: &str) -> Result<Option<String>, FieldAccessError> {
        Ok(self.get_str(field)?.map(str::to_string))
    }

    /// Reads `field` as an integer.
    ///
    /// Integers encoded as strings (`"42"`) are accepted, some server versions send
    /// identifiers that way.
    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, FieldAccessError> {
        match self.present(field) {
            None => Ok(None),
            Some(v @ Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| FieldAccessError::mismatch(field, "an integer", v)),
            Some(v @ Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| FieldAccessError::mismatch(field, "an integer", v)),
            Some(other) => Err(FieldAccessError::mismatch(field, "an integer", other)),
        }
    }

    /// Reads `field` as a boolean.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldAccessError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldAccessError::mismatch(field, "a boolean", other)),
        }
    }

    /// Reads `field` as a sequence of nested records.
    ///
    /// Every element is copied into its own [`EntityRecord`], nothing is shared with `self`.
    pub fn get_records(&self, field: &str) -> Result<Option<Vec<EntityRecord>>, FieldAccessError> {
        let items = match self.present(field) {
            None => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(FieldAccessError::mismatch(field, "a sequence", other)),
        };

        items
            .iter()
            .map(|item| match item {
                Value::Object(map) => Ok(EntityRecord::from(map.clone())),
                other => Err(FieldAccessError::mismatch(field, "a sequence of records", other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Returns a snapshot of the whole record, used to build outbound parameters.
    ///
    /// The snapshot is a copy taken at call time: later mutations of the record are not
    /// reflected in it.
    pub fn as_export_map(&self) -> Record {
        self.fields.clone()
    }

    pub fn into_inner(self) -> Record {
        self.fields
    }

    fn present(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }
}

impl From<Record> for EntityRecord {
    fn from(fields: Record) -> Self {
        Self { fields }
    }
}

impl From<EntityRecord> for Record {
    fn from(record: EntityRecord) -> Self {
        record.fields
    }
}

/// Human readable name of the shape of a value, used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "an integer",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a record",
    }
}
