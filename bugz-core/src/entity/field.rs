//! # Bug fields
//!
//! Metadata describing the fields a bug can carry on an installation, standard or custom,
//! along with the values select-type fields accept.
use super::{Entity, EntityRecord, FieldAccessError};

/// The definition of a bug field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BugField {
    record: EntityRecord,
}

impl BugField {
    pub fn id(&self) -> Result<Option<i64>, FieldAccessError> {
        self.record.get_i64("id")
    }

    /// The internal name of the field, as used in search and update parameters.
    pub fn name(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.set("name", name.into());
    }

    pub fn display_name(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("display_name")
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.record.set("display_name", display_name.into());
    }

    pub fn is_mandatory(&self) -> Result<Option<bool>, FieldAccessError> {
        self.record.get_bool("is_mandatory")
    }

    pub fn set_is_mandatory(&mut self, mandatory: bool) {
        self.record.set("is_mandatory", mandatory);
    }

    pub fn is_custom(&self) -> Result<Option<bool>, FieldAccessError> {
        self.record.get_bool("is_custom")
    }

    pub fn set_is_custom(&mut self, custom: bool) {
        self.record.set("is_custom", custom);
    }

    /// The server's numeric field type code (free text, drop down, date...).
    pub fn field_type(&self) -> Result<Option<i64>, FieldAccessError> {
        self.record.get_i64("type")
    }

    pub fn set_field_type(&mut self, field_type: i64) {
        self.record.set("type", field_type);
    }

    /// The legal values of this field, `None` for fields without a fixed set of values.
    pub fn values(&self) -> Result<Option<Vec<BugFieldValue>>, FieldAccessError> {
        Ok(self
            .record
            .get_records("values")?
            .map(|records| records.into_iter().map(BugFieldValue::from_record).collect()))
    }
}

/// One legal value of a [`BugField`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BugFieldValue {
    record: EntityRecord,
}

impl BugFieldValue {
    pub fn id(&self) -> Result<Option<i64>, FieldAccessError> {
        self.record.get_i64("id")
    }

    pub fn name(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.set("name", name.into());
    }

    pub fn description(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("description")
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.record.set("description", description.into());
    }

    pub fn is_active(&self) -> Result<Option<bool>, FieldAccessError> {
        self.record.get_bool("is_active")
    }

    pub fn set_is_active(&mut self, active: bool) {
        self.record.set("is_active", active);
    }

    pub fn sort_key(&self) -> Result<Option<i64>, FieldAccessError> {
        self.record.get_i64("sort_key")
    }

    pub fn set_sort_key(&mut self, sort_key: i64) {
        self.record.set("sort_key", sort_key);
    }
}

record_entity!(BugField, BugFieldValue);
