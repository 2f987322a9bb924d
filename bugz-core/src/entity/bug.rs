//! # Bugs
//!
//! A bug report as stored on a Bugzilla installation.
//!
//! Different installations (and different server versions) return slightly different bug
//! shapes. Each shape is modeled as its own variant implementing [`BugEntity`], which carries
//! the accessors common to all of them. Variants only declare their required keys and override
//! the accessors whose resolution differs.
use super::{Entity, EntityRecord, FieldAccessError, MissingFieldError, RequiredFields, validated};
use serde_json::Value;

/// Priority reported when the stored value is outside `1..=5` or cannot be parsed.
pub const DEFAULT_PRIORITY: u8 = 3;

/// Accessors shared by every bug variant.
///
/// Reads return `Ok(None)` when the server did not send the field.
pub trait BugEntity: Entity + RequiredFields {
    /// The Bugzilla ID of this bug, `None` if it was never saved on the server.
    fn id(&self) -> Result<Option<i64>, FieldAccessError> {
        self.record().get_i64("id")
    }

    fn alias(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("alias")
    }

    /// Sets the unique alias of this bug. Bugzilla restricts aliases to 20 characters by
    /// default, the server enforces it.
    fn set_alias(&mut self, alias: impl Into<String>) {
        self.record_mut().set("alias", alias.into());
    }

    fn summary(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("summary")
    }

    fn set_summary(&mut self, summary: impl Into<String>) {
        self.record_mut().set("summary", summary.into());
    }

    fn assigned_to(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("assigned_to")
    }

    fn set_assigned_to(&mut self, assignee: impl Into<String>) {
        self.record_mut().set("assigned_to", assignee.into());
    }

    /// Whether the bug is open, `None` when unknown.
    fn is_open(&self) -> Result<Option<bool>, FieldAccessError> {
        self.record().get_bool("is_open")
    }

    fn set_is_open(&mut self, open: bool) {
        self.record_mut().set("is_open", open);
    }

    fn product(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("product")
    }

    fn set_product(&mut self, product: impl Into<String>) {
        self.record_mut().set("product", product.into());
    }

    /// The component this bug is filed under.
    ///
    /// Some servers return a list of components for a single bug. In that case the names are
    /// joined with `\n`.
    fn component(&self) -> Result<Option<String>, FieldAccessError> {
        match self.record().get("component") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(component)) => Ok(Some(component.clone())),
            Some(Value::Array(components)) => components
                .iter()
                .map(|c| match c {
                    Value::String(name) => Ok(name.as_str()),
                    other => Err(FieldAccessError::mismatch(
                        "component",
                        "a sequence of strings",
                        other,
                    )),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|names| Some(names.join("\n"))),
            Some(other) => Err(FieldAccessError::mismatch(
                "component",
                "a string or a sequence of strings",
                other,
            )),
        }
    }

    fn set_component(&mut self, component: impl Into<String>) {
        self.record_mut().set("component", component.into());
    }

    fn version(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("version")
    }

    fn set_version(&mut self, version: impl Into<String>) {
        self.record_mut().set("version", version.into());
    }

    fn status(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("status")
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.record_mut().set("status", status.into());
    }

    fn resolution(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("resolution")
    }

    fn set_resolution(&mut self, resolution: impl Into<String>) {
        self.record_mut().set("resolution", resolution.into());
    }

    fn operating_system(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("op_sys")
    }

    fn set_operating_system(&mut self, os: impl Into<String>) {
        self.record_mut().set("op_sys", os.into());
    }

    fn platform(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("platform")
    }

    fn set_platform(&mut self, platform: impl Into<String>) {
        self.record_mut().set("platform", platform.into());
    }

    /// How highly this bug is ranked, from 1 to 5.
    ///
    /// Any value outside that range, or one that does not parse as an integer, reads as
    /// [`DEFAULT_PRIORITY`].
    fn priority(&self) -> Result<Option<u8>, FieldAccessError> {
        let level = match self.record().get("priority") {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(p)) => p.trim().parse::<i64>().ok(),
            Some(Value::Number(p)) => p.as_i64(),
            Some(other) => {
                return Err(FieldAccessError::mismatch(
                    "priority",
                    "a string or an integer",
                    other,
                ));
            }
        };

        Ok(Some(
            level
                .and_then(|l| u8::try_from(l).ok())
                .filter(|l| (1..=5).contains(l))
                .unwrap_or(DEFAULT_PRIORITY),
        ))
    }

    /// Priorities travel as string-encoded integers.
    fn set_priority(&mut self, priority: u8) {
        self.record_mut().set("priority", priority.to_string());
    }

    /// The initial comment of a bug that is about to be reported.
    fn description(&self) -> Result<Option<String>, FieldAccessError> {
        self.record().get_string("description")
    }

    fn set_description(&mut self, description: impl Into<String>) {
        self.record_mut().set("description", description.into());
    }
}

/// The standard Bugzilla bug.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bug {
    record: EntityRecord,
}

impl Bug {
    /// Creates a bug meant to be submitted, checking [`Bug::REQUIRED_FIELDS`].
    pub fn new(record: EntityRecord) -> Result<Self, MissingFieldError> {
        validated(record)
    }
}

impl RequiredFields for Bug {
    const REQUIRED_FIELDS: &'static [&'static str] = &["product", "component", "summary", "version"];
}

record_entity!(Bug, EcsBug);

impl BugEntity for Bug {}

/// A bug as returned by Bugzilla 4 installations carrying an extra build identifier field.
///
/// Searches on those servers report the identifier under `bug_id` instead of `id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EcsBug {
    record: EntityRecord,
}

impl EcsBug {
    /// Creates a bug meant to be submitted, checking [`EcsBug::REQUIRED_FIELDS`].
    pub fn new(record: EntityRecord) -> Result<Self, MissingFieldError> {
        validated(record)
    }

    pub fn build_id(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("cf_build_id")
    }

    pub fn set_build_id(&mut self, build_id: impl Into<String>) {
        self.record.set("cf_build_id", build_id.into());
    }
}

impl RequiredFields for EcsBug {
    const REQUIRED_FIELDS: &'static [&'static str] = &["product"];
}

impl BugEntity for EcsBug {
    fn id(&self) -> Result<Option<i64>, FieldAccessError> {
        // Fetching by id reports `id`, searching reports `bug_id`.
        match self.record.get("id") {
            Some(id) if !id.is_null() => self.record.get_i64("id"),
            _ => self.record.get_i64("bug_id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrap<T: Entity>(value: Value) -> T {
        match value {
            Value::Object(map) => T::from_record(EntityRecord::from(map)),
            _ => panic!("test records must be objects"),
        }
    }

    #[test]
    fn test_component_sequence_is_joined_with_newlines() {
        let bug: Bug = wrap(json!({ "component": ["UI", "API"] }));

        assert_eq!(bug.component().unwrap().as_deref(), Some("UI\nAPI"));
    }

    #[test]
    fn test_component_scalar_is_returned_as_is() {
        let bug: Bug = wrap(json!({ "component": "UI" }));

        assert_eq!(bug.component().unwrap().as_deref(), Some("UI"));
    }

    #[test]
    fn test_component_of_wrong_shape_is_a_mismatch() {
        let bug: Bug = wrap(json!({ "component": 3 }));

        assert!(bug.component().is_err());
    }

    #[test]
    fn test_priority_in_range_is_kept() {
        let bug: Bug = wrap(json!({ "priority": "2" }));

        assert_eq!(bug.priority().unwrap(), Some(2));
    }

    #[test]
    fn test_priority_out_of_range_or_garbage_defaults() {
        for raw in [json!("9"), json!("P1"), json!(""), json!(0), json!(-4)] {
            let bug: Bug = wrap(json!({ "priority": raw }));
            assert_eq!(bug.priority().unwrap(), Some(DEFAULT_PRIORITY));
        }
    }

    #[test]
    fn test_priority_setter_stores_a_string() {
        let mut bug = Bug::default();

        bug.set_priority(5);

        assert_eq!(bug.record().get("priority"), Some(&json!("5")));
        assert_eq!(bug.priority().unwrap(), Some(5));
    }

    #[test]
    fn test_ecs_bug_falls_back_to_bug_id() {
        let bug: EcsBug = wrap(json!({ "bug_id": 42 }));

        assert_eq!(bug.id().unwrap(), Some(42));
    }

    #[test]
    fn test_ecs_bug_prefers_id() {
        let bug: EcsBug = wrap(json!({ "id": 7, "bug_id": 42 }));

        assert_eq!(bug.id().unwrap(), Some(7));
    }

    #[test]
    fn test_standard_bug_ignores_bug_id() {
        let bug: Bug = wrap(json!({ "bug_id": 42 }));

        assert_eq!(bug.id().unwrap(), None);
    }

    #[test]
    fn test_new_bug_requires_all_four_keys() {
        let mut record = EntityRecord::new();
        record.set("product", "Firefox");
        record.set("component", "");
        record.set("summary", "crash on start");

        let err = Bug::new(record.clone()).unwrap_err();
        assert_eq!(err.field, "version");

        record.set("version", Value::Null);
        assert!(Bug::new(record).is_ok());
    }

    #[test]
    fn test_new_ecs_bug_only_requires_product() {
        let mut record = EntityRecord::new();
        record.set("product", "Firefox");

        let bug = EcsBug::new(record).unwrap();

        assert_eq!(bug.build_id().unwrap(), None);
    }

    #[test]
    fn test_open_flag_is_unknown_when_absent() {
        let bug: Bug = wrap(json!({}));

        assert_eq!(bug.is_open().unwrap(), None);
    }
}
