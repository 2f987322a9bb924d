use super::{BugzillaMethod, MethodError, collection};
use crate::{
    Record,
    entity::{BugEntity, EntityRecord},
};
use serde_json::{Value, json};

const METHOD_NAME: &str = "Bug.update";

/// Fields copied verbatim from the bug when they hold a value.
const UPDATABLE_FIELDS: &[&str] = &[
    "assigned_to",
    "op_sys",
    "platform",
    "priority",
    "product",
    "status",
    "summary",
    "version",
];

/// Pushes the fields of a previously fetched bug back to the server.
///
/// Only fields holding a value are sent. The resolution is only sent when the bug's status is
/// `closed`, whatever its case. A comment can be attached to the change.
#[derive(Debug, Clone)]
pub struct UpdateBug<B> {
    bug: B,
    id: i64,
    changes: Record,
    comment: Option<String>,
    is_comment_private: bool,
}

impl<B: BugEntity> UpdateBug<B> {
    /// Prepares an update of `bug`, which must carry the id the server assigned to it.
    ///
    /// The fields sent to the server are taken from the bug as it is now.
    pub fn new(bug: B) -> Result<Self, MethodError> {
        let id = bug.id()?.ok_or(MethodError::UnsavedBug)?;
        let changes = changed_fields(&bug)?;

        Ok(Self {
            bug,
            id,
            changes,
            comment: None,
            is_comment_private: false,
        })
    }

    pub fn with_comment(mut self, comment: impl Into<String>, is_private: bool) -> Self {
        self.comment = Some(comment.into());
        self.is_comment_private = is_private;
        self
    }

    pub fn bug(&self) -> &B {
        &self.bug
    }

    pub fn into_bug(self) -> B {
        self.bug
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    pub fn is_comment_private(&self) -> bool {
        self.is_comment_private
    }

    pub fn set_comment_private(&mut self, is_private: bool) {
        self.is_comment_private = is_private;
    }
}

impl<B: BugEntity> BugzillaMethod for UpdateBug<B> {
    fn method_name(&self) -> &'static str {
        METHOD_NAME
    }

    fn parameters(&self) -> Record {
        let mut params = self.changes.clone();
        params.insert("ids".to_string(), Value::from(self.id));

        if let Some(body) = &self.comment {
            params.insert(
                "comment".to_string(),
                json!({ "body": body, "is_private": self.is_comment_private }),
            );
        }

        params
    }

    /// Checks that exactly one bug was modified. The rest of the response is discarded.
    fn set_result(&mut self, response: Record) -> Result<(), MethodError> {
        let response = EntityRecord::from(response);
        let modified = collection(Some(&response), "bugs")?.len();

        if modified != 1 {
            return Err(MethodError::UnexpectedUpdateCount(modified));
        }

        Ok(())
    }
}

fn changed_fields<B: BugEntity>(bug: &B) -> Result<Record, MethodError> {
    let record = bug.record();
    let mut changes = Record::new();

    for field in UPDATABLE_FIELDS {
        if let Some(value) = record.get(field).filter(|v| !v.is_null()) {
            changes.insert(field.to_string(), value.clone());
        }
    }

    // Servers may report several components, send them back as one
    if let Some(component) = bug.component()? {
        changes.insert("component".to_string(), Value::String(component));
    }

    let closed = bug
        .status()?
        .is_some_and(|status| status.eq_ignore_ascii_case("closed"));
    match record.get("resolution") {
        Some(resolution) if closed && !resolution.is_null() => {
            changes.insert("resolution".to_string(), resolution.clone());
        }
        _ => {}
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Bug, Entity};

    fn bug(value: Value) -> Bug {
        match value {
            Value::Object(map) => Bug::from_record(EntityRecord::from(map)),
            _ => panic!("bugs must be objects"),
        }
    }

    fn response(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("responses must be objects"),
        }
    }

    #[test]
    fn test_only_set_fields_are_sent() {
        let update = UpdateBug::new(bug(json!({
            "id": 12,
            "summary": "Crash",
            "assigned_to": null,
            "component": ["UI", "API"],
            "priority": "2",
            "creator": "someone@example.org"
        })))
        .unwrap();

        assert_eq!(
            Value::Object(update.parameters()),
            json!({
                "ids": 12,
                "summary": "Crash",
                "component": "UI\nAPI",
                "priority": "2"
            })
        );
    }

    #[test]
    fn test_resolution_sent_when_closed() {
        let update = UpdateBug::new(bug(json!({
            "id": 1, "status": "CLOSED", "resolution": "FIXED"
        })))
        .unwrap();

        assert_eq!(update.parameters()["resolution"], "FIXED");
    }

    #[test]
    fn test_resolution_omitted_when_not_closed() {
        let update = UpdateBug::new(bug(json!({
            "id": 1, "status": "NEW", "resolution": "FIXED"
        })))
        .unwrap();

        assert!(!update.parameters().contains_key("resolution"));
    }

    #[test]
    fn test_comment_is_nested() {
        let update = UpdateBug::new(bug(json!({ "id": 1 })))
            .unwrap()
            .with_comment("Fixed upstream", true);

        assert_eq!(
            update.parameters()["comment"],
            json!({ "body": "Fixed upstream", "is_private": true })
        );
    }

    #[test]
    fn test_unsaved_bug_is_rejected() {
        let err = UpdateBug::new(bug(json!({ "summary": "new" }))).unwrap_err();

        assert_eq!(err, MethodError::UnsavedBug);
    }

    #[test]
    fn test_exactly_one_modified_bug_is_expected() {
        let mut update = UpdateBug::new(bug(json!({ "id": 1 }))).unwrap();

        assert!(update
            .set_result(response(json!({ "bugs": [{ "id": 1, "changes": {} }] })))
            .is_ok());
        assert_eq!(
            update.set_result(response(json!({ "bugs": [] }))),
            Err(MethodError::UnexpectedUpdateCount(0))
        );
        assert_eq!(
            update.set_result(response(json!({ "bugs": [{ "id": 1 }, { "id": 2 }] }))),
            Err(MethodError::UnexpectedUpdateCount(2))
        );
    }
}
