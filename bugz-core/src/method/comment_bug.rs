use super::{BugzillaMethod, MethodError};
use crate::{
    Record,
    entity::{BugEntity, Comment, EntityRecord},
};
use serde_json::Value;

const METHOD_NAME: &str = "Bug.add_comment";

/// Returned by [`CommentBug::comment_id`] when the server did not report the new comment's id.
pub const NO_COMMENT_ID: i64 = -1;

/// Adds a comment to an existing bug.
#[derive(Debug, Clone)]
pub struct CommentBug {
    id: i64,
    comment: Comment,
    response: Option<EntityRecord>,
}

impl CommentBug {
    /// Comments on the bug with the given id. `comment` is either plain text or a [`Comment`].
    pub fn new(id: i64, comment: impl Into<Comment>) -> Self {
        Self {
            id,
            comment: comment.into(),
            response: None,
        }
    }

    /// Comments on `bug`, which must carry the id the server assigned to it.
    pub fn for_bug<B: BugEntity>(bug: &B, comment: impl Into<Comment>) -> Result<Self, MethodError> {
        let id = bug.id()?.ok_or(MethodError::UnsavedBug)?;
        Ok(Self::new(id, comment))
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    /// The id of the newly created comment, [`NO_COMMENT_ID`] if the server did not report one.
    pub fn comment_id(&self) -> Result<i64, MethodError> {
        let id = match &self.response {
            Some(response) => response.get_i64("id")?,
            None => None,
        };

        Ok(id.unwrap_or(NO_COMMENT_ID))
    }
}

impl BugzillaMethod for CommentBug {
    fn method_name(&self) -> &'static str {
        METHOD_NAME
    }

    fn parameters(&self) -> Record {
        let mut params = Record::new();
        params.insert("id".to_string(), Value::from(self.id));
        params.insert("comment".to_string(), Value::String(self.comment.text.clone()));

        if self.comment.is_private {
            params.insert("is_private".to_string(), Value::Bool(true));
        }

        params
    }

    fn set_result(&mut self, response: Record) -> Result<(), MethodError> {
        self.response = Some(EntityRecord::from(response));
        Ok(())
    }
}
