/// A comment on a bug, as passed to [`crate::method::CommentBug`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// The server assigned id, `None` for a comment that was not posted yet.
    pub id: Option<i64>,
    pub text: String,
    /// Private comments are only visible to members of the installation's insider group.
    pub is_private: bool,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            is_private: false,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }
}

impl From<&str> for Comment {
    fn from(text: &str) -> Self {
        Comment::new(text)
    }
}

impl From<String> for Comment {
    fn from(text: String) -> Self {
        Comment::new(text)
    }
}
