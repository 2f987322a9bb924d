//! # Remote Methods
//!
//! One descriptor per Bugzilla remote method. A descriptor pairs the method name with its
//! outbound parameters and knows how to decode the method's response into entities.
//!
//! | Descriptor | Method | Parameters | Decoded from |
//! |---|---|---|---|
//! | [`GetBug`] | `Bug.get` | `ids` | `bugs` |
//! | [`BugSearch`] | `Bug.search` | any field/value pairs | `bugs` |
//! | [`UpdateBug`] | `Bug.update` | `ids`, changed fields, `comment` | `bugs` (count only) |
//! | [`CommentBug`] | `Bug.add_comment` | `id`, `comment` | `id` |
//! | [`GetProduct`] | `Product.get` | `ids` or `names` | `products` |
//! | [`GetBugField`], [`BugFields`] | `Bug.fields` | `ids` or `names` | `fields` |
//!
//! ## Lifecycle
//!
//! A descriptor starts out holding only its parameters. Once the call went through, the
//! response is handed to [`BugzillaMethod::set_result`] and results can be extracted. Setting a
//! result again replaces the previous one. Extracting results before any response was set
//! behaves like an empty response.
//!
//! Decoding is lenient about missing data: a response without the expected collection decodes
//! to no results, never to an error. Server versions differ in what they send.
mod bug_fields;
mod bug_search;
mod comment_bug;
mod get_bug;
mod get_product;
mod update_bug;

pub use bug_fields::*;
pub use bug_search::*;
pub use comment_bug::*;
pub use get_bug::*;
pub use get_product::*;
pub use update_bug::*;

use crate::{
    Record,
    entity::{EntityRecord, FieldAccessError},
    factory::InstantiationError,
};
use serde_json::Value;

/// Errors that can occur while preparing a method or decoding its response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MethodError {
    #[error("Failed to build entity from response: '{0}'")]
    Instantiation(#[from] InstantiationError),
    #[error("Unexpected response shape: '{0}'")]
    FieldAccess(#[from] FieldAccessError),
    #[error("Expected exactly one modified bug, the server reported {0}")]
    UnexpectedUpdateCount(usize),
    #[error("The bug has no id, it was never saved on the server")]
    UnsavedBug,
}

/// A remote method: its name, its parameters and what to do with its response.
pub trait BugzillaMethod {
    fn method_name(&self) -> &'static str;

    /// The parameters sent along with the call.
    fn parameters(&self) -> Record;

    /// Stores the response of the call, replacing any previous one.
    fn set_result(&mut self, response: Record) -> Result<(), MethodError>;
}

/// Returns the sequence stored under `key`, or an empty one when the response has none.
fn collection<'a>(response: Option<&'a EntityRecord>, key: &str) -> Result<&'a [Value], MethodError> {
    match response.and_then(|r| r.get(key)) {
        None | Some(Value::Null) => {
            tracing::debug!(key, "response has no collection, decoding as empty");
            Ok(&[])
        }
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(FieldAccessError::mismatch(key, "a sequence", other).into()),
    }
}

/// Decodes every element of `items` and keeps the last one.
///
/// Get-by-id methods receive at most one element in practice, the fold keeps whatever the
/// server sent last.
fn last_decoded<T>(
    items: &[Value],
    decode: impl FnMut(&Value) -> Result<T, MethodError>,
) -> Result<Option<T>, MethodError> {
    items
        .iter()
        .map(decode)
        .try_fold(None, |_, item| item.map(Some))
}
