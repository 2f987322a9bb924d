//! # Entity Factories
//!
//! Factories construct entities in one of two modes:
//!
//! * **Wrap mode** (`create`): takes a raw value received from the server, copies it and
//!   installs the copy as the backing record of a new entity. Required fields are **not**
//!   checked, a response only carries what the query asked for.
//! * **Builder mode** (`begin` .. `finish`): opens a session accumulating fields for a new,
//!   locally authored entity. `finish` checks the required fields of the target variant.
//!
//! A builder session mutably borrows its factory, so only one session per factory can be open
//! at a time, setters only exist on an open session, and `finish` consumes the session.
//! Misusing a session is a compile error rather than a runtime one.
mod bug;
mod product;

pub use bug::*;
pub use product::*;

use crate::entity::{EntityRecord, value_kind};
use serde_json::Value;

/// Builds an entity variant from its backing record.
///
/// Each factory is handed the constructor of the variant it produces.
pub type Constructor<T> = fn(EntityRecord) -> T;

/// A raw value could not be turned into an entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot build an entity from {found}, expected a record")]
pub struct InstantiationError {
    pub found: &'static str,
}

/// Wraps a copy of `raw` with `constructor`.
pub(crate) fn wrap<T>(constructor: Constructor<T>, raw: &Value) -> Result<T, InstantiationError> {
    match raw {
        Value::Object(map) => Ok(constructor(EntityRecord::from(map.clone()))),
        other => Err(InstantiationError {
            found: value_kind(other),
        }),
    }
}
