//! # Entities
//!
//! Typed views over the key-value records exchanged with a Bugzilla server.
//!
//! Every entity owns an [`EntityRecord`] and exposes typed accessors on top of it. The record
//! is the source of truth: accessors read from it and setters write to it, so an entity can
//! always be turned back into outbound parameters with [`Entity::as_export_map`].
//!
//! Entities come into existence in two ways:
//!
//! 1. **Wrapped** from a record received from the server. No validation happens, responses only
//!    carry the fields relevant to the query that produced them.
//! 2. **Built** locally, through [`validated`] or a factory builder session. The record must
//!    contain every key the variant declares in [`RequiredFields::REQUIRED_FIELDS`].

/// Implements [`Entity`] for a struct holding its record in a `record` field.
macro_rules! record_entity {
    ($($entity:ty),+ $(,)?) => {$(
        impl $crate::entity::Entity for $entity {
            fn from_record(record: $crate::entity::EntityRecord) -> Self {
                Self { record }
            }

            fn record(&self) -> &$crate::entity::EntityRecord {
                &self.record
            }

            fn record_mut(&mut self) -> &mut $crate::entity::EntityRecord {
                &mut self.record
            }

            fn into_record(self) -> $crate::entity::EntityRecord {
                self.record
            }
        }
    )+};
}

mod bug;
mod comment;
mod field;
mod product;
mod record;
mod validate;

pub use bug::*;
pub use comment::*;
pub use field::*;
pub use product::*;
pub use record::*;
pub use validate::*;

use crate::Record;

/// A typed wrapper over an [`EntityRecord`].
pub trait Entity: Sized {
    /// Installs `record` as the backing record of a new entity, without any validation.
    fn from_record(record: EntityRecord) -> Self;

    fn record(&self) -> &EntityRecord;

    fn record_mut(&mut self) -> &mut EntityRecord;

    fn into_record(self) -> EntityRecord;

    /// Read-only snapshot of the backing record, ready to be sent to the server.
    fn as_export_map(&self) -> Record {
        self.record().as_export_map()
    }
}

/// Capability of an entity variant to declare which keys a locally authored record must hold.
pub trait RequiredFields {
    const REQUIRED_FIELDS: &'static [&'static str];
}
