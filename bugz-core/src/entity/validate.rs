use super::{Entity, EntityRecord, RequiredFields};

/// A locally authored record lacks a key its entity variant requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required field '{field}'")]
pub struct MissingFieldError {
    pub field: String,
}

/// Checks that every key in `required` is present in `record`.
///
/// Only presence is checked: a key holding `null` or an empty string passes. The first absent
/// key, in declaration order, is reported.
pub fn check_required_fields(
    record: &EntityRecord,
    required: &[&str],
) -> Result<(), MissingFieldError> {
    match required.iter().find(|key| !record.contains(key)) {
        Some(key) => Err(MissingFieldError {
            field: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// Builds a new entity of variant `T` from `record`, checking `T`'s required fields first.
pub fn validated<T>(record: EntityRecord) -> Result<T, MissingFieldError>
where
    T: Entity + RequiredFields,
{
    check_required_fields(&record, T::REQUIRED_FIELDS)?;
    Ok(T::from_record(record))
}
