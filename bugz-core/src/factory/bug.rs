use super::{Constructor, InstantiationError, wrap};
use crate::{
    Record,
    entity::{BugEntity, EntityRecord, MissingFieldError, check_required_fields},
};
use serde_json::Value;

/// Creates bugs of variant `T`, either from server records or through a builder session.
///
/// ## Example
///
/// ```rust
/// use bugz_core::entity::{Bug, BugEntity};
/// use bugz_core::factory::BugFactory;
///
/// let mut factory = BugFactory::<Bug>::new();
/// let bug = factory
///     .begin()
///     .set_product("Firefox")
///     .set_component("Toolbar")
///     .set_summary("Back button does nothing")
///     .set_version("128")
///     .finish()
///     .unwrap();
///
/// assert_eq!(bug.product().unwrap().as_deref(), Some("Firefox"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BugFactory<T> {
    constructor: Constructor<T>,
}

impl<T: BugEntity> BugFactory<T> {
    pub fn new() -> Self {
        Self::with_constructor(T::from_record)
    }

    /// Creates a factory installing records through `constructor` instead of
    /// [`crate::entity::Entity::from_record`].
    pub fn with_constructor(constructor: Constructor<T>) -> Self {
        Self { constructor }
    }

    /// Wraps a bug received from the server. The value must be a record.
    pub fn create(&self, raw: &Value) -> Result<T, InstantiationError> {
        wrap(self.constructor, raw)
    }

    /// Wraps a copy of `record`.
    pub fn create_from_record(&self, record: &Record) -> T {
        (self.constructor)(EntityRecord::from(record.clone()))
    }

    /// Opens a builder session for a new bug.
    ///
    /// The session borrows the factory until it is finished, so a second session cannot be
    /// opened in the meantime:
    ///
    /// ```compile_fail
    /// use bugz_core::entity::Bug;
    /// use bugz_core::factory::BugFactory;
    ///
    /// let mut factory = BugFactory::<Bug>::new();
    /// let first = factory.begin();
    /// let second = factory.begin();
    /// let _ = first.set_product("Firefox").finish();
    /// ```
    ///
    /// Setters only exist on an open session:
    ///
    /// ```compile_fail
    /// use bugz_core::entity::Bug;
    /// use bugz_core::factory::BugFactory;
    ///
    /// let mut factory = BugFactory::<Bug>::new();
    /// factory.set_product("Firefox");
    /// ```
    ///
    /// And a finished session cannot be reused:
    ///
    /// ```compile_fail
    /// use bugz_core::entity::Bug;
    /// use bugz_core::factory::BugFactory;
    ///
    /// let mut factory = BugFactory::<Bug>::new();
    /// let session = factory.begin().set_product("Firefox");
    /// let _ = session.finish();
    /// let _ = session.set_summary("again");
    /// ```
    pub fn begin(&mut self) -> BugBuilder<'_, T> {
        BugBuilder {
            factory: self,
            record: EntityRecord::new(),
        }
    }
}

impl<T: BugEntity> Default for BugFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An open builder session of a [`BugFactory`].
#[derive(Debug)]
pub struct BugBuilder<'a, T> {
    factory: &'a mut BugFactory<T>,
    record: EntityRecord,
}

impl<T: BugEntity> BugBuilder<'_, T> {
    /// Bugzilla limits aliases to 20 characters by default.
    pub fn set_alias(mut self, alias: impl Into<String>) -> Self {
        self.record.set("alias", alias.into());
        self
    }

    pub fn set_operating_system(mut self, os: impl Into<String>) -> Self {
        self.record.set("op_sys", os.into());
        self
    }

    pub fn set_platform(mut self, platform: impl Into<String>) -> Self {
        self.record.set("platform", platform.into());
        self
    }

    pub fn set_priority(mut self, priority: u8) -> Self {
        self.record.set("priority", priority.to_string());
        self
    }

    pub fn set_product(mut self, product: impl Into<String>) -> Self {
        self.record.set("product", product.into());
        self
    }

    pub fn set_component(mut self, component: impl Into<String>) -> Self {
        self.record.set("component", component.into());
        self
    }

    pub fn set_summary(mut self, summary: impl Into<String>) -> Self {
        self.record.set("summary", summary.into());
        self
    }

    pub fn set_version(mut self, version: impl Into<String>) -> Self {
        self.record.set("version", version.into());
        self
    }

    /// The description becomes the first comment of the bug.
    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.record.set("description", description.into());
        self
    }

    /// Closes the session, checking that every field required by `T` was set.
    pub fn finish(self) -> Result<T, MissingFieldError> {
        check_required_fields(&self.record, T::REQUIRED_FIELDS)?;
        Ok((self.factory.constructor)(self.record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Bug, EcsBug, Entity};
    use serde_json::json;

    #[test]
    fn test_builder_round_trip() {
        let mut factory = BugFactory::<Bug>::new();

        let bug = factory
            .begin()
            .set_product("P")
            .set_component("C")
            .set_summary("S")
            .set_version("V")
            .finish()
            .unwrap();

        assert_eq!(bug.product().unwrap().as_deref(), Some("P"));
        assert_eq!(bug.component().unwrap().as_deref(), Some("C"));
        assert_eq!(bug.summary().unwrap().as_deref(), Some("S"));
        assert_eq!(bug.version().unwrap().as_deref(), Some("V"));
    }

    #[test]
    fn test_builder_reports_missing_required_field() {
        let mut factory = BugFactory::<Bug>::new();

        let err = factory
            .begin()
            .set_product("P")
            .set_component("C")
            .set_version("V")
            .finish()
            .unwrap_err();

        assert_eq!(err.field, "summary");
    }

    #[test]
    fn test_factory_can_be_reused_after_finish() {
        let mut factory = BugFactory::<EcsBug>::new();

        let first = factory.begin().set_product("A").finish().unwrap();
        let second = factory
            .begin()
            .set_product("B")
            .set_priority(1)
            .finish()
            .unwrap();

        assert_eq!(first.product().unwrap().as_deref(), Some("A"));
        assert_eq!(second.priority().unwrap(), Some(1));
        assert_eq!(first.priority().unwrap(), None);
    }

    #[test]
    fn test_wrap_skips_validation() {
        let factory = BugFactory::<Bug>::new();

        let bug = factory.create(&json!({ "id": 3 })).unwrap();

        assert_eq!(bug.id().unwrap(), Some(3));
        assert_eq!(bug.summary().unwrap(), None);
    }

    #[test]
    fn test_wrap_copies_the_record() {
        let factory = BugFactory::<Bug>::new();
        let raw = json!({ "summary": "original" });

        let mut bug = factory.create(&raw).unwrap();
        bug.set_summary("changed");

        assert_eq!(raw["summary"], "original");
    }

    #[test]
    fn test_wrap_rejects_non_records() {
        let factory = BugFactory::<Bug>::new();

        let err = factory.create(&json!([1, 2])).unwrap_err();

        assert_eq!(err.found, "a sequence");
    }

    #[test]
    fn test_custom_constructor_is_used() {
        fn tagged(mut record: EntityRecord) -> Bug {
            record.set("cf_origin", "local");
            Bug::from_record(record)
        }
        let factory = BugFactory::with_constructor(tagged);

        let bug = factory.create(&json!({})).unwrap();

        assert_eq!(bug.record().get_str("cf_origin").unwrap(), Some("local"));
    }
}
