//! # Products
//!
//! A product groups bugs on a Bugzilla installation. It owns its versions, components, releases
//! and milestones, which the server sends as nested sequences of records.
//!
//! Children are projected from the raw record every time they are requested and never cached.
//! They are plain values with no link back to the product they came from.
use super::{Entity, EntityRecord, FieldAccessError, RequiredFields};

/// A product on a Bugzilla installation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    record: EntityRecord,
}

impl Product {
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

    pub fn classification(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("classification")
    }

    pub fn default_milestone(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("default_milestone")
    }

    pub fn default_release(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("default_release")
    }

    /// The versions of this product, `None` if the server did not send any.
    pub fn versions(&self) -> Result<Option<Vec<ProductVersion>>, FieldAccessError> {
        self.children("versions")
    }

    /// The components of this product, `None` if the server did not send any.
    pub fn components(&self) -> Result<Option<Vec<ProductComponent>>, FieldAccessError> {
        self.children("components")
    }

    /// The releases of this product, `None` if the server did not send any.
    pub fn releases(&self) -> Result<Option<Vec<ProductRelease>>, FieldAccessError> {
        self.children("releases")
    }

    /// The milestones of this product, `None` if the server did not send any.
    pub fn milestones(&self) -> Result<Option<Vec<ProductMilestone>>, FieldAccessError> {
        self.children("milestones")
    }

    fn children<T: Entity>(&self, field: &str) -> Result<Option<Vec<T>>, FieldAccessError> {
        Ok(self
            .record
            .get_records(field)?
            .map(|records| records.into_iter().map(T::from_record).collect()))
    }
}

impl RequiredFields for Product {
    const REQUIRED_FIELDS: &'static [&'static str] = &[];
}

/// A version of a [`Product`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductVersion {
    record: EntityRecord,
}

impl ProductVersion {
    pub fn id(&self) -> Result<Option<i64>, FieldAccessError> {
        self.record.get_i64("id")
    }

    pub fn name(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.set("name", name.into());
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

/// A component of a [`Product`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductComponent {
    record: EntityRecord,
}

impl ProductComponent {
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

/// A release of a [`Product`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRelease {
    record: EntityRecord,
}

impl ProductRelease {
    pub fn id(&self) -> Result<Option<i64>, FieldAccessError> {
        self.record.get_i64("id")
    }

    pub fn name(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.set("name", name.into());
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

/// A milestone of a [`Product`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductMilestone {
    record: EntityRecord,
}

impl ProductMilestone {
    pub fn id(&self) -> Result<Option<i64>, FieldAccessError> {
        self.record.get_i64("id")
    }

    pub fn name(&self) -> Result<Option<String>, FieldAccessError> {
        self.record.get_string("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.set("name", name.into());
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

record_entity!(
    Product,
    ProductVersion,
    ProductComponent,
    ProductRelease,
    ProductMilestone,
);
