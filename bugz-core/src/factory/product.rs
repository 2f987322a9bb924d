use super::{InstantiationError, wrap};
use crate::{
    Record,
    entity::{
        Entity, EntityRecord, MissingFieldError, Product, ProductMilestone, ProductRelease,
        RequiredFields, check_required_fields,
    },
};
use serde_json::Value;

/// Creates products, either from server records or through a builder session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFactory;

impl ProductFactory {
    pub fn new() -> Self {
        Self
    }

    /// Wraps a product received from the server. The value must be a record.
    pub fn create(&self, raw: &Value) -> Result<Product, InstantiationError> {
        wrap(Product::from_record, raw)
    }

    /// Wraps a copy of `record`.
    pub fn create_from_record(&self, record: &Record) -> Product {
        Product::from_record(EntityRecord::from(record.clone()))
    }

    /// Opens a builder session for a new product.
    ///
    /// Like [`super::BugFactory::begin`], the session borrows the factory until it is
    /// finished:
    ///
    /// ```compile_fail
    /// use bugz_core::factory::ProductFactory;
    ///
    /// let mut factory = ProductFactory::new();
    /// let first = factory.begin();
    /// let second = factory.begin();
    /// let _ = first.set_name("Firefox").finish();
    /// ```
    pub fn begin(&mut self) -> ProductBuilder<'_> {
        ProductBuilder {
            _factory: self,
            record: EntityRecord::new(),
        }
    }
}

/// An open builder session of a [`ProductFactory`].
#[derive(Debug)]
pub struct ProductBuilder<'a> {
    _factory: &'a mut ProductFactory,
    record: EntityRecord,
}

impl ProductBuilder<'_> {
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.record.set("name", name.into());
        self
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.record.set("description", description.into());
        self
    }

    pub fn set_classification(mut self, classification: impl Into<String>) -> Self {
        self.record.set("classification", classification.into());
        self
    }

    /// Only the milestone's name is sent to the server.
    pub fn set_default_milestone(mut self, milestone: &ProductMilestone) -> Self {
        let name = milestone.record().get("name").cloned().unwrap_or(Value::Null);
        self.record.set("default_milestone", name);
        self
    }

    /// Only the release's name is sent to the server.
    pub fn set_default_release(mut self, release: &ProductRelease) -> Self {
        let name = release.record().get("name").cloned().unwrap_or(Value::Null);
        self.record.set("default_release", name);
        self
    }

    /// Closes the session, checking the fields required by [`Product`].
    pub fn finish(self) -> Result<Product, MissingFieldError> {
        check_required_fields(&self.record, Product::REQUIRED_FIELDS)?;
        Ok(Product::from_record(self.record))
    }
}
