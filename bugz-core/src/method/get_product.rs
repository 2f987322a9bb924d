use super::{BugzillaMethod, MethodError, collection, last_decoded};
use crate::{
    Record,
    entity::{EntityRecord, Product},
    factory::ProductFactory,
};
use serde_json::Value;

const METHOD_NAME: &str = "Product.get";

/// Fetches a single product by id or by name.
#[derive(Debug, Clone)]
pub struct GetProduct {
    params: Record,
    response: Option<EntityRecord>,
}

impl GetProduct {
    pub fn by_id(id: i64) -> Self {
        Self::new("ids", Value::from(id))
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self::new("names", Value::String(name.into()))
    }

    fn new(key: &str, value: Value) -> Self {
        let mut params = Record::new();
        params.insert(key.to_string(), value);
        Self {
            params,
            response: None,
        }
    }

    /// The fetched product, `None` if the server returned no product.
    pub fn product(&self) -> Result<Option<Product>, MethodError> {
        let factory = ProductFactory::new();
        let products = collection(self.response.as_ref(), "products")?;

        last_decoded(products, |raw| Ok(factory.create(raw)?))
    }
}

impl BugzillaMethod for GetProduct {
    fn method_name(&self) -> &'static str {
        METHOD_NAME
    }

    fn parameters(&self) -> Record {
        self.params.clone()
    }

    fn set_result(&mut self, response: Record) -> Result<(), MethodError> {
        self.response = Some(EntityRecord::from(response));
        Ok(())
    }
}
