use super::{BugzillaMethod, MethodError, collection, last_decoded};
use crate::{
    Record,
    entity::{BugField, Entity, EntityRecord},
    factory::wrap,
};
use serde_json::Value;

const METHOD_NAME: &str = "Bug.fields";

fn field_params(key: &str, value: Value) -> Record {
    let mut params = Record::new();
    params.insert(key.to_string(), value);
    params
}

fn decode_fields(response: Option<&EntityRecord>) -> Result<Vec<BugField>, MethodError> {
    collection(response, "fields")?
        .iter()
        .map(|raw| wrap(BugField::from_record, raw).map_err(MethodError::from))
        .collect()
}

/// Fetches the definition of a single bug field.
#[derive(Debug, Clone)]
pub struct GetBugField {
    params: Record,
    response: Option<EntityRecord>,
}

impl GetBugField {
    pub fn by_id(id: i64) -> Self {
        Self {
            params: field_params("ids", Value::from(id)),
            response: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            params: field_params("names", Value::String(name.into())),
            response: None,
        }
    }

    /// The field definition, `None` if the server returned none.
    pub fn bug_field(&self) -> Result<Option<BugField>, MethodError> {
        let fields = collection(self.response.as_ref(), "fields")?;

        last_decoded(fields, |raw| Ok(wrap(BugField::from_record, raw)?))
    }
}

impl BugzillaMethod for GetBugField {
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

/// Fetches bug field definitions, keeping every field the server returns.
#[derive(Debug, Clone)]
pub struct BugFields {
    params: Record,
    response: Option<EntityRecord>,
}

impl BugFields {
    pub fn by_id(id: i64) -> Self {
        Self {
            params: field_params("ids", Value::from(id)),
            response: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            params: field_params("names", Value::String(name.into())),
            response: None,
        }
    }

    /// Every returned field definition, in server order.
    pub fn bug_fields(&self) -> Result<Vec<BugField>, MethodError> {
        decode_fields(self.response.as_ref())
    }
}

impl BugzillaMethod for BugFields {
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
