use super::{BugzillaMethod, MethodError, collection, last_decoded};
use crate::{
    Record,
    entity::{BugEntity, EntityRecord},
    factory::BugFactory,
};
use serde_json::Value;

const METHOD_NAME: &str = "Bug.get";

/// Fetches a single bug by id or alias.
#[derive(Debug, Clone)]
pub struct GetBug<T> {
    ids: Value,
    factory: BugFactory<T>,
    response: Option<EntityRecord>,
}

impl<T: BugEntity> GetBug<T> {
    pub fn by_id(id: i64) -> Self {
        Self::new(Value::from(id))
    }

    pub fn by_alias(alias: impl Into<String>) -> Self {
        Self::new(Value::String(alias.into()))
    }

    /// Decodes bugs through `factory` instead of the default one for `T`.
    pub fn with_factory(mut self, factory: BugFactory<T>) -> Self {
        self.factory = factory;
        self
    }

    fn new(ids: Value) -> Self {
        Self {
            ids,
            factory: BugFactory::new(),
            response: None,
        }
    }

    /// The fetched bug, `None` if the server returned no bug.
    ///
    /// Older servers do not report `version` on the bug itself, only inside its `internals`.
    /// When that happens the internal version is copied to the bug as a string.
    pub fn bug(&self) -> Result<Option<T>, MethodError> {
        let bugs = collection(self.response.as_ref(), "bugs")?;

        last_decoded(bugs, |raw| match raw {
            Value::Object(bug) if !bug.contains_key("version") => {
                let mut bug = bug.clone();
                if let Some(version) = internal_version(&bug) {
                    tracing::debug!(%version, "bug has no version, using the internal one");
                    bug.insert("version".to_string(), Value::String(version));
                }
                Ok(self.factory.create_from_record(&bug))
            }
            raw => Ok(self.factory.create(raw)?),
        })
    }
}

impl<T: BugEntity> BugzillaMethod for GetBug<T> {
    fn method_name(&self) -> &'static str {
        METHOD_NAME
    }

    fn parameters(&self) -> Record {
        let mut params = Record::new();
        params.insert("ids".to_string(), self.ids.clone());
        params
    }

    fn set_result(&mut self, response: Record) -> Result<(), MethodError> {
        self.response = Some(EntityRecord::from(response));
        Ok(())
    }
}

fn internal_version(bug: &Record) -> Option<String> {
    match bug.get("internals")?.get("version")? {
        // Numeric versions are reported as floats, `7.0` must read "7.0"
        Value::Number(n) => n.as_f64().map(|v| format!("{v:?}")),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
