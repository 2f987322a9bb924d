use super::{BugzillaMethod, MethodError, collection};
use crate::{
    Record,
    entity::{BugEntity, EntityRecord},
    factory::BugFactory,
};
use serde_json::Value;

const METHOD_NAME: &str = "Bug.search";

/// The bug fields commonly used to narrow down a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchLimiter {
    Owner,
    Reporter,
    Status,
    Resolution,
    Priority,
    Product,
    Component,
    OperatingSystem,
    Platform,
    Summary,
    Version,
    Alias,
}

impl SearchLimiter {
    /// The parameter name the server expects for this limiter.
    pub fn field_name(&self) -> &'static str {
        match self {
            SearchLimiter::Owner => "assigned_to",
            SearchLimiter::Reporter => "reporter",
            SearchLimiter::Status => "status",
            SearchLimiter::Resolution => "resolution",
            SearchLimiter::Priority => "priority",
            SearchLimiter::Product => "product",
            SearchLimiter::Component => "component",
            SearchLimiter::OperatingSystem => "op_sys",
            SearchLimiter::Platform => "platform",
            SearchLimiter::Summary => "summary",
            SearchLimiter::Version => "version",
            SearchLimiter::Alias => "alias",
        }
    }
}

/// Searches bugs matching every constraint added to it.
///
/// Constraints combine with a logical AND. Adding a constraint on a field that is already
/// constrained replaces the previous value.
#[derive(Debug, Clone)]
pub struct BugSearch<T> {
    params: Record,
    factory: BugFactory<T>,
    response: Option<EntityRecord>,
}

impl<T: BugEntity> BugSearch<T> {
    pub fn new() -> Self {
        Self {
            params: Record::new(),
            factory: BugFactory::new(),
            response: None,
        }
    }

    /// A search with a single `field` = `value` constraint.
    pub fn with_query(field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut search = Self::new();
        search.add_query_param(field, value);
        search
    }

    /// Decodes bugs through `factory` instead of the default one for `T`.
    pub fn with_factory(mut self, factory: BugFactory<T>) -> Self {
        self.factory = factory;
        self
    }

    /// Constrains the search on any field the server knows, custom fields included.
    pub fn add_query_param(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(field.into(), value.into());
    }

    pub fn add_limiter(&mut self, limiter: SearchLimiter, value: impl Into<Value>) {
        self.add_query_param(limiter.field_name(), value);
    }

    /// Caps the number of returned bugs.
    pub fn set_limit(&mut self, limit: u64) {
        self.add_query_param("limit", limit);
    }

    /// Skips the first `offset` matches, used together with [`BugSearch::set_limit`].
    pub fn set_offset(&mut self, offset: u64) {
        self.add_query_param("offset", offset);
    }

    /// The matching bugs, in the order the server returned them.
    pub fn search_results(&self) -> Result<Vec<T>, MethodError> {
        collection(self.response.as_ref(), "bugs")?
            .iter()
            .map(|raw| self.factory.create(raw).map_err(MethodError::from))
            .collect()
    }
}

impl<T: BugEntity> Default for BugSearch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BugEntity> BugzillaMethod for BugSearch<T> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Bug, EcsBug};
    use serde_json::json;

    fn response(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("responses must be objects"),
        }
    }

    #[test]
    fn test_constraints_accumulate() {
        let mut search = BugSearch::<Bug>::with_query("cf_build_id", "20240101");
        search.add_limiter(SearchLimiter::Product, "Firefox");
        search.add_limiter(SearchLimiter::Owner, "dev@example.org");
        search.add_limiter(SearchLimiter::OperatingSystem, "Linux");
        search.set_limit(50);

        assert_eq!(
            Value::Object(search.parameters()),
            json!({
                "cf_build_id": "20240101",
                "product": "Firefox",
                "assigned_to": "dev@example.org",
                "op_sys": "Linux",
                "limit": 50
            })
        );
    }

    #[test]
    fn test_same_field_is_replaced() {
        let mut search = BugSearch::<Bug>::new();
        search.add_limiter(SearchLimiter::Status, "NEW");
        search.add_limiter(SearchLimiter::Status, "ASSIGNED");

        assert_eq!(search.parameters()["status"], "ASSIGNED");
    }

    #[test]
    fn test_results_keep_server_order_without_version_fixup() {
        let mut search = BugSearch::<EcsBug>::new();
        search
            .set_result(response(json!({
                "bugs": [
                    { "bug_id": 3, "internals": { "version": 1.0 } },
                    { "bug_id": 1 }
                ]
            })))
            .unwrap();

        let bugs = search.search_results().unwrap();

        assert_eq!(bugs.len(), 2);
        assert_eq!(bugs[0].id().unwrap(), Some(3));
        assert_eq!(bugs[0].version().unwrap(), None);
        assert_eq!(bugs[1].id().unwrap(), Some(1));
    }

    #[test]
    fn test_missing_or_empty_bugs_is_empty() {
        let mut search = BugSearch::<Bug>::new();
        assert!(search.search_results().unwrap().is_empty());

        search.set_result(Record::new()).unwrap();
        assert!(search.search_results().unwrap().is_empty());

        search.set_result(response(json!({ "bugs": [] }))).unwrap();
        assert!(search.search_results().unwrap().is_empty());
    }

    #[test]
    fn test_bugs_of_wrong_shape_is_an_error() {
        let mut search = BugSearch::<Bug>::new();
        search.set_result(response(json!({ "bugs": "none" }))).unwrap();

        assert!(matches!(
            search.search_results(),
            Err(MethodError::FieldAccess(_))
        ));
    }
}
