use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::value::FieldValue;

/// Delimiter used when flattening search containers into a single field
pub const SEARCH_CONTAINER_DELIMITER: &str = ";";

/// Flat snapshot of optimizer state handed to the form layer
pub type FormData = BTreeMap<String, Value>;

/// Field names used by [`Optimizer::data`] and [`Optimizer::apply_data`]
pub mod fields {
    pub const OPTIMIZER_ID: &str = "optimizer_id";
    pub const NAME: &str = "name";
    pub const IS_ACTIVE: &str = "is_active";
    pub const MODEL: &str = "model";
    pub const CONFIG: &str = "config";
    pub const STORE_ID: &str = "store_id";
    pub const FROM_DATE: &str = "from_date";
    pub const TO_DATE: &str = "to_date";
    pub const SEARCH_CONTAINER: &str = "search_container";
    pub const SEARCH_CONTAINERS: &str = "search_containers";
}

/// Optimizer - a ranking adjustment scoped to a store and an optional date range
///
/// Applies inside one or more search containers. The relation to those
/// containers lives in its own table; this record carries two views of it:
///
/// - `search_container`: the `;`-joined names read back from storage
/// - `search_containers`: a caller-supplied list that replaces the stored
///   relation set on the next save (`None` leaves the stored set alone)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Optimizer {
    id: Option<i64>,
    name: String,
    is_active: bool,
    model: String,
    config: Value,
    store_id: i64,
    from_date: String,
    to_date: String,
    search_container: String,
    search_containers: Option<Vec<String>>,
}

impl Optimizer {
    /// Create an empty, never-persisted optimizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary key, `None` until the first save
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Record the store-assigned id.
    ///
    /// The id is write-once: returns `false` and leaves the optimizer
    /// unchanged if an id is already present.
    pub fn assign_id(&mut self, id: i64) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<FieldValue>) -> &mut Self {
        self.name = name.into().to_text();
        self
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_is_active(&mut self, status: impl Into<FieldValue>) -> &mut Self {
        self.is_active = status.into().to_bool();
        self
    }

    /// Identifier of the ranking strategy this optimizer uses
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<FieldValue>) -> &mut Self {
        self.model = model.into().to_text();
        self
    }

    /// Structured strategy configuration (`Value::Null` when unset)
    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn set_config(&mut self, config: Value) -> &mut Self {
        self.config = config;
        self
    }

    pub fn store_id(&self) -> i64 {
        self.store_id
    }

    pub fn set_store_id(&mut self, store_id: impl Into<FieldValue>) -> &mut Self {
        self.store_id = store_id.into().to_int();
        self
    }

    pub fn from_date(&self) -> &str {
        &self.from_date
    }

    pub fn set_from_date(&mut self, from_date: impl Into<FieldValue>) -> &mut Self {
        self.from_date = from_date.into().to_text();
        self
    }

    pub fn to_date(&self) -> &str {
        &self.to_date
    }

    pub fn set_to_date(&mut self, to_date: impl Into<FieldValue>) -> &mut Self {
        self.to_date = to_date.into().to_text();
        self
    }

    /// Search containers as a single `;`-joined string
    pub fn search_container(&self) -> &str {
        &self.search_container
    }

    pub fn set_search_container(&mut self, search_container: impl Into<FieldValue>) -> &mut Self {
        self.search_container = search_container.into().to_text();
        self
    }

    /// Split the flattened field back into names, dropping empty segments
    pub fn search_container_names(&self) -> Vec<String> {
        self.search_container
            .split(SEARCH_CONTAINER_DELIMITER)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Relation set to write on the next save, if the caller supplied one
    pub fn search_containers(&self) -> Option<&[String]> {
        self.search_containers.as_deref()
    }

    pub fn set_search_containers<I, S>(&mut self, containers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_containers = Some(containers.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the pending relation set so the next save leaves relations alone
    pub fn clear_pending_search_containers(&mut self) -> &mut Self {
        self.search_containers = None;
        self
    }

    /// Flat field-name → value snapshot for the form layer
    pub fn data(&self) -> FormData {
        let mut data = FormData::new();
        if let Some(id) = self.id {
            data.insert(fields::OPTIMIZER_ID.to_string(), Value::from(id));
        }
        data.insert(fields::NAME.to_string(), Value::from(self.name.clone()));
        data.insert(fields::IS_ACTIVE.to_string(), Value::from(self.is_active));
        data.insert(fields::MODEL.to_string(), Value::from(self.model.clone()));
        data.insert(fields::CONFIG.to_string(), self.config.clone());
        data.insert(fields::STORE_ID.to_string(), Value::from(self.store_id));
        data.insert(
            fields::FROM_DATE.to_string(),
            Value::from(self.from_date.clone()),
        );
        data.insert(fields::TO_DATE.to_string(), Value::from(self.to_date.clone()));
        data.insert(
            fields::SEARCH_CONTAINER.to_string(),
            Value::from(self.search_container.clone()),
        );
        if let Some(containers) = &self.search_containers {
            data.insert(
                fields::SEARCH_CONTAINERS.to_string(),
                Value::from(containers.clone()),
            );
        }
        data
    }

    /// Set fields from a flat JSON object, e.g. a submitted form.
    ///
    /// Keys follow [`fields`]; unknown keys are ignored. `optimizer_id` only
    /// takes effect on an optimizer without an id, and only when positive.
    /// `search_containers` accepts an array or a `;`-joined string.
    pub fn apply_data(&mut self, data: &Map<String, Value>) -> &mut Self {
        for (key, value) in data {
            match key.as_str() {
                fields::OPTIMIZER_ID => {
                    let id = FieldValue::from(value).to_int();
                    if id > 0 {
                        self.assign_id(id);
                    }
                }
                fields::NAME => {
                    self.set_name(value);
                }
                fields::IS_ACTIVE => {
                    self.set_is_active(value);
                }
                fields::MODEL => {
                    self.set_model(value);
                }
                fields::CONFIG => {
                    self.set_config(value.clone());
                }
                fields::STORE_ID => {
                    self.set_store_id(value);
                }
                fields::FROM_DATE => {
                    self.set_from_date(value);
                }
                fields::TO_DATE => {
                    self.set_to_date(value);
                }
                fields::SEARCH_CONTAINER => {
                    self.set_search_container(value);
                }
                fields::SEARCH_CONTAINERS => match value {
                    Value::Array(items) => {
                        self.set_search_containers(
                            items.iter().map(|item| FieldValue::from(item).to_text()),
                        );
                    }
                    Value::Null => {
                        self.clear_pending_search_containers();
                    }
                    other => {
                        let joined = FieldValue::from(other).to_text();
                        self.set_search_containers(
                            joined
                                .split(SEARCH_CONTAINER_DELIMITER)
                                .filter(|name| !name.is_empty())
                                .map(str::to_string)
                                .collect::<Vec<_>>(),
                        );
                    }
                },
                _ => {}
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_optimizer_is_empty() {
        let optimizer = Optimizer::new();

        assert_eq!(optimizer.id(), None);
        assert_eq!(optimizer.name(), "");
        assert!(!optimizer.is_active());
        assert_eq!(optimizer.config(), &Value::Null);
        assert_eq!(optimizer.store_id(), 0);
        assert!(optimizer.search_containers().is_none());
        assert!(optimizer.search_container_names().is_empty());
    }

    #[test]
    fn test_setters_coerce() {
        let mut optimizer = Optimizer::new();
        optimizer
            .set_is_active(1)
            .set_store_id("3")
            .set_name(12)
            .set_from_date(None::<String>);

        assert!(optimizer.is_active());
        assert_eq!(optimizer.store_id(), 3);
        assert_eq!(optimizer.name(), "12");
        assert_eq!(optimizer.from_date(), "");
    }

    #[test]
    fn test_id_is_write_once() {
        let mut optimizer = Optimizer::new();

        assert!(optimizer.assign_id(5));
        assert!(!optimizer.assign_id(6));
        assert_eq!(optimizer.id(), Some(5));
    }

    #[test]
    fn test_search_container_names_split() {
        let mut optimizer = Optimizer::new();
        optimizer.set_search_container("catalog_view;;catalog_search");

        assert_eq!(
            optimizer.search_container_names(),
            vec!["catalog_view".to_string(), "catalog_search".to_string()]
        );
    }

    #[test]
    fn test_data_snapshot_omits_missing_id() {
        let optimizer = Optimizer::new();
        let data = optimizer.data();

        assert!(!data.contains_key(fields::OPTIMIZER_ID));
        assert!(!data.contains_key(fields::SEARCH_CONTAINERS));
        assert_eq!(data.get(fields::IS_ACTIVE), Some(&json!(false)));
    }

    #[test]
    fn test_data_snapshot_values() {
        let mut optimizer = Optimizer::new();
        optimizer.assign_id(8);
        optimizer
            .set_name("Boost A")
            .set_config(json!({"boost_factor": 2}))
            .set_search_containers(["catalog_search"]);

        let data = optimizer.data();
        assert_eq!(data.get(fields::OPTIMIZER_ID), Some(&json!(8)));
        assert_eq!(data.get(fields::NAME), Some(&json!("Boost A")));
        assert_eq!(data.get(fields::CONFIG), Some(&json!({"boost_factor": 2})));
        assert_eq!(
            data.get(fields::SEARCH_CONTAINERS),
            Some(&json!(["catalog_search"]))
        );
    }

    #[test]
    fn test_apply_data_from_form_post() {
        let post = json!({
            "optimizer_id": "14",
            "name": "Seasonal",
            "is_active": "1",
            "store_id": "2",
            "config": {"boost": {"constant_score_value": 10}},
            "search_containers": ["quick_search_container", "catalog_view_container"],
            "unknown": "ignored"
        });
        let mut optimizer = Optimizer::new();
        optimizer.apply_data(post.as_object().unwrap());

        assert_eq!(optimizer.id(), Some(14));
        assert_eq!(optimizer.name(), "Seasonal");
        assert!(optimizer.is_active());
        assert_eq!(optimizer.store_id(), 2);
        assert_eq!(
            optimizer.config(),
            &json!({"boost": {"constant_score_value": 10}})
        );
        assert_eq!(
            optimizer.search_containers(),
            Some(
                &[
                    "quick_search_container".to_string(),
                    "catalog_view_container".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn test_apply_data_joined_containers_and_bad_id() {
        let post = json!({"optimizer_id": "abc", "search_containers": "a;b"});
        let mut optimizer = Optimizer::new();
        optimizer.apply_data(post.as_object().unwrap());

        assert_eq!(optimizer.id(), None);
        assert_eq!(
            optimizer.search_containers(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }
}
