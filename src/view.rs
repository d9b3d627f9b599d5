//! View payloads handed from handler actions to the transport.
//!
//! Rendering is not done here: a [`Page`] names a view and carries its
//! variables, and the HTTP layer serializes it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::routing::{ParamValue, Params};

/// A view to render and the variables available to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub view: String,
    pub vars: Map<String, Value>,
}

impl Page {
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            vars: Map::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn var(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }
}

impl From<&ParamValue> for Value {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Int(v) => Value::from(*v),
            ParamValue::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl From<&Params> for Value {
    fn from(params: &Params) -> Self {
        Value::Object(params.iter().map(|(k, v)| (k.to_string(), Value::from(v))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_vars() {
        let page = Page::new("product")
            .with("title", "Page du produit 3")
            .with("id", &ParamValue::Int(3));
        assert_eq!(page.var("id"), Some(&Value::from(3)));

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["view"], "product");
        assert_eq!(json["vars"]["title"], "Page du produit 3");
    }
}
