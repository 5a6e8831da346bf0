//! Request body construction from parsed argument values

use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::descriptor::ResourceCommandDescriptor;

/// Parsed value of one argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Single(String),
    /// Every occurrence of a repeatable argument, in command-line order
    Many(Vec<String>),
}

impl From<ArgValue> for Value {
    fn from(value: ArgValue) -> Self {
        match value {
            ArgValue::Single(value) => Value::String(value),
            ArgValue::Many(values) => Value::from(values),
        }
    }
}

/// Parsed argument values keyed by destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgValues {
    values: BTreeMap<String, ArgValue>,
}

impl ArgValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dest: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(dest, ArgValue::Single(value.into()));
        self
    }

    pub fn with_many<I, S>(mut self, dest: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(dest, ArgValue::Many(values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn insert(&mut self, dest: impl Into<String>, value: ArgValue) {
        self.values.insert(dest.into(), value);
    }

    pub fn get(&self, dest: &str) -> Option<&ArgValue> {
        self.values.get(dest)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build `{resource_singular: {field: value, ...}}` from the descriptor's field map.
///
/// Repeatable arguments always yield an array, empty when the flag was never
/// given. Absent optional single-valued arguments are left out of the body.
pub fn build_body(descriptor: &ResourceCommandDescriptor, values: &ArgValues) -> Result<Value> {
    let mut fields = Map::new();

    for (field, dest) in descriptor.body_field_map {
        let spec = descriptor
            .argument(dest)
            .ok_or_else(|| anyhow::anyhow!("Body field '{}' refers to undeclared argument '{}'", field, dest))?;

        let value = match (values.get(dest), spec.repeatable) {
            (Some(ArgValue::Single(value)), true) => Value::from(vec![value.clone()]),
            (Some(value), _) => Value::from(value.clone()),
            (None, true) => Value::Array(Vec::new()),
            (None, false) if spec.required => {
                anyhow::bail!("Missing required argument '{}'", spec.name)
            }
            (None, false) => continue,
        };
        fields.insert((*field).to_string(), value);
    }

    let mut body = Map::new();
    body.insert(descriptor.resource_singular().to_string(), Value::Object(fields));
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::descriptor::{ArgumentSpec, Resource};
    use serde_json::json;

    const POLICIES: Resource = Resource::new("ip_policy", "ip_policies", "/ip_policies");
    const ARGS: &[ArgumentSpec] = &[
        ArgumentSpec::flag("subnet_id", "SUBNET_ID", "Subnet").repeatable(),
        ArgumentSpec::flag("name", "NAME", "Name"),
        ArgumentSpec::flag("label", "LABEL", "Label").required(),
    ];
    const MAP: &[(&str, &str)] = &[("subnet_ids", "subnet_id"), ("name", "name"), ("label", "label")];

    fn descriptor() -> ResourceCommandDescriptor {
        ResourceCommandDescriptor::create(POLICIES, "Create", ARGS, MAP)
    }

    #[test]
    fn renames_fields_and_wraps_in_singular() {
        let values = ArgValues::new()
            .with_many("subnet_id", ["a", "b", "a"])
            .with("name", "web")
            .with("label", "x");

        let body = build_body(&descriptor(), &values).unwrap();
        assert_eq!(
            body,
            json!({"ip_policy": {"subnet_ids": ["a", "b", "a"], "name": "web", "label": "x"}})
        );
    }

    #[test]
    fn absent_repeatable_is_empty_array_and_absent_optional_is_omitted() {
        let values = ArgValues::new().with("label", "x");

        let body = build_body(&descriptor(), &values).unwrap();
        assert_eq!(body, json!({"ip_policy": {"subnet_ids": [], "label": "x"}}));
    }

    #[test]
    fn single_value_for_repeatable_becomes_array() {
        let values = ArgValues::new().with("subnet_id", "a").with("label", "x");

        let body = build_body(&descriptor(), &values).unwrap();
        assert_eq!(body["ip_policy"]["subnet_ids"], json!(["a"]));
    }

    #[test]
    fn missing_required_argument_is_an_error() {
        let err = build_body(&descriptor(), &ArgValues::new()).unwrap_err();
        assert_eq!(err.to_string(), "Missing required argument 'label'");
    }
}
