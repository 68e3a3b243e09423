//! Response schemas for structured model output.
//!
//! The typed structs in [`crate::review`] and [`crate::debate`] derive
//! `JsonSchema`; [`ResponseSchema`] compiles one of them into the JSON
//! Schema document a provider binding attaches to its request.

use schemars::JsonSchema;
use serde_json::Value;

/// A named JSON Schema for a structured reply (Value Object)
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    name: String,
    schema: Value,
}

impl ResponseSchema {
    /// Compile the schema of `T` under `name`.
    pub fn of<T: JsonSchema>(name: impl Into<String>) -> Self {
        let root = schemars::schema_for!(T);
        Self {
            name: name.into(),
            schema: serde_json::to_value(root).unwrap_or(Value::Null),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Pretty JSON of the schema, for embedding in instructions.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.schema).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::CriticReview;

    #[test]
    fn test_critic_schema_has_two_fields() {
        let schema = ResponseSchema::of::<CriticReview>("critic_review");
        assert_eq!(schema.name(), "critic_review");
        let props = schema.schema()["properties"].as_object().unwrap();
        let mut names: Vec<&str> = props.keys().map(String::as_str).collect();
        names.sort();
        assert_eq!(names, vec!["accepted", "reasoning"]);
        assert_eq!(schema.schema()["additionalProperties"], Value::Bool(false));
    }

    #[test]
    fn test_pretty_json_is_parsable() {
        let schema = ResponseSchema::of::<CriticReview>("critic_review");
        let back: Value = serde_json::from_str(&schema.to_pretty_json()).unwrap();
        assert_eq!(&back, schema.schema());
    }
}
