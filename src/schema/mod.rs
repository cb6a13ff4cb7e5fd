mod builder;
pub use builder::SchemaBuilder;

use serde_json::Value;

/// Schema is a representation of a JSON Schema that describes the structure
/// the provider should return.
///
/// Only the subset the provider understands is modelled: `type`,
/// `properties`, `required` and `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub schema: Value,
}

impl Schema {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn to_json(&self) -> &Value {
        &self.schema
    }

    /// Create a schema builder for an object type
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::object()
    }

    /// Check `value` against this schema.
    ///
    /// Returns every violation found, each prefixed with the JSON path
    /// (`$`, `$.age`, `$.image_tags[2]`). A `null` optional property counts
    /// as absent; a `null` required property is a violation.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), Vec<String>> {
        let mut violations = Vec::new();
        check(&self.schema, value, "$", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// SchemaType trait defines a type that can be converted to a JSON Schema
pub trait SchemaType {
    /// Generate a JSON Schema representation of this type
    fn schema() -> Schema;

    /// Optional name for the schema
    fn schema_name() -> Option<String> {
        None
    }
}

fn check(schema: &Value, value: &Value, path: &str, violations: &mut Vec<String>) {
    let Some(expected) = schema.get("type").and_then(Value::as_str) else {
        return;
    };

    let matches = match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        _ => true,
    };
    if !matches {
        violations.push(format!(
            "{path}: expected {expected}, found {}",
            json_kind(value)
        ));
        return;
    }

    match value {
        Value::Object(fields) => {
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for name in required.iter().filter_map(Value::as_str) {
                    match fields.get(name) {
                        None => violations.push(format!("{path}: missing required field `{name}`")),
                        Some(Value::Null) => {
                            violations.push(format!("{path}.{name}: required field is null"))
                        }
                        Some(_) => {}
                    }
                }
            }
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (name, property_schema) in properties {
                    match fields.get(name) {
                        None | Some(Value::Null) => {}
                        Some(field) => {
                            check(property_schema, field, &format!("{path}.{name}"), violations)
                        }
                    }
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for (idx, item) in items.iter().enumerate() {
                    check(item_schema, item, &format!("{path}[{idx}]"), violations);
                }
            }
        }
        _ => {}
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests;
