use serde_json::{Map, Value, json};

use super::Schema;

/// SchemaBuilder helps construct JSON Schema incrementally
///
/// Properties keep their insertion order in `required`, so building the same
/// schema twice yields identical JSON.
#[derive(Default)]
pub struct SchemaBuilder {
    schema_type: String,
    title: Option<String>,
    description: Option<String>,
    properties: Map<String, Value>,
    required: Vec<String>,
    items: Option<Value>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            ..Default::default()
        }
    }

    pub fn object() -> Self {
        Self::new()
    }

    pub fn array(items: Value) -> Self {
        let mut builder = Self::new();
        builder.schema_type = "array".to_string();
        builder.items = Some(items);
        builder
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        property_schema: Value,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), property_schema);
        if required && !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    pub fn build(self) -> Schema {
        let mut schema = json!({
            "type": self.schema_type
        });

        if let Some(title) = self.title {
            schema["title"] = json!(title);
        }

        if let Some(description) = self.description {
            schema["description"] = json!(description);
        }

        if self.schema_type == "object" {
            if !self.properties.is_empty() {
                schema["properties"] = Value::Object(self.properties);
            }
            if !self.required.is_empty() {
                schema["required"] = json!(self.required);
            }
        } else if let Some(items) = self.items {
            schema["items"] = items;
        }

        Schema::new(schema)
    }
}
