//! Output Shape Descriptors
//!
//! A JSON-schema-like description of the value an agent is asked to produce.
//! Serializes in the uppercase `type` dialect that Gemini's `responseSchema`
//! accepts; [`OutputSchema::to_json_schema`] renders the lowercase JSON Schema
//! dialect used by OpenAI-compatible endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Primitive or structural type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
}

impl SchemaType {
    /// Lowercase JSON Schema name.
    pub fn json_schema_name(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Number => "number",
        }
    }
}

/// Structural description of the expected backend output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, OutputSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<OutputSchema>>,
}

impl OutputSchema {
    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: None,
            required: None,
            items: None,
        }
    }

    /// Create a string schema
    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    /// Create a number schema
    pub fn number() -> Self {
        Self::leaf(SchemaType::Number)
    }

    /// Create an object schema from `(name, schema)` pairs.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, OutputSchema)>,
        K: Into<String>,
    {
        Self {
            properties: Some(
                properties
                    .into_iter()
                    .map(|(k, v)| (k.into(), v))
                    .collect(),
            ),
            ..Self::leaf(SchemaType::Object)
        }
    }

    /// Create an array schema
    pub fn array(items: OutputSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// Create an array-of-strings schema
    pub fn string_list() -> Self {
        Self::array(Self::string())
    }

    /// Mark properties as required.
    pub fn with_required(mut self, names: &[&str]) -> Self {
        self.required = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Check structural consistency of the descriptor tree.
    pub fn validate(&self) -> CoreResult<()> {
        match self.schema_type {
            SchemaType::Object => {
                let props = self
                    .properties
                    .as_ref()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| CoreError::validation("object schema has no properties"))?;
                if let Some(required) = &self.required {
                    if let Some(missing) = required.iter().find(|r| !props.contains_key(*r)) {
                        return Err(CoreError::validation(format!(
                            "required property '{missing}' is not declared"
                        )));
                    }
                }
                props.values().try_for_each(OutputSchema::validate)
            }
            SchemaType::Array => self
                .items
                .as_ref()
                .ok_or_else(|| CoreError::validation("array schema has no items"))?
                .validate(),
            SchemaType::String | SchemaType::Number => Ok(()),
        }
    }

    /// Render as a lowercase JSON Schema document.
    pub fn to_json_schema(&self) -> serde_json::Value {
        let mut out = serde_json::json!({ "type": self.schema_type.json_schema_name() });
        if let Some(props) = &self.properties {
            let rendered: serde_json::Map<String, serde_json::Value> = props
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json_schema()))
                .collect();
            out["properties"] = serde_json::Value::Object(rendered);
        }
        if let Some(required) = &self.required {
            out["required"] = serde_json::json!(required);
        }
        if let Some(items) = &self.items {
            out["items"] = items.to_json_schema();
        }
        out
    }
}
