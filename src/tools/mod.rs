//! Tool definitions
//!
//! A tool is a named unit of server-side logic with a declared input schema.
//! Every tool implements [`Tool`]; the [`registry::ToolRegistry`] owns them.

pub mod add;
pub mod find_component;
pub mod registry;
pub mod root_path;

use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ToolError;

pub use add::AddTool;
pub use find_component::FindComponentTool;
pub use registry::ToolRegistry;
pub use root_path::FetchRootPathTool;

/// Argument map handed to a tool
pub type ToolArguments = Map<String, Value>;

/// Result map produced by a tool
pub type ToolOutput = Map<String, Value>;

/// A tool that can be registered and invoked by name.
///
/// Implementations must be safe to call from several requests at once.
pub trait Tool: Send + Sync {
    /// Static metadata: name, description and input schema.
    fn describe(&self) -> ToolDescriptor;

    /// Run the tool against already-validated arguments.
    fn execute(&self, args: &ToolArguments) -> Result<ToolOutput, ToolError>;
}

/// Tool metadata, in the shape exported by `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Unique tool name
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Declared parameters
    pub input_schema: InputSchema,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: InputSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Object-typed JSON Schema listing a tool's parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    /// Always `"object"`
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Parameter name to JSON Schema fragment
    #[serde(default)]
    pub properties: Map<String, Value>,

    /// Parameters that must be present
    #[serde(default)]
    pub required: Vec<String>,
}

impl InputSchema {
    /// Schema with no parameters
    pub fn empty() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    /// Derive the schema from a typed argument struct.
    ///
    /// Field doc comments become property descriptions; non-`Option` fields
    /// are required.
    pub fn for_args<T: JsonSchema>() -> Self {
        let root = schemars::schema_for!(T);
        let mut schema = Self::empty();

        if let Some(object) = root.schema.object {
            let object = *object;
            schema.properties = object
                .properties
                .into_iter()
                .map(|(name, property)| (name, schema_value(property)))
                .collect();
            schema.required = object.required.into_iter().collect();
        }

        schema
    }

    /// Add a parameter
    pub fn property(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark a parameter as required
    pub fn require(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Required parameters that are absent (or `null`) in `args`
    pub fn missing<'a>(&'a self, args: &'a ToolArguments) -> impl Iterator<Item = &'a str> + 'a {
        self.required
            .iter()
            .filter(move |name| args.get(name.as_str()).map_or(true, Value::is_null))
            .map(String::as_str)
    }
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::empty()
    }
}

fn schema_value(schema: Schema) -> Value {
    match schema {
        Schema::Bool(accept) => Value::Bool(accept),
        // `true` accepts anything, matching an unrepresentable fragment
        object => serde_json::to_value(object).unwrap_or(Value::Bool(true)),
    }
}

/// Deserialize a tool's argument struct, reporting failures as [`ToolError`].
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(
    args: &ToolArguments,
) -> Result<T, ToolError> {
    Ok(serde_json::from_value(Value::Object(args.clone()))?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct SampleArgs {
        /// Path to inspect
        path: String,
        /// How deep to recurse
        depth: Option<u32>,
    }

    #[test]
    fn test_schema_from_args() {
        let schema = InputSchema::for_args::<SampleArgs>();
        assert_eq!(schema.schema_type, "object");
        assert_eq!(schema.required, vec!["path".to_string()]);
        assert_eq!(schema.properties["path"]["type"], "string");
        assert_eq!(schema.properties["path"]["description"], "Path to inspect");
        assert!(schema.properties.contains_key("depth"));
    }

    #[test]
    fn test_schema_export_shape() {
        let schema = InputSchema::empty()
            .property("x", json!({"type": "number"}))
            .require("x")
            .require("x");
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({"type": "object", "properties": {"x": {"type": "number"}}, "required": ["x"]})
        );
    }

    #[test]
    fn test_descriptor_camel_case() {
        let descriptor = ToolDescriptor::new("noop", "Does nothing", InputSchema::empty());
        let value = serde_json::to_value(&descriptor).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn test_missing_treats_null_as_absent() {
        let schema = InputSchema::empty().require("a").require("b");
        let args = json!({"a": 1, "b": null});
        let args = args.as_object().unwrap();
        let missing: Vec<_> = schema.missing(args).collect();
        assert_eq!(missing, vec!["b"]);
    }
}
