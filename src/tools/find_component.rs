//! `find_component` tool: resolves a component keyword to its full name.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::tools::{InputSchema, Tool, ToolArguments, ToolDescriptor, ToolOutput};

/// Known keywords, matched case-insensitively
const COMPONENTS: &[(&str, &str)] = &[
    ("rbwss", "Wheel Speed Sensor"),
    ("rbrfp", "Return Flow Pump - DC motor"),
];

/// Looks up a component by keyword
pub struct FindComponentTool;

impl Tool for FindComponentTool {
    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "find_component",
            "Find component name based on keyword. Supports keywords: \
             rbwss (Wheel Speed Sensor), rbrfp (Return Flow Pump - DC motor)",
            InputSchema::empty()
                .property(
                    "keyword",
                    json!({
                        "type": "string",
                        "description": "Component keyword to search for (e.g., 'rbwss', 'rbrfp')"
                    }),
                )
                .require("keyword"),
        )
    }

    fn execute(&self, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
        let keyword = match args.get("keyword") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        if keyword.trim().is_empty() {
            return Err(ToolError::InvalidArguments {
                message: "Parameter 'keyword' is required and cannot be empty".to_string(),
            });
        }

        let mut output = ToolOutput::new();
        match lookup(&keyword) {
            Some(component) => {
                tracing::info!(keyword = %keyword, component, "Found component");
                output.insert("found".to_string(), json!(true));
                output.insert("component_name".to_string(), json!(component));
                output.insert(
                    "message".to_string(),
                    json!(format!("Component found: {component}")),
                );
            }
            None => {
                tracing::info!(keyword = %keyword, "Component not found");
                let available: Vec<&str> = COMPONENTS.iter().map(|(key, _)| *key).collect();
                output.insert("found".to_string(), json!(false));
                output.insert("component_name".to_string(), Value::Null);
                output.insert(
                    "message".to_string(),
                    json!(format!("Component not found for keyword '{keyword}'")),
                );
                output.insert("available_keywords".to_string(), json!(available));
            }
        }
        output.insert("keyword".to_string(), json!(keyword));
        output.insert(
            "timestamp".to_string(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Ok(output)
    }
}

fn lookup(keyword: &str) -> Option<&'static str> {
    let keyword = keyword.trim().to_lowercase();
    COMPONENTS
        .iter()
        .find(|(key, _)| *key == keyword)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: Value) -> Result<ToolOutput, ToolError> {
        FindComponentTool.execute(args.as_object().unwrap())
    }

    #[test]
    fn test_found_case_insensitive() {
        let out = run(json!({"keyword": " RBWSS "})).unwrap();
        assert_eq!(out["found"], true);
        assert_eq!(out["component_name"], "Wheel Speed Sensor");
        assert_eq!(out["keyword"], " RBWSS ");
        assert!(out.get("available_keywords").is_none());
    }

    #[test]
    fn test_not_found_lists_keywords() {
        let out = run(json!({"keyword": "rbabs"})).unwrap();
        assert_eq!(out["found"], false);
        assert!(out["component_name"].is_null());
        assert_eq!(out["available_keywords"], json!(["rbwss", "rbrfp"]));
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let err = run(json!({"keyword": "  "})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn test_schema() {
        let schema = FindComponentTool.describe().input_schema;
        assert_eq!(schema.required, vec!["keyword"]);
        assert_eq!(schema.properties["keyword"]["type"], "string");
    }
}
