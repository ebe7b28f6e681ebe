//! `fetch_root_path` tool: collects the project root path from the client.
//!
//! The path is never guessed. Without one the tool answers with an
//! `input_required` status telling the client to ask the user.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::error::ToolError;
use crate::tools::{parse_args, InputSchema, Tool, ToolArguments, ToolDescriptor, ToolOutput};

const DESCRIPTION: &str = "Step 1: Prompt the user to enter the Project Root path. \
Do NOT assume, infer, or auto-fill the path. \
Step 2: Receive the path from the client and pass it to this tool.";

/// Asks for, then echoes back, the project root path
pub struct FetchRootPathTool;

#[derive(Debug, Deserialize, JsonSchema)]
struct FetchRootPathArgs {
    /// Absolute path to the root of your project.
    #[serde(default)]
    project_root: Option<String>,
}

impl Tool for FetchRootPathTool {
    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "fetch_root_path",
            DESCRIPTION,
            InputSchema::for_args::<FetchRootPathArgs>(),
        )
    }

    fn execute(&self, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
        let args: FetchRootPathArgs = parse_args(args)?;

        let mut output = ToolOutput::new();
        match args.project_root.as_deref().map(str::trim) {
            Some(root) if !root.is_empty() => {
                output.insert("status".to_string(), json!("ok"));
                output.insert("project_root".to_string(), json!(root));
                output.insert(
                    "confirmation".to_string(),
                    json!(format!("Project root path received: {root}")),
                );
            }
            _ => {
                output.insert("status".to_string(), json!("input_required"));
                output.insert("request_type".to_string(), json!("project_root"));
                output.insert(
                    "message".to_string(),
                    json!(
                        "Please enter the absolute path to your project root folder. \
                         Do NOT assume, infer, or auto-fill the path."
                    ),
                );
                output.insert("prompt".to_string(), json!("Enter project root folder path:"));
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn run(args: Value) -> ToolOutput {
        FetchRootPathTool.execute(args.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_prompts_when_missing() {
        let out = run(json!({}));
        assert_eq!(out["status"], "input_required");
        assert_eq!(out["request_type"], "project_root");
        assert_eq!(out["prompt"], "Enter project root folder path:");
        assert_eq!(run(json!({"project_root": "   "}))["status"], "input_required");
    }

    #[test]
    fn test_echoes_path() {
        let out = run(json!({"project_root": "/work/project"}));
        assert_eq!(out["status"], "ok");
        assert_eq!(out["project_root"], "/work/project");
        assert_eq!(out["confirmation"], "Project root path received: /work/project");
    }

    #[test]
    fn test_nothing_required() {
        let descriptor = FetchRootPathTool.describe();
        assert!(descriptor.input_schema.required.is_empty());
        assert!(descriptor.input_schema.properties.contains_key("project_root"));
    }
}
