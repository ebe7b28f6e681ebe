//! `FailsafeDocGen` feature: plans failsafe document generation.
//!
//! The server does no generation itself. Given a failure word it returns
//! the ordered steps the client should run with its own tools; without one
//! it asks for it.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::error::ToolError;
use crate::tools::{parse_args, InputSchema, Tool, ToolArguments, ToolDescriptor, ToolOutput};

pub struct FailsafeDocGenFeature;

#[derive(Debug, Deserialize, JsonSchema)]
struct DocGenArgs {
    /// Failure word or identifier for failsafe document generation
    #[serde(default)]
    failure_word: Option<String>,

    /// Firmware name (optional, can be used as failure word)
    #[serde(default)]
    fw_name: Option<String>,
}

impl Tool for FailsafeDocGenFeature {
    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "FailsafeDocGen",
            "Failsafe document generation workflow - returns execution plan for client LLM",
            InputSchema::for_args::<DocGenArgs>(),
        )
    }

    fn execute(&self, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
        let args: DocGenArgs = parse_args(args)?;

        let failure_word = args
            .failure_word
            .into_iter()
            .chain(args.fw_name)
            .map(|word| word.trim().to_string())
            .find(|word| !word.is_empty());

        let mut output = ToolOutput::new();
        let Some(failure_word) = failure_word else {
            output.insert("status".to_string(), json!("input_required"));
            output.insert("request_type".to_string(), json!("failure_word"));
            output.insert(
                "message".to_string(),
                json!("Please provide the failure word to proceed."),
            );
            output.insert("prompt".to_string(), json!("Enter failure word:"));
            return Ok(output);
        };

        tracing::info!(failure_word = %failure_word, "Prepared failsafe document plan");

        output.insert("status".to_string(), json!("plan_ready"));
        output.insert("prompt".to_string(), json!(plan(&failure_word)));
        output.insert("failure_word".to_string(), json!(failure_word));
        Ok(output)
    }
}

fn plan(failure_word: &str) -> String {
    [
        format!("Step 1: Confirm the failure word with the user (given: '{failure_word}')."),
        "Step 2: Call the 'find_component' tool with the failure word to get the component path."
            .to_string(),
        "Step 3: Strip a leading 'FW_' from the failure word. Using the component path as the \
         search root, recursively search every file in every subfolder for the normalized \
         failure word and for related identifiers such as \
         'DemConf_DemEventParameter_<failure_word>'. Keep the list of matching files."
            .to_string(),
        "Step 4: Call the splitter file parser tool (splitter_file_parser) with the failure word \
         and the component path."
            .to_string(),
        "Step 5: For each relevant function or process found in step 3, call the \
         'code_understanding' tool with the function name, the failure word and the component \
         path to extract the monitoring logic."
            .to_string(),
        "Return the results of steps 3, 4 and 5 to the user.".to_string(),
    ]
    .join("\n")
}
