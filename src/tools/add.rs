//! `add` tool: sums two numbers.

use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::tools::{parse_args, InputSchema, Tool, ToolArguments, ToolDescriptor, ToolOutput};

/// Adds two numbers together
pub struct AddTool;

#[derive(Debug, Deserialize, JsonSchema)]
struct AddArgs {
    /// First number to add
    #[serde(deserialize_with = "coerce_number")]
    #[schemars(with = "f64")]
    a: f64,

    /// Second number to add
    #[serde(deserialize_with = "coerce_number")]
    #[schemars(with = "f64")]
    b: f64,
}

impl Tool for AddTool {
    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "add",
            "Add two numbers together and return the result",
            InputSchema::for_args::<AddArgs>(),
        )
    }

    fn execute(&self, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
        let AddArgs { a, b } = parse_args(args)?;

        let sum = a + b;
        if !sum.is_finite() {
            return Err(ToolError::failed(format!("{a:?} + {b:?} overflows")));
        }

        tracing::info!(a, b, sum, "Add operation");

        let mut output = ToolOutput::new();
        output.insert("result".to_string(), json!(sum));
        output.insert("operation".to_string(), json!(format!("{a:?} + {b:?}")));
        output.insert(
            "timestamp".to_string(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Ok(output)
    }
}

/// Accept JSON numbers as well as strings holding a number
fn coerce_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(serde::de::Error::custom(format!(
            "expected a number, got {value}"
        ))),
    }
}
