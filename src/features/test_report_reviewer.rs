//! `TestReportReviewer` feature. Acknowledges the call; review logic is not
//! wired in yet.

use serde_json::json;

use crate::error::ToolError;
use crate::tools::{InputSchema, Tool, ToolArguments, ToolDescriptor, ToolOutput};

pub struct TestReportReviewerFeature;

impl Tool for TestReportReviewerFeature {
    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new("TestReportReviewer", "Test report review", InputSchema::empty())
    }

    fn execute(&self, _args: &ToolArguments) -> Result<ToolOutput, ToolError> {
        let mut output = ToolOutput::new();
        output.insert("status".to_string(), json!("ok"));
        output.insert(
            "message".to_string(),
            json!("Hello you are executing Test report reviewer"),
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledges() {
        let out = TestReportReviewerFeature
            .execute(&ToolArguments::new())
            .unwrap();
        assert_eq!(out["status"], "ok");
    }
}
