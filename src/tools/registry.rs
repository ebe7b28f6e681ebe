//! Tool registry
//!
//! Catalog of the tools this server exposes. Built once at startup, then
//! shared read-only between requests.

use std::collections::HashMap;

use crate::error::RegistryError;
use crate::tools::{
    AddTool, FetchRootPathTool, FindComponentTool, Tool, ToolArguments, ToolDescriptor, ToolOutput,
};

/// A registered tool together with the descriptor captured at registration
struct Entry {
    descriptor: ToolDescriptor,
    tool: Box<dyn Tool>,
}

/// Registry mapping tool names to tools.
///
/// Names are unique: registering a name twice is rejected and the first
/// registration stays in place. Listing follows registration order.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in tools
    pub fn with_builtin_tools() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(AddTool)?;
        registry.register(FindComponentTool)?;
        registry.register(FetchRootPathTool)?;
        Ok(registry)
    }

    /// Register a tool under the name from its descriptor
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        let descriptor = tool.describe();
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateName {
                name: descriptor.name,
            });
        }

        tracing::info!(tool = %descriptor.name, "Registered tool");
        self.index.insert(descriptor.name.clone(), self.entries.len());
        self.entries.push(Entry {
            descriptor,
            tool: Box::new(tool),
        });
        Ok(())
    }

    /// Get a tool's descriptor by name
    pub fn get(&self, name: &str) -> Result<&ToolDescriptor, RegistryError> {
        self.entry(name).map(|entry| &entry.descriptor)
    }

    /// List all tool descriptors in registration order
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.entries
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Names of all tools in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.descriptor.name.as_str())
            .collect()
    }

    /// Check whether a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke a tool by name.
    ///
    /// Required arguments declared in the tool's schema are checked before
    /// the tool runs. Any failure inside the tool, including argument
    /// coercion, comes back as [`RegistryError::Execution`].
    pub fn invoke(&self, name: &str, args: &ToolArguments) -> Result<ToolOutput, RegistryError> {
        let entry = self.entry(name)?;

        if let Some(field) = entry.descriptor.input_schema.missing(args).next() {
            return Err(RegistryError::MissingArgument {
                tool: name.to_string(),
                field: field.to_string(),
            });
        }

        entry
            .tool
            .execute(args)
            .map_err(|source| RegistryError::Execution {
                tool: name.to_string(),
                source,
            })
    }

    fn entry(&self, name: &str) -> Result<&Entry, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::error::ToolError;
    use crate::tools::InputSchema;

    struct EchoTool {
        name: &'static str,
    }

    impl Tool for EchoTool {
        fn describe(&self) -> ToolDescriptor {
            ToolDescriptor::new(
                self.name,
                "Echo the message back",
                InputSchema::empty()
                    .property("message", json!({"type": "string"}))
                    .require("message"),
            )
        }

        fn execute(&self, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
            let mut out = ToolOutput::new();
            out.insert("echo".to_string(), args["message"].clone());
            Ok(out)
        }
    }

    struct FailingTool;

    impl Tool for FailingTool {
        fn describe(&self) -> ToolDescriptor {
            ToolDescriptor::new("fail", "Always fails", InputSchema::empty())
        }

        fn execute(&self, _args: &ToolArguments) -> Result<ToolOutput, ToolError> {
            Err(ToolError::failed("boom"))
        }
    }

    fn args(value: Value) -> ToolArguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool { name: "echo" }).unwrap();

        assert!(registry.contains("echo"));
        assert_eq!(registry.get("echo").unwrap().description, "Echo the message back");
        assert!(matches!(
            registry.get("missing"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool { name: "echo" }).unwrap();

        let err = registry.register(EchoTool { name: "echo" }).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { ref name } if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool { name: "zeta" }).unwrap();
        registry.register(EchoTool { name: "alpha" }).unwrap();
        registry.register(FailingTool).unwrap();

        let names: Vec<String> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "fail"]);
        assert_eq!(registry.names(), vec!["zeta", "alpha", "fail"]);
    }

    #[test]
    fn test_invoke() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool { name: "echo" }).unwrap();

        let out = registry.invoke("echo", &args(json!({"message": "hi"}))).unwrap();
        assert_eq!(out["echo"], "hi");
    }

    #[test]
    fn test_invoke_missing_argument() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool { name: "echo" }).unwrap();

        let err = registry.invoke("echo", &args(json!({}))).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingArgument { ref field, .. } if field == "message"
        ));
    }

    #[test]
    fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("nope", &ToolArguments::new()).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { ref name } if name == "nope"));
    }

    #[test]
    fn test_invoke_wraps_tool_failure() {
        let mut registry = ToolRegistry::new();
        registry.register(FailingTool).unwrap();

        let err = registry.invoke("fail", &ToolArguments::new()).unwrap_err();
        match err {
            RegistryError::Execution { tool, source } => {
                assert_eq!(tool, "fail");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_builtin_tools() {
        let registry = ToolRegistry::with_builtin_tools().unwrap();
        assert_eq!(
            registry.names(),
            vec!["add", "find_component", "fetch_root_path"]
        );
        assert!(!registry.is_empty());
    }
}
