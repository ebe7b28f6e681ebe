//! Feature registry
//!
//! Features are multi-step workflows served through `features/list` and
//! `features/call`. They share the [`Tool`] contract but live in their own
//! catalog, so they never show up in `tools/list`.

pub mod failsafe_docgen;
pub mod test_report_reviewer;

use crate::error::RegistryError;
use crate::tools::{Tool, ToolArguments, ToolDescriptor, ToolOutput, ToolRegistry};

pub use failsafe_docgen::FailsafeDocGenFeature;
pub use test_report_reviewer::TestReportReviewerFeature;

/// Registry of named features.
///
/// Same rules as [`ToolRegistry`]: unique names, registration order kept.
/// Lookup and execution failures are reported as feature errors.
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    features: ToolRegistry,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in features
    pub fn with_builtin_features() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(FailsafeDocGenFeature)?;
        registry.register(TestReportReviewerFeature)?;
        Ok(registry)
    }

    pub fn register<T: Tool + 'static>(&mut self, feature: T) -> Result<(), RegistryError> {
        self.features.register(feature)
    }

    /// Feature descriptors in registration order
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.features.list()
    }

    pub fn names(&self) -> Vec<&str> {
        self.features.names()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.contains(name)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Run a feature by name
    pub fn invoke(&self, name: &str, args: &ToolArguments) -> Result<ToolOutput, RegistryError> {
        tracing::info!(feature = name, "Calling feature");

        self.features.invoke(name, args).map_err(|err| match err {
            RegistryError::NotFound { name } => RegistryError::FeatureNotFound { name },
            RegistryError::Execution { tool, source } => RegistryError::FeatureFailed {
                feature: tool,
                source,
            },
            other => other,
        })
    }
}
