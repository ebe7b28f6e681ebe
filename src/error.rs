//! Error types for the MCP tool server
//!
//! This module defines the error hierarchy for all operations in the server.
//! Protocol-level failures are not represented here: they travel as
//! [`JsonRpcError`](crate::mcp::types::JsonRpcError) objects.

use thiserror::Error;

/// Main error type for the MCP tool server
#[derive(Error, Debug)]
pub enum ToolServerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tool registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// HTTP transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port '{value}': expected an integer between 0 and 65535")]
    InvalidPort { value: String },

    #[error("Invalid host: '{value}'")]
    InvalidHost { value: String },
}

/// Tool and feature registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Already registered: {name}")]
    DuplicateName { name: String },

    #[error("Tool not found: {name}")]
    NotFound { name: String },

    #[error("Missing required argument '{field}' for tool '{tool}'")]
    MissingArgument { tool: String, field: String },

    #[error("Tool '{tool}' failed: {source}")]
    Execution {
        tool: String,
        #[source]
        source: ToolError,
    },

    #[error("Feature not found: {name}")]
    FeatureNotFound { name: String },

    #[error("Feature '{feature}' failed: {source}")]
    FeatureFailed {
        feature: String,
        #[source]
        source: ToolError,
    },
}

/// Errors raised by a tool's (or feature's) own behavior
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("{message}")]
    Failed { message: String },
}

impl ToolError {
    /// Shorthand for [`ToolError::Failed`]
    pub fn failed(message: impl Into<String>) -> Self {
        ToolError::Failed {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::InvalidArguments {
            message: err.to_string(),
        }
    }
}

/// HTTP transport errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {message}")]
    Serve { message: String },
}

/// Result type alias for MCP tool server operations
pub type Result<T> = std::result::Result<T, ToolServerError>;
