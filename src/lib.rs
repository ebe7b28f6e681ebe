//! MCP Tool Server Library
//!
//! A Model Context Protocol (MCP) server speaking JSON-RPC 2.0 over HTTP.
//! Tools live in an explicitly constructed registry that the dispatcher
//! consults for `tools/list` and `tools/call`; multi-step workflows live in
//! a separate feature registry behind `features/list` and `features/call`.

pub mod config;
pub mod error;
pub mod features;
pub mod mcp;
pub mod tools;

pub use config::Config;
pub use error::{Result, ToolServerError};
pub use features::FeatureRegistry;
pub use mcp::server::McpServer;
pub use tools::{Tool, ToolRegistry};
