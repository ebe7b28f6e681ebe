//! MCP (Model Context Protocol) module
//!
//! JSON-RPC 2.0 dispatch for the MCP tool surface, and its HTTP transport.

pub mod http;
pub mod server;
pub mod types;
