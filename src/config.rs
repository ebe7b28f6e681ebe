//! Configuration management for the MCP tool server
//!
//! Handles the listen address, read from environment variables and
//! optionally overridden on the command line.

use crate::error::{ConfigError, Result};

/// Environment variable holding the bind address
pub const HOST_ENV: &str = "MCP_HOST";

/// Environment variable holding the listen port
pub const PORT_ENV: &str = "MCP_PORT";

/// Default bind address (loopback only)
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration for the MCP tool server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bind address (IP or hostname)
    pub host: String,

    /// Listen port
    pub port: u16,
}

impl Config {
    /// Create a configuration from the process environment
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup(HOST_ENV) {
            Some(host) => validate_host(host)?,
            None => DEFAULT_HOST.to_string(),
        };

        let port = match lookup(PORT_ENV) {
            Some(port) => parse_port(&port)?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    /// Apply command-line overrides on top of this configuration
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Result<Self> {
        if let Some(host) = host {
            self.host = validate_host(host)?;
        }
        if let Some(port) = port {
            self.port = port;
        }
        Ok(self)
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            // bare IPv6 literal
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Base URL clients should use to reach the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind_address())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

fn validate_host(host: String) -> Result<String> {
    let trimmed = host.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidHost { value: host }.into());
    }
    Ok(trimmed.to_string())
}

fn parse_port(value: &str) -> Result<u16> {
    value.trim().parse::<u16>().map_err(|_| {
        ConfigError::InvalidPort {
            value: value.to_string(),
        }
        .into()
    })
}

/// Server identity constants
pub mod server {
    /// Name reported in `initialize` and `/health`
    pub const NAME: &str = "mcp-tool-server";

    /// Version reported in `initialize` and `/health`
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Protocol label reported by the HTTP endpoints
    pub const PROTOCOL: &str = "JSON-RPC 2.0";
}
