//! Gateway Configuration
//!
//! Host, port, the authentication enablement flag, and the version string
//! reported on every response. The flag is injected here once at
//! construction; nothing reads it from ambient global state.

use serde::{Deserialize, Serialize};

/// Admin gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8086)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether protected endpoints require credentials (default: false)
    #[serde(default)]
    pub auth_enabled: bool,

    /// Version reported in the X-Nimbusdb-Version response header
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth_enabled: false,
            version: default_version(),
        }
    }
}

impl GatewayConfig {
    /// Create a new config with the specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Enable the authentication gate
    pub fn with_auth(mut self) -> Self {
        self.auth_enabled = true;
        self
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
