//! Application configuration types
//!
//! The diagnostic settings live in `inferdoc_core`; this module adds what
//! only the binary needs (proxy listen address, command-line overrides).

use inferdoc_core::DiagnosticConfig;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub diagnostic: DiagnosticConfig,
    pub server: ServerConfig,
}

/// Proxy listen address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Values given on the command line. `None` leaves the layered value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub max_retries: Option<u32>,
    pub log_level: Option<String>,
    pub models: Option<Vec<String>>,
    pub perf_tests: Option<u32>,
    pub concurrent: Option<usize>,
    pub probe_errors: Option<bool>,
    pub port: Option<u16>,
}
