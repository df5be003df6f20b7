//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, environment
//! and command-line flags, lowest to highest priority.

use super::config::{AppConfig, ConfigOverrides, ServerConfig};
use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use inferdoc_core::DiagnosticConfig;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Environment prefix for every setting (`TOGETHER_AI_API_KEY`, ...)
pub const ENV_PREFIX: &str = "TOGETHER_AI";

/// Alternate spelling accepted for the API key only
pub const ALT_API_KEY_VAR: &str = "TOGETHERAI_API_KEY";

fn apply_overrides(
    builder: ConfigBuilder<config::builder::DefaultState>,
    overrides: &ConfigOverrides,
) -> Result<ConfigBuilder<config::builder::DefaultState>> {
    let builder = builder
        .set_override_option("api_key", overrides.api_key.clone())?
        .set_override_option("base_url", overrides.base_url.clone())?
        .set_override_option("timeout", overrides.timeout.map(|v| v as i64))?
        .set_override_option("max_retries", overrides.max_retries.map(i64::from))?
        .set_override_option("log_level", overrides.log_level.clone())?
        .set_override_option("models_to_test", overrides.models.clone())?
        .set_override_option("perf_tests", overrides.perf_tests.map(i64::from))?
        .set_override_option("concurrent", overrides.concurrent.map(|v| v as i64))?
        .set_override_option("probe_errors", overrides.probe_errors)?
        .set_override_option("server.port", overrides.port.map(i64::from))?;
    Ok(builder)
}

/// Load configuration from files, environment and flags
pub fn load_config(overrides: &ConfigOverrides) -> Result<AppConfig> {
    let builder = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. Local overrides (optional)
        .add_source(File::with_name("inferdoc").required(false))
        // 3. Environment variables
        // prefix_separator("_") keeps TOGETHER_AI_API_KEY working; config-rs
        // 0.14 otherwise uses "__" after the prefix as well.
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("models_to_test"),
        );
    // 4. Command-line flags (highest priority)
    let config = apply_overrides(builder, overrides)?
        .build()
        .context("Failed to build configuration")?;

    let server = match config.get::<ServerConfig>("server") {
        Ok(server) => server,
        Err(ConfigError::NotFound(_)) => ServerConfig::default(),
        Err(e) => return Err(e).context("Failed to read [server] configuration"),
    };
    let mut diagnostic: DiagnosticConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    if diagnostic.api_key.trim().is_empty() {
        if let Ok(key) = std::env::var(ALT_API_KEY_VAR) {
            diagnostic.api_key = key;
        }
    }
    diagnostic.models_to_test.retain(|m| !m.trim().is_empty());

    Ok(AppConfig { diagnostic, server })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_embedded_defaults_deserialize() {
        let config: DiagnosticConfig = defaults().try_deserialize().unwrap();
        let expected = DiagnosticConfig::default();
        assert_eq!(config.base_url, expected.base_url);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.perf_test_count, 3);
        assert_eq!(config.concurrent_requests, 5);
        assert_eq!(config.models_to_test, expected.models_to_test);
        assert_eq!(config.check_timeout_seconds, 120);
        assert!(config.api_key.is_empty());
        assert!(!config.probe_errors);
    }

    #[test]
    fn test_embedded_server_section() {
        let server: ServerConfig = defaults().get("server").unwrap();
        assert_eq!(server.port, 5000);
        assert_eq!(server.host, "0.0.0.0");
    }

    #[test]
    fn test_overrides_win() {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        let overrides = ConfigOverrides {
            api_key: Some("tgp_override_key".to_string()),
            timeout: Some(9),
            models: Some(vec!["x-1b".to_string(), "y-2b".to_string()]),
            probe_errors: Some(true),
            port: Some(8080),
            ..Default::default()
        };
        let config = apply_overrides(builder, &overrides).unwrap().build().unwrap();

        let server: ServerConfig = config.get("server").unwrap();
        let diagnostic: DiagnosticConfig = config.try_deserialize().unwrap();
        assert_eq!(diagnostic.api_key, "tgp_override_key");
        assert_eq!(diagnostic.timeout_seconds, 9);
        assert_eq!(diagnostic.models_to_test, vec!["x-1b", "y-2b"]);
        assert!(diagnostic.probe_errors);
        assert_eq!(diagnostic.max_retries, 3);
        assert_eq!(server.port, 8080);
    }
}
