use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

// Default timeout functions
fn default_connect_timeout() -> u64 {
  5
}

fn default_request_timeout() -> u64 {
  30
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub backend: BackendConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Which backend adapter to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
  /// The remote document service over its REST API.
  Rest,
  /// The in-memory backend; development only.
  Memory,
}

/// Document service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
  pub mode: BackendMode,
  pub url: String,
  /// API key/secret pair for token authentication against the service.
  pub api_key: Option<String>,
  pub api_secret: Option<String>,
  #[serde(default = "default_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_request_timeout")]
  pub request_timeout_seconds: u64,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override
  /// earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with ERPGATE_ prefix
  ///
  /// Environment variables use the ERPGATE_ prefix and are separated by
  /// double underscores:
  /// - `ERPGATE_SERVER__HOST=0.0.0.0`
  /// - `ERPGATE_SERVER__PORT=8080`
  /// - `ERPGATE_BACKEND__URL=http://erp.local:8000`
  /// - `ERPGATE_BACKEND__API_KEY=...`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("ERPGATE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [backend]
            mode = "rest"
            url = "http://localhost:8000"
            api_key = "key"
            api_secret = "secret"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.backend.mode, BackendMode::Rest);
    assert_eq!(config.backend.url, "http://localhost:8000");
    assert_eq!(config.backend.api_key.as_deref(), Some("key"));
    assert_eq!(config.backend.connect_timeout_seconds, 5); // default
    assert_eq!(config.backend.request_timeout_seconds, 30); // default
  }

  #[test]
  fn test_memory_mode_needs_no_credentials() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [backend]
            mode = "memory"
            url = ""
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");
    assert_eq!(config.backend.mode, BackendMode::Memory);
    assert_eq!(config.backend.api_key, None);
  }
}
