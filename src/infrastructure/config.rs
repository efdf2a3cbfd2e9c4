use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::domain::common::DEFAULT_PAGE_SIZE;

fn default_log_filter() -> String {
  "factureo=debug".to_string()
}

fn default_page_size() -> usize {
  DEFAULT_PAGE_SIZE
}

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub logging: LoggingConfig,
  #[serde(default)]
  pub security: SecurityConfig,
  #[serde(default)]
  pub data: DataConfig,
  #[serde(default)]
  pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
  #[serde(default = "default_log_filter")]
  pub filter: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      filter: default_log_filter(),
    }
  }
}

/// Which password hashing strategy the container wires in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordHasherKind {
  #[default]
  Placeholder,
  Argon2,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
  #[serde(default)]
  pub password_hasher: PasswordHasherKind,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
  /// Load the demo account, clients and invoices on startup
  #[serde(default)]
  pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
  #[serde(default = "default_page_size")]
  pub page_size: usize,
}

impl Default for PaginationConfig {
  fn default() -> Self {
    Self {
      page_size: default_page_size(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists, RUN_MODE defaults to "development")
  /// 4. Environment variables with the FACTUREO_ prefix, sections separated
  ///    by double underscores: `FACTUREO_PAGINATION__PAGE_SIZE=25`
  ///
  /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if config/default.toml is missing or a value has
  /// the wrong type.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("FACTUREO")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
