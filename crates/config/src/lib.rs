use std::path::Path;

use serde::Deserialize;
use strip_ansi_escapes::strip;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "TASKBOARD_CONFIG";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite://taskboard.sqlite?mode=rwc";
/// Log level used until a configured one is known.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the optional config file, then environment overrides.
    pub fn load() -> Self {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                Self::from_file_or_default(Path::new(path.trim()))
            }
            _ => Self::default(),
        };
        base.with_env_overrides().normalized()
    }

    fn from_file_or_default(config_path: &Path) -> Self {
        match load_config_from_file(config_path) {
            Ok(config) => config,
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}, using defaults", config_path.display());
                Self::default()
            }
            Err(ConfigError::Json(err)) => {
                tracing::warn!(
                    "Failed to parse config (line {}, column {}): {}, using default",
                    err.line(),
                    err.column(),
                    err
                );
                Self::default()
            }
            Err(err) => {
                tracing::warn!("Failed to read config file: {}", err);
                Self::default()
            }
        }
    }

    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if self.host.trim().is_empty() {
            self.host = defaults.host;
        }
        if self.database_url.trim().is_empty() {
            self.database_url = defaults.database_url;
        }
        if self.log_level.trim().is_empty() {
            self.log_level = defaults.log_level;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("BACKEND_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|raw| parse_port(&raw))
        {
            self.port = port;
        }
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            self.database_url = database_url;
        }
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            self.log_level = log_level;
        }
        self
    }
}

/// Parses a port value, ignoring ANSI escape codes some shells leave behind.
fn parse_port(raw: &str) -> Option<u16> {
    let cleaned = String::from_utf8(strip(raw.as_bytes())).ok()?;
    match cleaned.trim().parse::<u16>() {
        Ok(port) => Some(port),
        Err(err) => {
            tracing::warn!("Ignoring invalid port '{}': {}", cleaned.trim(), err);
            None
        }
    }
}

pub fn load_config_from_file(config_path: &Path) -> Result<AppConfig, ConfigError> {
    let raw_config = std::fs::read_to_string(config_path)?;
    Ok(serde_json::from_str::<AppConfig>(&raw_config)?.normalized())
}
