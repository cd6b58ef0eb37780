//! Service configuration
//!
//! YAML file merged with `CALCSRV_`-prefixed environment variables, so
//! `CALCSRV_SERVICE_PORT=9000` overrides `service.port`.

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CalcSrvError, Result};

const DEFAULT_CONFIG_FILE: &str = "config/calcsrv.yaml";
const ENV_PREFIX: &str = "CALCSRV_";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_service_name() -> String {
    "calcsrv".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            host: default_host(),
            port: default_port(),
        }
    }
}

/// History database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    "data/calcsrv.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load from the default location, with environment overrides.
    pub fn load() -> Result<Self> {
        Self::from_figment(Figment::new().merge(Yaml::file(DEFAULT_CONFIG_FILE)))
    }

    /// Load from an explicit file path, still honoring environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_figment(Figment::new().merge(Yaml::file(path.as_ref())))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("_"))
            .extract()
            .map_err(|e| CalcSrvError::Config(format!("failed to load configuration: {}", e)))
    }

    /// Sanity-check the configuration before the server binds.
    pub fn validate(&self) -> Result<()> {
        if self.service.port == 0 {
            return Err(CalcSrvError::Config("service.port must not be 0".to_string()));
        }
        if self.database.path.is_empty() {
            return Err(CalcSrvError::Config(
                "database.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Bind address for the HTTP server
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.name, "calcsrv");
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.database.path, "data/calcsrv.db");
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.service.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }
}
