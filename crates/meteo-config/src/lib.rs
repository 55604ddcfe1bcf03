use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Connection settings for the station gateway
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "meteo".to_string(),
            password: String::new(),
            database: "meteo".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

impl GatewayConfig {
    /// Load from the TOML file at METEO_CONFIG (default `meteo.toml`) if it
    /// exists, then apply `DB_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("METEO_CONFIG").unwrap_or_else(|_| "meteo.toml".to_string());
        let mut cfg = Self::from_file_or_default(&path)?;
        cfg.apply_overrides(&std::env::vars().collect())?;
        Ok(cfg)
    }

    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    /// Apply `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` and
    /// `DB_MAX_CONNECTIONS` from `vars`.
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<(), ConfigError> {
        if let Some(host) = vars.get("DB_HOST") {
            self.host = host.clone();
        }
        if let Some(user) = vars.get("DB_USER") {
            self.user = user.clone();
        }
        if let Some(password) = vars.get("DB_PASSWORD") {
            self.password = password.clone();
        }
        if let Some(database) = vars.get("DB_NAME") {
            self.database = database.clone();
        }
        if let Some(port) = vars.get("DB_PORT") {
            self.port = parse_var("DB_PORT", port)?;
        }
        if let Some(max) = vars.get("DB_MAX_CONNECTIONS") {
            self.max_connections = parse_var("DB_MAX_CONNECTIONS", max)?;
            if self.max_connections == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "DB_MAX_CONNECTIONS",
                    value: max.clone(),
                });
            }
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
