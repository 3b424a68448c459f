use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

pub const DEFAULT_CURSOR_SECRET: &str = "bondle-cursor";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub catalog_backend: CatalogBackend,
    /// Required for the SQLite backend; ignored otherwise.
    pub database_path: Option<String>,
    pub catalog_seed_file: Option<String>,
    pub cursor_secret: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let bind_addr = env_map
            .get("BIND_ADDR")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "BIND_ADDR".to_string(),
                    "must be an IPv4 or IPv6 address".to_string(),
                )
            })?;

        let catalog_backend = match env_map
            .get("CATALOG_BACKEND")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
            .unwrap_or("sqlite")
        {
            "sqlite" => CatalogBackend::Sqlite,
            "memory" => CatalogBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue(
                    "CATALOG_BACKEND".to_string(),
                    format!("must be sqlite or memory, got {}", other),
                ))
            }
        };

        let database_path = non_empty(&env_map, "DATABASE_PATH");
        if catalog_backend == CatalogBackend::Sqlite && database_path.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_PATH".to_string()));
        }

        let catalog_seed_file = non_empty(&env_map, "CATALOG_SEED_FILE");
        if let Some(path) = &catalog_seed_file {
            if !std::path::Path::new(path).is_file() {
                return Err(ConfigError::InvalidValue(
                    "CATALOG_SEED_FILE".to_string(),
                    "file not found or unreadable".to_string(),
                ));
            }
        }

        let cursor_secret = non_empty(&env_map, "CURSOR_SECRET")
            .unwrap_or_else(|| DEFAULT_CURSOR_SECRET.to_string());

        Ok(Config {
            port,
            bind_addr,
            catalog_backend,
            database_path,
            catalog_seed_file,
            cursor_secret,
        })
    }
}

fn non_empty(env_map: &HashMap<String, String>, key: &str) -> Option<String> {
    env_map
        .get(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
