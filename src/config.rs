use crate::domain::{parse_value_str, Decimal};
use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_SNAPSHOT_SLOT: &str = "tradeCalculatorItems";
const DEFAULT_SIMILARITY_TOLERANCE: &str = "500k";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub catalog_path: String,
    pub snapshot_slot: String,
    pub similarity_tolerance: Decimal,
    pub persist_basis: bool,
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

        let database_path = required(&env_map, "DATABASE_PATH")?;
        let catalog_path = required(&env_map, "CATALOG_PATH")?;

        let snapshot_slot = match env_map.get("SNAPSHOT_SLOT").map(|s| s.trim()) {
            Some("") => {
                return Err(ConfigError::InvalidValue(
                    "SNAPSHOT_SLOT".to_string(),
                    "must not be empty".to_string(),
                ))
            }
            Some(slot) => slot.to_string(),
            None => DEFAULT_SNAPSHOT_SLOT.to_string(),
        };

        let tolerance_raw = env_map
            .get("SIMILARITY_TOLERANCE")
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SIMILARITY_TOLERANCE);
        let similarity_tolerance = parse_value_str(tolerance_raw)
            .ok()
            .filter(|t| !t.is_negative())
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SIMILARITY_TOLERANCE".to_string(),
                    format!("must be a non-negative value like 500k, got {}", tolerance_raw),
                )
            })?;

        let persist_basis = match env_map
            .get("PERSIST_BASIS")
            .map(|s| s.as_str())
            .unwrap_or("false")
        {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "PERSIST_BASIS".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        Ok(Config {
            port,
            database_path,
            catalog_path,
            snapshot_slot,
            similarity_tolerance,
            persist_basis,
        })
    }
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}
