use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default bcrypt cost factor (~200ms per hash on current hardware).
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Lowest accepted bcrypt cost. Anything below is too cheap to brute-force.
pub const MIN_BCRYPT_COST: u32 = 10;

/// Highest accepted bcrypt cost. Above this signup/login latency climbs past ~800ms.
pub const MAX_BCRYPT_COST: u32 = 14;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. When absent the service keeps accounts
    /// in process memory.
    pub database_url: Option<SecretString>,
    pub bind_address: String,
    pub bcrypt_cost: u32,
    pub db_max_connections: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid bcrypt cost: {0}")]
    InvalidBcryptCost(String),

    #[error("Invalid database max connections: {0}")]
    InvalidMaxConnections(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| SecretString::from(url.clone()));

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let bcrypt_cost = match vars.get("BCRYPT_COST") {
            Some(raw) => {
                let cost: u32 = raw.parse().map_err(|_| {
                    ConfigError::InvalidBcryptCost(format!("'{}' is not a number", raw))
                })?;
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                    return Err(ConfigError::InvalidBcryptCost(format!(
                        "{} (must be {}-{})",
                        cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
                    )));
                }
                cost
            }
            None => DEFAULT_BCRYPT_COST,
        };

        let db_max_connections = match vars.get("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::InvalidMaxConnections(format!(
                        "'{}' (must be a positive integer)",
                        raw
                    )))
                }
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Config {
            database_url,
            bind_address,
            bcrypt_cost,
            db_max_connections,
        })
    }
}
