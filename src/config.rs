use std::env;

use thiserror::Error;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 3000;
const MONGODB_URI: &str = "mongodb://localhost/Loc8r";
const MONGODB_DATABASE: &str = "Loc8r";
const MONGODB_COLLECTION: &str = "locations";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo: MongoConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl AppConfig {
    /// Reads the process environment. Call after `.env` has been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => PORT,
        };

        Ok(AppConfig {
            host: or_default("HOST", HOST),
            port,
            mongo: MongoConfig {
                uri: or_default("MONGODB_URI", MONGODB_URI),
                database: or_default("MONGODB_DATABASE", MONGODB_DATABASE),
                collection: or_default("MONGODB_COLLECTION", MONGODB_COLLECTION),
            },
        })
    }
}
