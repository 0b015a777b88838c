// src/config.rs
use log::{info, warn};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use crate::money::{Amount, MoneyError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub items_file: PathBuf,
    pub min_increase: Amount,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let min_increase: String = try_load("MIN_INCREASE", "1")?;
        let min_increase = min_increase
            .parse::<Amount>()
            .map_err(|e: MoneyError| invalid("MIN_INCREASE", &min_increase, e))?;

        Ok(Self {
            bind_addr: try_load("BIND_ADDR", "127.0.0.1")?,
            port: try_load("PORT", "8080")?,
            items_file: PathBuf::from(try_load::<String>("ITEMS_FILE", "data/items.json")?),
            min_increase,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        invalid(key, &value, e)
    })
}
