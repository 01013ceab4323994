use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::jobs::car_sweep::{DEFAULT_SWEEP_INTERVAL_SECS, ENV_SWEEP_INTERVAL};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
pub const DEFAULT_ASSETS_DIR: &str = "./assets";
pub const DEFAULT_MAP_FILE_NAME: &str = "mapa.png";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_password: String,
    pub volunteer_password: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub assets_dir: PathBuf,
    pub map_file_name: String,
    pub car_sweep_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cors_origins = optional(&lookup, "CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let sweep_secs: u64 = parsed(&lookup, ENV_SWEEP_INTERVAL, DEFAULT_SWEEP_INTERVAL_SECS)?;
        if sweep_secs == 0 {
            return Err(ConfigError::Invalid {
                key: ENV_SWEEP_INTERVAL,
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            jwt_secret: required(&lookup, "JWT_SECRET_KEY")?,
            admin_password: required(&lookup, "ADMIN_PASSWORD")?,
            volunteer_password: required(&lookup, "VOLUNTARIO_PASSWORD")?,
            port: parsed(&lookup, "PORT", DEFAULT_PORT)?,
            cors_origins,
            assets_dir: PathBuf::from(optional(&lookup, "ASSETS_DIR", DEFAULT_ASSETS_DIR)),
            map_file_name: optional(&lookup, "MAP_FILE_NAME", DEFAULT_MAP_FILE_NAME),
            car_sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn optional<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}
