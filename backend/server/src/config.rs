use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

const SECRETS_DIR: &str = "/run/secrets";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} is required")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorsConfig {
    pub enabled: bool,
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub supabase_url: String,
    pub supabase_key: String,
    pub cors: CorsConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "PORT", "3000")?,
            supabase_url: require(&lookup, "SUPABASE_URL")?,
            supabase_key: match require(&lookup, "SUPABASE_ANON_KEY") {
                Ok(key) => key,
                Err(_) => read_secret("SUPABASE_ANON_KEY")?,
            },
            cors: CorsConfig {
                enabled: try_load(&lookup, "CORS_ENABLED", "true")?,
                allowed_origins: try_load::<_, String>(&lookup, "CORS_ALLOWED_ORIGINS", "*")?
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToString::to_string)
                    .collect(),
                max_age_seconds: try_load(&lookup, "CORS_MAX_AGE", "3600")?,
            },
        })
    }
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

fn read_secret(secret_name: &'static str) -> Result<String, ConfigError> {
    let path = format!("{SECRETS_DIR}/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .ok()
        .filter(|secret| !secret.is_empty())
        .ok_or(ConfigError::Missing(secret_name))
}
