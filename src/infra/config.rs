//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database URL must be provided (no default) for safety.
    pub database_url: String,
    pub port: u16,
    /// The only origin allowed by CORS. `None` allows any origin.
    pub frontend_url: Option<String>,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let db_max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            DEFAULT_DB_MAX_CONNECTIONS,
        )?
        .max(1);

        let frontend_url = lookup("FRONTEND_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            database_url,
            port,
            frontend_url,
            db_max_connections,
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be a valid number, got {:?}", key, v)),
        _ => Ok(default),
    }
}
