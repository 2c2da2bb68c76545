use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://contacts.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads settings from the process environment (after `.env`, if any).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}")
                })?,
            None => num_cpus::get() as u32,
        };

        let acquire_timeout_secs = match lookup("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| {
                    format!("DATABASE_ACQUIRE_TIMEOUT_SECS must be an integer, got {raw:?}")
                })?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid BIND_ADDR {raw_addr:?}"))?;

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            bind_addr,
        })
    }
}
