use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::application::DEFAULT_COLLABORATOR_TIMEOUT;

/// Where books and borrow records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local store, lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration, read from the environment
///
/// | variable | default |
/// |---|---|
/// | `DATABASE_URL` | `postgres://localhost/library` |
/// | `PORT` | `3000` |
/// | `LIBRARY_STORAGE` | `postgres` (`memory` for a throwaway store) |
/// | `COLLABORATOR_TIMEOUT_MS` | `10000` |
/// | `DB_MAX_CONNECTIONS` | `5` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub collaborator_timeout: Duration,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/library".into());

        let port = parse_var(&lookup, "PORT", 3000u16)?;
        let storage = parse_var(&lookup, "LIBRARY_STORAGE", StorageBackend::Postgres)?;
        let timeout_ms = parse_var(
            &lookup,
            "COLLABORATOR_TIMEOUT_MS",
            DEFAULT_COLLABORATOR_TIMEOUT.as_millis() as u64,
        )?;
        let db_max_connections = parse_var(&lookup, "DB_MAX_CONNECTIONS", 5u32)?;

        if timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: "COLLABORATOR_TIMEOUT_MS",
                value: "0".into(),
                reason: "must be greater than 0".into(),
            });
        }

        Ok(Self {
            database_url,
            port,
            storage,
            collaborator_timeout: Duration::from_millis(timeout_ms),
            db_max_connections,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// `database_url` with any user info replaced, safe to log.
    pub fn redacted_database_url(&self) -> String {
        let url = &self.database_url;
        let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
            return url.clone();
        };
        let authority_end = url[scheme_end..]
            .find(['/', '?'])
            .map_or(url.len(), |i| scheme_end + i);

        match url[scheme_end..authority_end].rfind('@') {
            Some(at) => format!(
                "{}***{}",
                &url[..scheme_end],
                &url[scheme_end + at..]
            ),
            None => url.clone(),
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}
