use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

/// Centralized configuration for the hearth server.
///
/// Everything comes from the process environment. The binary loads a
/// `.env` file first, so local development only needs a checked-out
/// `.env` with `DATABASE_URL` in it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string. Required.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Base URL of the external image store, e.g. `https://img.example.com`.
    pub image_store_url: String,
    /// API key for the external image store.
    pub image_store_api_key: String,
    /// Maximum connections for the Postgres pool.
    pub max_db_connections: u32,
}

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4000";
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 5;

impl AppConfig {
    /// Load config from the environment.
    ///
    /// Fails hard with an actionable error when `DATABASE_URL` is missing,
    /// rather than deferring the failure to the first query.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .context("DATABASE_URL is not set\n\nExample: postgres://localhost/hearth")?;

        let bind_addr = env::var("HEARTH_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("HEARTH_BIND_ADDR is not a valid socket address")?;

        let image_store_url = env::var("IMAGE_STORE_URL")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());
        let image_store_api_key = env::var("IMAGE_STORE_API_KEY").unwrap_or_default();

        let max_db_connections = match env::var("HEARTH_MAX_DB_CONNECTIONS") {
            Ok(v) => v
                .parse::<u32>()
                .context("HEARTH_MAX_DB_CONNECTIONS is not a number")?,
            Err(_) => DEFAULT_MAX_DB_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            image_store_url,
            image_store_api_key,
            max_db_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; keep them in one test so they
    // cannot race each other under the parallel test runner.
    #[test]
    fn load_from_env() {
        env::set_var("DATABASE_URL", "postgres://localhost/hearth_test");
        env::remove_var("HEARTH_BIND_ADDR");
        env::remove_var("HEARTH_MAX_DB_CONNECTIONS");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.database_url, "postgres://localhost/hearth_test");
        assert_eq!(config.bind_addr.port(), 4000);
        assert_eq!(config.max_db_connections, DEFAULT_MAX_DB_CONNECTIONS);

        env::set_var("HEARTH_BIND_ADDR", "not-an-addr");
        assert!(AppConfig::from_env().is_err());
        env::remove_var("HEARTH_BIND_ADDR");

        env::remove_var("DATABASE_URL");
        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
