use std::{str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::DatabaseError;

pub const DEFAULT_DATABASE_PATH: &str = "dominion_stats.db";
pub const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: 4,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MEMORY_URL)
    }

    pub fn from_cli_or_env_or_yaml(cli_arg: Option<String>, yaml_config: Option<String>) -> Self {
        let url = if let Some(arg) = cli_arg {
            arg
        } else if let Ok(env) = std::env::var("DATABASE_URL") {
            env
        } else if let Some(yaml) = yaml_config {
            yaml
        } else {
            DEFAULT_DATABASE_PATH.to_string()
        };

        Self::new(url)
    }

    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.url == ":memory:" || self.url.starts_with(MEMORY_URL)
    }

    /// Opens the pool, creating the database file if needed.
    ///
    /// An in-memory database lives only as long as its connection, so it gets
    /// a single connection that is never reaped.
    pub async fn create_pool(&self) -> Result<SqlitePool, DatabaseError> {
        let (options, pool_options) = if self.is_in_memory() {
            let options = SqliteConnectOptions::from_str(MEMORY_URL)
                .map_err(|e| DatabaseError::Connection(e.to_string()))?;
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
            (options, pool_options)
        } else {
            let path = self.url.trim_start_matches("sqlite://");
            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true);
            let pool_options = SqlitePoolOptions::new().max_connections(self.pool_size);
            (options, pool_options)
        };

        tracing::debug!("Opening database at {}", self.url);
        pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_argument_takes_precedence() {
        let config = DatabaseConfig::from_cli_or_env_or_yaml(
            Some("cli.db".to_string()),
            Some("yaml.db".to_string()),
        );
        assert_eq!(config.url, "cli.db");
    }

    #[test]
    fn test_memory_urls() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        assert!(DatabaseConfig::new(":memory:").is_in_memory());
        assert!(!DatabaseConfig::new("sqlite://games.db").is_in_memory());
    }

    #[test]
    fn test_pool_size_is_at_least_one() {
        assert_eq!(DatabaseConfig::in_memory().with_pool_size(0).pool_size, 1);
        assert_eq!(DatabaseConfig::in_memory().with_pool_size(8).pool_size, 8);
    }

    #[tokio::test]
    async fn test_create_pool_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.db");
        let config = DatabaseConfig::new(path.to_string_lossy().to_string());

        let pool = config.create_pool().await.expect("pool should open");
        pool.close().await;

        assert!(path.exists());
    }
}
