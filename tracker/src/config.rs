use std::path::Path;

use database::DatabaseConfig;
use serde::Deserialize;

use crate::TrackerError;

/// Settings read from the optional YAML config file.
///
/// ```yaml
/// database_url: /home/me/.local/share/dominion_stats.db
/// pool_size: 2
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub database_url: Option<String>,
    pub pool_size: Option<u32>,
}

impl TrackerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TrackerError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| TrackerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Resolves the database location: CLI flag, then `DATABASE_URL`, then
    /// this file, then the default path.
    pub fn database_config(&self, cli_database: Option<String>) -> DatabaseConfig {
        let config =
            DatabaseConfig::from_cli_or_env_or_yaml(cli_database, self.database_url.clone());
        match self.pool_size {
            Some(pool_size) => config.with_pool_size(pool_size),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config =
            TrackerConfig::from_yaml_str("database_url: games.db\npool_size: 2\n").unwrap();

        assert_eq!(config.database_url.as_deref(), Some("games.db"));
        assert_eq!(config.pool_size, Some(2));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        assert_eq!(
            TrackerConfig::from_yaml_str("pool_size: 3").unwrap(),
            TrackerConfig {
                database_url: None,
                pool_size: Some(3),
            }
        );
        assert_eq!(
            TrackerConfig::from_yaml_str("").unwrap(),
            TrackerConfig::default()
        );
    }

    #[test]
    fn test_invalid_yaml_is_a_config_error() {
        let err = TrackerConfig::from_yaml_str("pool_size: [lots]").unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url: stats.db").unwrap();

        let config = TrackerConfig::load(file.path()).unwrap();

        assert_eq!(config.database_url.as_deref(), Some("stats.db"));
    }

    #[test]
    fn test_cli_database_wins_and_pool_size_applies() {
        let config = TrackerConfig {
            database_url: Some("yaml.db".to_string()),
            pool_size: Some(2),
        };

        let database = config.database_config(Some("cli.db".to_string()));

        assert_eq!(database.url, "cli.db");
        assert_eq!(database.pool_size, 2);
    }
}
