use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    5
}
fn default_run_migrations() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManagerConfig {
    pub database: DatabaseConfig,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://device_manager.db?mode=rwc";

impl ManagerConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::builder(config_dir, &run_mode)?
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Environment variables, e.g. `DEVMGT__DATABASE__URL=postgres://...`
    fn environment() -> Environment {
        Environment::with_prefix("DEVMGT").separator("__")
    }

    fn builder(
        config_dir: &str,
        run_mode: &str,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            // Shared settings, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Per run mode overrides, e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("devmgt-config-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn load_from(dir: &PathBuf, run_mode: &str) -> ManagerConfig {
        ManagerConfig::builder(dir.to_str().unwrap(), run_mode)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = scratch_dir("defaults");
        let config = load_from(&dir, "development");

        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.run_migrations);
        assert!(!config.database.sqlx_logging);
    }

    #[test]
    fn test_run_mode_file_overrides_default_file() {
        let dir = scratch_dir("layers");
        std::fs::write(
            dir.join("default.toml"),
            "[database]\nurl = \"sqlite://base.db\"\nmax_connections = 2\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("test.toml"),
            "[database]\nurl = \"sqlite::memory:\"\nrun_migrations = false\n",
        )
        .unwrap();

        let config = load_from(&dir, "test");

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 2);
        assert!(!config.database.run_migrations);
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = scratch_dir("environment");
        std::fs::write(
            dir.join("default.toml"),
            "[database]\nurl = \"sqlite://base.db\"\nmax_connections = 2\n",
        )
        .unwrap();
        let vars = config::Map::from([(
            "DEVMGT__DATABASE__URL".to_string(),
            "postgres://devices@localhost/devmgt".to_string(),
        )]);

        let config: ManagerConfig = ManagerConfig::builder(dir.to_str().unwrap(), "development")
            .unwrap()
            .add_source(ManagerConfig::environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.url, "postgres://devices@localhost/devmgt");
        assert_eq!(config.database.max_connections, 2);
    }
}
