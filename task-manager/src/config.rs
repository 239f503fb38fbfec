use crate::store::{CorruptFilePolicy, DEFAULT_TASK_FILE, TaskStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "task-manager.toml";
pub const ENV_PREFIX: &str = "TASK_MANAGER";

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_file")]
    pub file: PathBuf,
    #[serde(default)]
    pub on_corrupt: CorruptFilePolicy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            on_corrupt: CorruptFilePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from `task-manager.toml` in the working directory
    /// (if present) and `TASK_MANAGER_*` environment variables.
    ///
    /// When `path` is given that file is used instead and must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        settings.try_deserialize()
    }

    pub fn store(&self) -> TaskStore {
        TaskStore::new(&self.file).with_corrupt_file_policy(self.on_corrupt)
    }
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_TASK_FILE)
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    mod deser_tests {
        use super::*;

        #[test]
        fn test_config_deserialize_from_toml() {
            // Arrange
            let toml_str = r#"
                file = "/tmp/todo.json"
                on_corrupt = "empty"
                log_level = "debug"
            "#;

            // Act
            let config: Config = toml::from_str(toml_str).unwrap();

            // Assert
            assert_eq!(config.file, PathBuf::from("/tmp/todo.json"));
            assert_eq!(config.on_corrupt, CorruptFilePolicy::Empty);
            assert_eq!(config.log_level, "debug");
        }

        #[test]
        fn test_config_deserialize_uses_defaults() {
            // Arrange
            let toml_str = "";

            // Act
            let config: Config = toml::from_str(toml_str).unwrap();

            // Assert
            assert_eq!(config, Config::default());
            assert_eq!(config.file, PathBuf::from("tasks.json"));
            assert_eq!(config.on_corrupt, CorruptFilePolicy::Fail);
        }

        #[test]
        fn test_config_rejects_unknown_policy() {
            // Arrange
            let toml_str = r#"on_corrupt = "ignore""#;

            // Act
            let result = toml::from_str::<Config>(toml_str);

            // Assert
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_load_explicit_file() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let file = dir.child("custom.toml");
        file.write_str("file = \"elsewhere.json\"\non_corrupt = \"empty\"\n")
            .unwrap();

        // Act
        let config = Config::load(Some(file.path())).unwrap();

        // Assert
        assert_eq!(config.file, PathBuf::from("elsewhere.json"));
        assert_eq!(config.on_corrupt, CorruptFilePolicy::Empty);
        assert_eq!(config.store().path(), Path::new("elsewhere.json"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        // Arrange
        let dir = TempDir::new().unwrap();

        // Act
        let result = Config::load(Some(dir.child("nope.toml").path()));

        // Assert
        assert!(result.is_err());
    }
}
