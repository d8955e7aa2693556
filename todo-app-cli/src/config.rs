//! Configuration loading using Figment
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Built-in defaults
//! 2. User config file (`<config dir>/todo-app/config.toml`)
//! 3. Project config file (`./todo.toml`)
//! 4. Environment variables prefixed `TODO_APP_`
//! 5. An explicit `--config` file, then the `--db` override

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use todo_app_common::{ErrorSeverity, Severity};
use todo_app_sqlite::DEFAULT_DB_FILENAME;
use tracing::{debug, trace};

/// Prefix for environment overrides, e.g. `TODO_APP_DATABASE_PATH`
pub const ENV_PREFIX: &str = "TODO_APP_";

/// Project config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "todo.toml";

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration file format not supported
    #[error("Unsupported configuration file format: {format}")]
    UnsupportedFormat { format: String },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[source]
        source: Box<figment::Error>,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}

impl Severity for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        // Nothing can run without a configuration.
        ErrorSeverity::Error
    }
}

/// Settings for one run of the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Default tracing filter when neither `--debug` nor `RUST_LOG` is given
    pub log_level: String,
    /// Sort `list` output by due date unless told otherwise
    pub sort_by_due_date: bool,
    /// Sort `list` output by priority unless told otherwise
    pub sort_by_priority: bool,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_FILENAME),
            log_level: "warn".to_string(),
            sort_by_due_date: false,
            sort_by_priority: false,
        }
    }
}

impl TodoConfig {
    /// Load from the standard locations plus the given overrides
    pub fn load(
        explicit_file: Option<&Path>,
        database_override: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        ConfigSources::discover()
            .with_explicit_file(explicit_file.map(Path::to_path_buf))
            .with_database_override(database_override.map(Path::to_path_buf))
            .load()
    }
}

/// Where configuration comes from
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub user_file: Option<PathBuf>,
    pub project_file: Option<PathBuf>,
    pub explicit_file: Option<PathBuf>,
    pub database_override: Option<PathBuf>,
}

impl ConfigSources {
    /// Standard user and project locations; neither has to exist
    pub fn discover() -> Self {
        Self {
            user_file: user_config_file(),
            project_file: Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            explicit_file: None,
            database_override: None,
        }
    }

    pub fn with_explicit_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_file = path;
        self
    }

    pub fn with_database_override(mut self, path: Option<PathBuf>) -> Self {
        self.database_override = path;
        self
    }

    /// Merge every source and extract the final configuration
    pub fn load(&self) -> Result<TodoConfig, ConfigError> {
        let config: TodoConfig = self.build_figment()?.extract()?;
        debug!("Resolved database path: {}", config.database_path.display());
        Ok(config)
    }

    /// Build the figment configuration with all sources in precedence order
    fn build_figment(&self) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(TodoConfig::default()));

        for path in self.user_file.iter().chain(self.project_file.iter()) {
            // Optional files; figment treats a missing file as empty.
            trace!("Merging optional config file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        if let Some(path) = &self.explicit_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            debug!("Merging explicit config file {}", path.display());
            figment = figment.merge(load_config_file(path)?);
        }

        if let Some(db) = &self.database_override {
            figment = figment.merge(Serialized::default("database_path", db));
        }

        Ok(figment)
    }
}

/// `<config dir>/todo-app/config.toml`, if the platform has a config dir
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("todo-app").join("config.toml"))
}

/// Load a single configuration file based on its extension
fn load_config_file(path: &Path) -> Result<Figment, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "toml" => Ok(Figment::from(Toml::file(path))),
        "yaml" | "yml" => Ok(Figment::from(Yaml::file(path))),
        "json" => Ok(Figment::from(Json::file(path))),
        other => Err(ConfigError::UnsupportedFormat {
            format: other.to_string(),
        }),
    }
}
