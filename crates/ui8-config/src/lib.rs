//! # ui8-config
//!
//! Layered configuration loading for ui8kit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`UI8KIT_*` prefix, `__` as separator)
//! 2. Project-level `ui8kit.config.json`
//! 3. User-level `~/.config/ui8kit/config.json`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `UI8KIT_BUILD__OUTPUT_DIR` -> `build.output_dir`,
//! `UI8KIT_REGISTRY__URL` -> `registry.url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use ui8_config::Ui8Config;
//!
//! let config = Ui8Config::load_with_dotenv(Path::new(".")).expect("config");
//! println!("scanning {}", config.scan.source_dir);
//! ```

mod build;
mod error;
mod registry;
mod scan;
mod schemas;

pub use build::BuildConfig;
pub use error::ConfigError;
pub use registry::RegistryConfig;
pub use scan::ScanConfig;
pub use schemas::SchemasConfig;

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project-level config written by `ui8kit init`.
pub const CONFIG_FILE_NAME: &str = "ui8kit.config.json";

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Ui8Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub schemas: SchemasConfig,
}

impl Ui8Config {
    /// Load configuration for the project rooted at `project_root`.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment(project_root)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration after reading `<project_root>/.env`, if present.
    pub fn load_with_dotenv(project_root: &Path) -> Result<Self, ConfigError> {
        let env_path = project_root.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }
        Self::load(project_root)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer providers on top.
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Json::file(global_path));
        }

        let local_path = Self::project_config_path(project_root);
        if local_path.exists() {
            figment = figment.merge(Json::file(local_path));
        }

        figment.merge(Env::prefixed("UI8KIT_").split("__"))
    }

    /// Path of the project-level config file.
    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    /// Write this config as pretty JSON to the project config file.
    pub fn write(&self, project_root: &Path) -> Result<PathBuf, ConfigError> {
        let path = Self::project_config_path(project_root);
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        std::fs::write(&path, rendered).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Reject values that would make every command misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "registry.name".into(),
                reason: "must not be empty".into(),
            });
        }
        if let Some(prefix) = self.scan.workspace_prefixes.iter().find(|p| p.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "scan.workspace_prefixes".into(),
                reason: format!("empty prefix {prefix:?} would exclude every dependency"),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ui8kit").join("config.json"))
    }
}
