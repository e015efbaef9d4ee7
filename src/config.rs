//! Application Configuration
//!
//! Optional JSON file; every field has a default. `CRM_DESK_DATA_DIR`
//! overrides the data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TaskOwner;

pub const DATA_DIR_ENV: &str = "CRM_DESK_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the database (and logs unless `log_dir` is set)
    pub data_dir: PathBuf,
    pub db_file: String,
    pub log_dir: Option<PathBuf>,
    /// Log file prefix
    pub app_name: String,
    /// Persist tasks like leads; `false` keeps them for the session only
    pub persist_tasks: bool,
    /// Owner of newly created tasks
    pub default_owner: TaskOwner,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .map(|dir| dir.join("crm-desk"))
                .unwrap_or_else(|| PathBuf::from("data")),
            db_file: "crm_desk.db".to_string(),
            log_dir: None,
            app_name: "CrmDesk".to_string(),
            persist_tasks: true,
            default_owner: TaskOwner::default(),
        }
    }
}

impl AppConfig {
    /// Read `path` if given and present, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }
}
