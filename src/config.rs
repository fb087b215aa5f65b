// src/config.rs
//
// Application configuration
//
// Sources, lowest to highest precedence:
// 1. Built-in defaults
// 2. Optional JSON file (`--config`)
// 3. Environment variables

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::db::default_database_path;
use crate::error::{AppError, AppResult};

pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_BASE_URL: &str = "TMDB_BASE_URL";
pub const ENV_LANGUAGE: &str = "TMDB_LANGUAGE";
pub const ENV_DATABASE: &str = "MOVIE_EXPLORER_DB";
pub const ENV_PREFERS_DARK: &str = "MOVIE_EXPLORER_PREFERS_DARK";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub storage: StorageConfig,
    pub appearance: AppearanceConfig,
}

/// Movie metadata provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            language: "en-US".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Falls back to the platform data directory when unset
    pub database_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// System color-scheme preference, used when no theme was saved
    pub prefers_dark: bool,
}

impl AppConfig {
    /// Read a JSON config file. Environment overrides are applied separately.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("Invalid config file {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = var(ENV_API_KEY) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(url) = var(ENV_BASE_URL) {
            self.tmdb.base_url = url;
        }
        if let Some(language) = var(ENV_LANGUAGE) {
            self.tmdb.language = language;
        }
        if let Some(path) = var(ENV_DATABASE) {
            self.storage.database_path = Some(PathBuf::from(path));
        }
        if let Some(flag) = var(ENV_PREFERS_DARK) {
            self.appearance.prefers_dark = matches!(flag.as_str(), "1" | "true" | "yes");
        }
    }
}
