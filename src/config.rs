//! Configuration management for IheNkiri
//!
//! Handles config file loading/saving, API token lookup and the user
//! settings (theme, login state). Config is stored at
//! ~/.config/ihenkiri/config.toml unless `--config` points elsewhere.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::models::{ListQuery, Session, DEFAULT_LANGUAGE};

/// Environment variable holding the TMDB API read access token
pub const TOKEN_ENV: &str = "TMDB_API_TOKEN";

/// Color theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    /// Follow the terminal; treated as dark
    #[default]
    System,
}

impl ThemeMode {
    /// Next mode in Dark → Light → System order
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::System,
            ThemeMode::System => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::System => write!(f, "system"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API read access token
    pub api_token: Option<String>,
    /// Response language (defaults to en-US)
    pub language: Option<String>,
    /// ISO 3166-1 region for release-date based lists
    pub region: Option<String>,
    #[serde(default)]
    pub theme: ThemeMode,
    /// Current login state
    pub session: Option<Session>,
}

impl Config {
    /// Get config file path (~/.config/ihenkiri/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ihenkiri").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| Self::load_from(&p).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path. A missing file yields the default config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Get the TMDB API token with fallback chain:
    /// 1. Environment variable TMDB_API_TOKEN
    /// 2. Token from config file
    pub fn api_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                return Ok(token);
            }
        }

        self.api_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No TMDB API token. Set {} or add api_token to the config file",
                    TOKEN_ENV
                )
            })
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Page-1 list query for the configured language/region
    pub fn list_query(&self) -> ListQuery {
        ListQuery::new(self.language(), self.region.clone())
    }
}
