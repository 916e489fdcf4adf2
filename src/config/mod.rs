//! Configuration module for stylegrid
//!
//! Manages where styles are loaded from, where preferences are stored, and
//! panel behavior knobs. Configuration is stored in the user's config
//! directory.

mod setup;

pub use setup::first_time_setup;

use crate::loader::StyleDir;
use crate::search::SearchScope;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Category display order used when none is configured
pub const DEFAULT_CATEGORY_ORDER: [&str; 10] = [
    "BASE",
    "BODY",
    "GENITALS",
    "BREASTS",
    "THEME",
    "RESTRAINTS",
    "POSE",
    "SCENE",
    "STYLE",
    "OTHER",
];

/// Label of the sentinel "every source" selection
pub const DEFAULT_ALL_SOURCES_LABEL: &str = "All Sources";

/// Owned copy of [`DEFAULT_CATEGORY_ORDER`]
#[must_use]
pub fn default_category_order() -> Vec<String> {
    DEFAULT_CATEGORY_ORDER.iter().map(ToString::to_string).collect()
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_recent_limit() -> usize {
    10
}

const fn default_watch_interval_secs() -> u64 {
    5
}

fn default_all_sources_label() -> String {
    DEFAULT_ALL_SOURCES_LABEL.to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StyleGridConfig {
    /// Display order of categories; unlisted categories follow in discovery order
    #[serde(default = "default_category_order")]
    pub category_order: Vec<String>,

    /// Location of the preference store, defaults to the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefs_path: Option<PathBuf>,

    /// Which style fields search terms are matched against
    #[serde(default)]
    pub search_scope: SearchScope,

    /// Typing a category name prefix shows only that category
    #[serde(default)]
    pub category_shortcut: bool,

    /// Quiet period before a search is applied
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum length of the recent list
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Polling interval of `watch`
    #[serde(default = "default_watch_interval_secs")]
    pub watch_interval_secs: u64,

    /// Label shown for the merged view of all sources
    #[serde(default = "default_all_sources_label")]
    pub all_sources_label: String,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Directories scanned for CSV style files
    #[serde(default)]
    pub style_dirs: Vec<StyleDir>,
}

impl Default for StyleGridConfig {
    fn default() -> Self {
        Self {
            category_order: default_category_order(),
            prefs_path: None,
            search_scope: SearchScope::default(),
            category_shortcut: false,
            debounce_ms: default_debounce_ms(),
            recent_limit: default_recent_limit(),
            watch_interval_secs: default_watch_interval_secs(),
            all_sources_label: default_all_sources_label(),
            quiet: false,
            style_dirs: Vec::new(),
        }
    }
}

impl StyleGridConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("stylegrid").join("config.toml"))
    }

    /// Default location of the preference store
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn default_prefs_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("stylegrid").join("prefs"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            tracing::info!("Created default configuration at {}", config_path.display());
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Resolved preference store location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn prefs_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.prefs_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_prefs_path(),
        }
    }

    /// Add a styles directory, replacing the priority of an existing entry
    pub fn add_style_dir(&mut self, dir: StyleDir) {
        match self.style_dirs.iter_mut().find(|d| d.path == dir.path) {
            Some(existing) => existing.priority = dir.priority,
            None => self.style_dirs.push(dir),
        }
    }

    /// Remove a styles directory, returning whether it was configured
    pub fn remove_style_dir(&mut self, path: &Path) -> bool {
        let before = self.style_dirs.len();
        self.style_dirs.retain(|d| d.path != path);
        self.style_dirs.len() != before
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }
}
