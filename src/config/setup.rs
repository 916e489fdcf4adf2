//! Interactive setup wizard for first-time configuration
//!
//! Asks for the styles directory to scan and where preferences live when
//! stylegrid is run for the first time.

use super::StyleGridConfig;
use crate::loader::StyleDir;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for a styles directory and the preference store
///
/// 1. Prompts for a styles directory (empty to skip)
/// 2. Prompts for its priority when one was given
/// 3. Prompts for the preference store location (default: system data directory)
/// 4. Saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The system data directory cannot be determined
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup() -> Result<StyleGridConfig, ConfigError> {
    println!("Welcome to stylegrid! Let's find your styles.\n");

    let theme = ColorfulTheme::default();
    let read_error = |e: dialoguer::Error| ConfigError::Message(format!("Failed to read input: {e}"));

    let mut config = StyleGridConfig::default();

    let styles_dir: String = Input::with_theme(&theme)
        .with_prompt("Styles directory (blank to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(read_error)?;

    if !styles_dir.trim().is_empty() {
        let priority: i64 = Input::with_theme(&theme)
            .with_prompt("Priority of its styles")
            .default(0)
            .interact_text()
            .map_err(read_error)?;
        config.add_style_dir(StyleDir::new(styles_dir.trim(), priority));
    }

    let default_prefs = StyleGridConfig::default_prefs_path()?;
    let prefs_path: String = Input::with_theme(&theme)
        .with_prompt("Preference store location")
        .default(default_prefs.to_string_lossy().to_string())
        .interact_text()
        .map_err(read_error)?;

    let prefs_path = PathBuf::from(prefs_path);
    if prefs_path != default_prefs {
        config.prefs_path = Some(prefs_path);
    }

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
