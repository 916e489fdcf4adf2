//! Style Grid - a searchable, categorized catalog of prompt style presets
//!
//! This library provides the behavioral core of the style picker: deriving
//! categories from style names, merging styles supplied by several sources,
//! a small search query language, and the rules for splicing style text into
//! prompt fields. A panel state machine ties these together so front ends only
//! need to feed events and render a view model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod output;
pub mod panel;
pub mod prefs;
pub mod search;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum StyleGridError {
    /// Style data could not be loaded
    #[error("Load error: {0}")]
    LoadError(#[from] loader::LoadError),
    /// Preference store error
    #[error("Preference error: {0}")]
    PrefsError(#[from] prefs::PrefsError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    LoggingError(#[from] tracing_subscriber::util::TryInitError),
    /// Interactive prompt failed
    #[error("Interactive prompt failed: {0}")]
    PromptError(#[from] dialoguer::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// One selectable style preset
///
/// `category` and `display_name` are derived from `name` by
/// [`catalog::categorize`]; data sources may leave them empty.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_priority: Option<i64>,
}

impl Style {
    /// Create a new style with only a name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the positive prompt fragment
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the negative prompt fragment
    #[must_use]
    pub fn with_negative(mut self, negative: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative.into());
        self
    }

    /// Tag the style with its origin and priority
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>, priority: i64) -> Self {
        self.source = Some(source.into());
        self.source_priority = Some(priority);
        self
    }

    /// Priority used when merging duplicates, missing counts as 0
    #[must_use]
    pub fn priority(&self) -> i64 {
        self.source_priority.unwrap_or(catalog::SOURCE_PRIORITY_ROOT)
    }

    /// Fragment for the given prompt field, `None` when absent or empty
    #[must_use]
    pub fn fragment(&self, field: merge::PromptField) -> Option<&str> {
        let text = match field {
            merge::PromptField::Prompt => self.prompt.as_deref(),
            merge::PromptField::Negative => self.negative_prompt.as_deref(),
        };
        text.filter(|t| !t.is_empty())
    }

    /// Name shown to the user, falls back to the raw name before derivation
    #[must_use]
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}
