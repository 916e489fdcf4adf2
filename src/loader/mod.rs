//! Style data loading
//!
//! Styles reach the panel either as a JSON data transport document or by
//! scanning directories of CSV files. Both paths end in a [`StyleSet`]: the
//! flat list of style records plus the declared source names.
//!
//! The lenient entry points ([`StyleSet::from_json_lossy`],
//! [`category_order_from_json`], [`selection_from_json`]) never fail: a
//! panel with broken data shows nothing rather than an error.

mod scan;
pub mod error;

pub use scan::{Fingerprint, StyleDir, fingerprint, parse_csv, parse_csv_file, scan_dirs};
pub use error::LoadError;

use crate::Style;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat style records and the sources they came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleSet {
    pub sources: Vec<String>,
    pub styles: Vec<Style>,
}

/// Accepted shapes of the data transport document
///
/// The flat `styles` form is preferred; the legacy form pre-buckets styles
/// under `categories`.
#[derive(Debug, Default, Deserialize)]
struct StyleDocument {
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    styles: Vec<Style>,
    #[serde(default)]
    categories: Map<String, Value>,
}

impl StyleSet {
    /// Parse a data transport document
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Json` if the document is not valid JSON or not an
    /// object of the accepted shape.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let document: StyleDocument = serde_json::from_str(json)?;

        let styles = if document.styles.is_empty() {
            flatten_categories(document.categories)
        } else {
            document.styles
        };

        Ok(Self {
            sources: document.sources,
            styles,
        })
    }

    /// Parse a data transport document, degrading to an empty set
    #[must_use]
    pub fn from_json_lossy(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(json) {
            Ok(set) => {
                tracing::debug!(styles = set.styles.len(), sources = set.sources.len(), "loaded style data");
                set
            }
            Err(e) => {
                tracing::warn!("Failed to parse styles data: {e}");
                Self::default()
            }
        }
    }

    /// Serialize as the flat data transport document
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when no style was loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

fn flatten_categories(categories: Map<String, Value>) -> Vec<Style> {
    let mut styles = Vec::new();
    for (category, bucket) in categories {
        match serde_json::from_value::<Vec<Style>>(bucket) {
            Ok(bucket) => styles.extend(bucket),
            Err(e) => tracing::warn!("Skipping malformed category '{category}': {e}"),
        }
    }
    styles
}

/// Parse the category display order document, a JSON array of names
#[must_use]
pub fn category_order_from_json(json: &str) -> Vec<String> {
    string_list(json, "category order")
}

/// Parse a previously stored selection, a JSON array of style names
#[must_use]
pub fn selection_from_json(json: &str) -> Vec<String> {
    string_list(json, "selection")
}

/// Serialize a selection for deferred application by the host
#[must_use]
pub fn selection_to_json<S: AsRef<str>>(names: &[S]) -> String {
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    Value::from(names).to_string()
}

fn string_list(json: &str, what: &str) -> Vec<String> {
    if json.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse {what}: {e}");
        Vec::new()
    })
}
