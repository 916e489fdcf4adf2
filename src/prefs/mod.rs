//! Persisted per-tab preferences
//!
//! Stores favorites, recent styles, the selected source, apply and sort
//! modes, and saved presets in a sled database.
//!
//! Uses two sled trees:
//! - `prefs`: `<tab>/<key>` -> bincode-encoded value (`apply_mode` is global)
//! - `presets`: `<tab>/<name>` -> bincode-encoded [`Preset`]
//!
//! Reads never fail on missing or undecodable values; they fall back to the
//! documented defaults. Writes are last-write-wins.

pub mod error;
pub mod types;

pub use error::PrefsError;
pub use types::{ApplyMode, Preset, SortMode, Tab};

use bincode::{Decode, Encode};
use sled::{Db, Tree};
use std::collections::BTreeSet;
use std::path::Path;

const FAVORITES: &str = "favorites";
const RECENT: &str = "recent";
const SOURCE: &str = "source";
const SORT_MODE: &str = "sort_mode";
const APPLY_MODE: &str = "apply_mode";

/// Preference store wrapper
pub struct Preferences {
    db: Db,
    prefs: Tree,
    presets: Tree,
}

impl Preferences {
    /// Opens or creates a preference store at the specified path
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the database or its trees cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PrefsError> {
        Self::from_db(sled::open(path)?)
    }

    /// Opens a store that lives only as long as this value
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the temporary database cannot be created.
    pub fn temporary() -> Result<Self, PrefsError> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: Db) -> Result<Self, PrefsError> {
        let prefs = db.open_tree("prefs")?;
        let presets = db.open_tree("presets")?;
        Ok(Self { db, prefs, presets })
    }

    fn get<T: Decode<()>>(tree: &Tree, key: &str) -> Option<T> {
        let value = match tree.get(key.as_bytes()) {
            Ok(value) => value?,
            Err(e) => {
                tracing::warn!("Failed to read preference '{key}': {e}");
                return None;
            }
        };
        Self::decode(key, &value)
    }

    fn decode<T: Decode<()>>(key: &str, value: &[u8]) -> Option<T> {
        match bincode::decode_from_slice::<T, _>(value, bincode::config::standard()) {
            Ok((decoded, _)) => Some(decoded),
            Err(e) => {
                tracing::warn!("Ignoring unreadable preference '{key}': {e}");
                None
            }
        }
    }

    fn put<T: Encode>(tree: &Tree, key: &str, value: &T) -> Result<(), PrefsError> {
        let encoded = bincode::encode_to_vec(value, bincode::config::standard())?;
        tree.insert(key.as_bytes(), encoded)?;
        Ok(())
    }

    fn key(tab: Tab, name: &str) -> String {
        format!("{}/{name}", tab.as_str())
    }

    /// Favorite style names for a tab
    #[must_use]
    pub fn favorites(&self, tab: Tab) -> BTreeSet<String> {
        Self::get::<Vec<String>>(&self.prefs, &Self::key(tab, FAVORITES))
            .unwrap_or_default()
            .into_iter()
            .collect()
    }

    /// Replace the favorites of a tab
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the value cannot be encoded or written.
    pub fn set_favorites(&self, tab: Tab, favorites: &BTreeSet<String>) -> Result<(), PrefsError> {
        let names: Vec<&String> = favorites.iter().collect();
        Self::put(&self.prefs, &Self::key(tab, FAVORITES), &names)
    }

    /// Recently applied styles, most recent first
    #[must_use]
    pub fn recent(&self, tab: Tab) -> Vec<String> {
        Self::get(&self.prefs, &Self::key(tab, RECENT)).unwrap_or_default()
    }

    /// Replace the recent list of a tab
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the value cannot be encoded or written.
    pub fn set_recent(&self, tab: Tab, recent: &[String]) -> Result<(), PrefsError> {
        Self::put(&self.prefs, &Self::key(tab, RECENT), &recent)
    }

    /// Move styles to the front of the recent list
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the updated list cannot be written.
    pub fn push_recent(&self, tab: Tab, names: &[String], limit: usize) -> Result<Vec<String>, PrefsError> {
        let recent = push_recent(self.recent(tab), names, limit);
        self.set_recent(tab, &recent)?;
        Ok(recent)
    }

    /// Last selected source label, `None` when never set
    #[must_use]
    pub fn source(&self, tab: Tab) -> Option<String> {
        Self::get(&self.prefs, &Self::key(tab, SOURCE))
    }

    /// Remember the selected source label
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the value cannot be encoded or written.
    pub fn set_source(&self, tab: Tab, source: &str) -> Result<(), PrefsError> {
        Self::put(&self.prefs, &Self::key(tab, SOURCE), &source)
    }

    /// Apply mode, shared by all tabs
    #[must_use]
    pub fn apply_mode(&self) -> ApplyMode {
        Self::get::<String>(&self.prefs, APPLY_MODE)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Remember the apply mode
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the value cannot be encoded or written.
    pub fn set_apply_mode(&self, mode: ApplyMode) -> Result<(), PrefsError> {
        Self::put(&self.prefs, APPLY_MODE, &mode.as_str())
    }

    /// Sort mode of a tab
    #[must_use]
    pub fn sort_mode(&self, tab: Tab) -> SortMode {
        Self::get::<String>(&self.prefs, &Self::key(tab, SORT_MODE))
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Remember the sort mode of a tab
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the value cannot be encoded or written.
    pub fn set_sort_mode(&self, tab: Tab, mode: SortMode) -> Result<(), PrefsError> {
        Self::put(&self.prefs, &Self::key(tab, SORT_MODE), &mode.as_str())
    }

    /// Save or overwrite a preset
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::InvalidInput` for blank names, or a storage error.
    pub fn save_preset(&self, tab: Tab, preset: &Preset) -> Result<(), PrefsError> {
        if preset.name.trim().is_empty() {
            return Err(PrefsError::InvalidInput("Preset name cannot be empty".into()));
        }
        Self::put(&self.presets, &Self::key(tab, &preset.name), preset)
    }

    /// Look up a preset by name
    #[must_use]
    pub fn preset(&self, tab: Tab, name: &str) -> Option<Preset> {
        Self::get(&self.presets, &Self::key(tab, name))
    }

    /// All presets of a tab, sorted by name
    #[must_use]
    pub fn presets(&self, tab: Tab) -> Vec<Preset> {
        let prefix = Self::key(tab, "");
        let mut presets: Vec<Preset> = self
            .presets
            .scan_prefix(prefix.as_bytes())
            .filter_map(|entry| {
                let (key, value) = entry.ok()?;
                Self::decode(&String::from_utf8_lossy(&key), &value)
            })
            .collect();
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        presets
    }

    /// Delete a preset, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the database operation fails.
    pub fn delete_preset(&self, tab: Tab, name: &str) -> Result<bool, PrefsError> {
        Ok(self.presets.remove(Self::key(tab, name).as_bytes())?.is_some())
    }

    /// Clear every stored preference
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if clearing a tree fails.
    pub fn clear(&self) -> Result<(), PrefsError> {
        self.prefs.clear()?;
        self.presets.clear()?;
        Ok(())
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), PrefsError> {
        self.db.flush()?;
        Ok(())
    }
}

/// Put `names` at the front of `recent`, dropping duplicates and trimming to `limit`
#[must_use]
pub fn push_recent(recent: Vec<String>, names: &[String], limit: usize) -> Vec<String> {
    let mut updated: Vec<String> = Vec::with_capacity(limit);
    for name in names.iter().chain(recent.iter()) {
        if !updated.contains(name) {
            updated.push(name.clone());
        }
    }
    updated.truncate(limit);
    updated
}

#[cfg(test)]
#[path = "prefs_tests.rs"]
mod prefs_tests;
