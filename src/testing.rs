//! Testing utilities for stylegrid
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestPrefs` wrapper for a throwaway preference store and a
//! `TestStylesDir` fixture for CSV scanning.
//!
//! Only available when compiled with `cfg(test)`.

use crate::Style;
use crate::catalog::with_derived_names;
use crate::loader::StyleDir;
use crate::prefs::Preferences;
use std::fs;
use std::ops::Deref;
use std::path::Path;
use tempfile::TempDir;

/// Temporary preference store, discarded on drop
pub struct TestPrefs {
    prefs: Preferences,
}

impl TestPrefs {
    /// Open an empty in-memory store
    ///
    /// # Panics
    /// Panics if the temporary database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let prefs = Preferences::temporary().expect("Failed to open test preferences");
        Self { prefs }
    }
}

impl Default for TestPrefs {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for TestPrefs {
    type Target = Preferences;

    fn deref(&self) -> &Preferences {
        &self.prefs
    }
}

/// A styles directory holding CSV files, removed on drop
pub struct TestStylesDir {
    dir: TempDir,
}

impl TestStylesDir {
    /// Create an empty styles directory
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create styles dir"),
        }
    }

    /// Write a CSV file into the directory
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn with_csv(self, file_name: &str, content: &str) -> Self {
        fs::write(self.dir.path().join(file_name), content).expect("Failed to write CSV");
        self
    }

    /// The directory as a scan entry with the given priority
    #[must_use]
    pub fn style_dir(&self, priority: i64) -> StyleDir {
        StyleDir::new(self.dir.path(), priority)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestStylesDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Bare style with only a name
#[must_use]
pub fn style(name: &str) -> Style {
    Style::new(name)
}

/// Style with derived display name and category and the given prompts
#[must_use]
pub fn derived(name: &str, prompt: &str, negative: &str) -> Style {
    let mut style = Style::new(name);
    if !prompt.is_empty() {
        style = style.with_prompt(prompt);
    }
    if !negative.is_empty() {
        style = style.with_negative(negative);
    }
    with_derived_names(&style)
}

/// A small mixed catalog spanning three categories and two sources
#[must_use]
pub fn sample_styles() -> Vec<Style> {
    vec![
        derived("STYLE_Ink_Wash", "ink wash, monochrome", "color").with_source("art.csv", 1),
        derived("STYLE_Neon", "neon glow", "").with_source("art.csv", 1),
        derived("SCENE_Lake", "calm lake, water", "").with_source("places.csv", 2),
        derived("SCENE_Frame", "{prompt}, on a lake shore", "").with_source("places.csv", 2),
        derived("Plain", "simple", "").with_source("art.csv", 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::scan_dirs;

    #[test]
    fn test_prefs_start_empty() {
        let prefs = TestPrefs::new();
        assert!(prefs.presets(crate::prefs::Tab::Txt2img).is_empty());
    }

    #[test]
    fn test_styles_dir_scans() {
        let dir = TestStylesDir::new().with_csv("a.csv", "A_One,x\n");
        assert!(dir.path().join("a.csv").exists());
        let set = scan_dirs(&[dir.style_dir(1)]).unwrap();
        assert_eq!(set.styles.len(), 1);
    }

    #[test]
    fn test_derived_style() {
        let s = derived("SCENE_Lake", "water", "");
        assert_eq!(s.category, "SCENE");
        assert_eq!(s.display_name, "Lake");
        assert_eq!(s.negative_prompt, None);
    }

    #[test]
    fn test_sample_styles() {
        let styles = sample_styles();
        assert_eq!(styles.len(), 5);
        assert_eq!(styles[4].category, "OTHER");
    }
}
