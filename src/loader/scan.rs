//! CSV style files and styles directory scanning
//!
//! Each CSV row is `name, prompt, negative_prompt`. Blank rows are skipped,
//! a leading `name` row is treated as a header, and rows without a name are
//! dropped. Every `*.csv` file in a styles directory becomes one source,
//! labelled with its file name.

use super::{LoadError, StyleSet};
use crate::Style;
use glob::MatchOptions;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const BOM: char = '\u{feff}';

/// A directory of CSV style files and the priority of its styles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDir {
    pub path: PathBuf,
    #[serde(default)]
    pub priority: i64,
}

impl StyleDir {
    /// Create a new styles directory entry
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, priority: i64) -> Self {
        Self {
            path: path.into(),
            priority,
        }
    }

    /// CSV files in this directory, sorted by file name
    ///
    /// A missing directory yields no files.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Pattern` if the directory path cannot form a
    /// valid scan pattern.
    pub fn csv_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        if !self.path.is_dir() {
            tracing::debug!("Styles directory {} does not exist", self.path.display());
            return Ok(Vec::new());
        }
        let escaped = glob::Pattern::escape(&self.path.to_string_lossy());
        let pattern = format!("{escaped}/*.csv");
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        let mut files: Vec<PathBuf> = glob::glob_with(&pattern, options)?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
        Ok(files)
    }
}

/// Parse CSV style rows from a reader
///
/// Cells that are not valid UTF-8 are decoded lossily. A record that cannot
/// be read ends the parse, keeping the rows read before it.
///
/// # Errors
///
/// Returns `LoadError::Csv` if not even the first record can be read.
pub fn parse_csv<R: Read>(reader: R, source: &str, priority: i64) -> Result<Vec<Style>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut styles = Vec::new();
    let mut first_row = true;

    for (index, record) in csv_reader.byte_records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if index == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Stopped reading {source} at record {}: {e}", index + 1);
                break;
            }
        };
        let cells: Vec<String> = record
            .iter()
            .map(|c| {
                String::from_utf8_lossy(c)
                    .trim_start_matches(BOM)
                    .trim()
                    .to_string()
            })
            .collect();
        let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or_default();

        if cells.iter().all(String::is_empty) {
            continue;
        }
        if first_row {
            first_row = false;
            if cell(0).eq_ignore_ascii_case("name") {
                continue;
            }
        }

        let name = cell(0);
        if name.is_empty() {
            continue;
        }
        styles.push(Style {
            name: name.to_string(),
            prompt: non_empty(cell(1)),
            negative_prompt: non_empty(cell(2)),
            source: Some(source.to_string()),
            source_priority: Some(priority),
            ..Style::default()
        });
    }
    Ok(styles)
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Parse one CSV file, labelling styles with the file name
///
/// Unreadable or malformed files are logged and yield no styles.
#[must_use]
pub fn parse_csv_file(path: &Path, priority: i64) -> Vec<Style> {
    let label = source_label(path);
    let result = File::open(path)
        .map_err(LoadError::from)
        .and_then(|file| parse_csv(file, &label, priority));

    match result {
        Ok(styles) => styles,
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", path.display());
            Vec::new()
        }
    }
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Scan styles directories into one style set
///
/// Directories are visited in the given order and files by name. Every file
/// found becomes a source, even when it holds no styles.
///
/// # Errors
///
/// Returns `LoadError::Pattern` if a directory path cannot be scanned.
pub fn scan_dirs(dirs: &[StyleDir]) -> Result<StyleSet, LoadError> {
    let mut set = StyleSet::default();
    for dir in dirs {
        for path in dir.csv_files()? {
            let label = source_label(&path);
            set.styles.extend(parse_csv_file(&path, dir.priority));
            if !set.sources.contains(&label) {
                set.sources.push(label);
            }
        }
    }
    tracing::info!(
        styles = set.styles.len(),
        sources = set.sources.len(),
        "scanned styles directories"
    );
    Ok(set)
}

/// Snapshot of the CSV files in the styles directories
///
/// Two fingerprints differ when a file was added, removed, resized or
/// touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint(Vec<(PathBuf, u64, Option<SystemTime>)>);

impl Fingerprint {
    /// Number of files covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no CSV file was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fingerprint the CSV files of the styles directories
///
/// # Errors
///
/// Returns `LoadError::Pattern` if a directory path cannot be scanned.
pub fn fingerprint(dirs: &[StyleDir]) -> Result<Fingerprint, LoadError> {
    let mut entries = Vec::new();
    for dir in dirs {
        for path in dir.csv_files()? {
            let (len, modified) = fs::metadata(&path)
                .map(|m| (m.len(), m.modified().ok()))
                .unwrap_or((0, None));
            entries.push((path, len, modified));
        }
    }
    Ok(Fingerprint(entries))
}
