//! Style catalog: category buckets, source merging and display ordering
//!
//! Turns the flat list of style records supplied by the loader into the
//! category structure the panel renders, and resolves which record wins
//! when the same name is supplied by more than one source.
//!
//! # Examples
//!
//! ```
//! use stylegrid::Style;
//! use stylegrid::catalog::{categorize, order_categories};
//!
//! let styles = vec![
//!     Style::new("STYLE_Soft_Focus"),
//!     Style::new("SCENE_Beach"),
//!     Style::new("plain"),
//! ];
//! let categories = categorize(&styles);
//! let order = order_categories(&categories.names(), &["SCENE".to_string()]);
//! assert_eq!(order, vec!["SCENE", "STYLE", "OTHER"]);
//! ```

mod derive;

pub use derive::{OTHER_CATEGORY, derive_names, with_derived_names};

use crate::Style;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Priority of styles from the tool's root styles file
pub const SOURCE_PRIORITY_ROOT: i64 = 0;
/// Priority of styles shipped alongside the picker
pub const SOURCE_PRIORITY_INTERNAL: i64 = 1;
/// Priority of styles the user placed in their own folder
pub const SOURCE_PRIORITY_USER: i64 = 2;

/// One category bucket, styles kept in the order they were processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub styles: Vec<Style>,
}

/// Ordered mapping from category name to its styles
///
/// Buckets keep discovery order; lookups go through a name index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    buckets: Vec<Category>,
    index: HashMap<String, usize>,
}

impl Categories {
    /// Append a style (with derived fields already set) to its bucket
    pub fn push(&mut self, style: Style) {
        if let Some(&i) = self.index.get(&style.category) {
            self.buckets[i].styles.push(style);
        } else {
            self.index.insert(style.category.clone(), self.buckets.len());
            self.buckets.push(Category {
                name: style.category.clone(),
                styles: vec![style],
            });
        }
    }

    /// Styles in a category, `None` if the category is not present
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&[Style]> {
        self.index
            .get(category)
            .map(|&i| self.buckets[i].styles.as_slice())
    }

    /// Category names in discovery order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.buckets.iter().map(|c| c.name.clone()).collect()
    }

    /// Iterate over buckets in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.buckets.iter()
    }

    /// Iterate over every style, bucket by bucket
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.buckets.iter().flat_map(|c| c.styles.iter())
    }

    /// Find a style by its raw name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Style> {
        self.styles().find(|s| s.name == name)
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no style was categorized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Which source the user is looking at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceSelection {
    /// Every source, duplicates merged by priority
    #[default]
    All,
    /// Exactly one source
    Named(String),
}

impl SourceSelection {
    /// Interpret a stored or typed source value
    ///
    /// Empty values, the configured "all sources" label and `all` select
    /// every source.
    #[must_use]
    pub fn parse(value: &str, all_label: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == all_label || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    /// Value to persist or display
    #[must_use]
    pub fn label<'a>(&'a self, all_label: &'a str) -> &'a str {
        match self {
            Self::All => all_label,
            Self::Named(name) => name,
        }
    }
}

/// Group styles by derived category
///
/// Every style gets its `category` and `display_name` derived from its name.
/// Categories appear in the order they are first seen and styles keep their
/// input order within a bucket.
#[must_use]
pub fn categorize(styles: &[Style]) -> Categories {
    let mut categories = Categories::default();
    for style in styles {
        categories.push(with_derived_names(style));
    }
    tracing::debug!(
        styles = styles.len(),
        categories = categories.len(),
        "categorized styles"
    );
    categories
}

/// Deduplicate styles by name, keeping the highest `source_priority`
///
/// Missing priorities count as [`SOURCE_PRIORITY_ROOT`]. On a tie the record
/// seen first wins. Output follows the order in which each name first
/// appeared. Records with an empty name are dropped.
#[must_use]
pub fn merge_by_priority(styles: &[Style]) -> Vec<Style> {
    let mut merged: Vec<Style> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for style in styles {
        if style.name.is_empty() {
            continue;
        }
        match positions.get(style.name.as_str()) {
            Some(&i) => {
                if style.priority() > merged[i].priority() {
                    merged[i] = style.clone();
                }
            }
            None => {
                positions.insert(style.name.as_str(), merged.len());
                merged.push(style.clone());
            }
        }
    }
    merged
}

/// Styles visible for a source selection
///
/// `All` merges duplicates by priority. A named source keeps exactly the
/// records from that source, duplicates included, in input order.
#[must_use]
pub fn filter_by_source(styles: &[Style], selection: &SourceSelection) -> Vec<Style> {
    match selection {
        SourceSelection::All => merge_by_priority(styles),
        SourceSelection::Named(source) => styles
            .iter()
            .filter(|s| s.source.as_deref() == Some(source.as_str()))
            .cloned()
            .collect(),
    }
}

/// Display order of categories
///
/// Configured categories that are present come first in configured order;
/// the remaining present categories follow in discovery order.
#[must_use]
pub fn order_categories(present: &[String], configured: &[String]) -> Vec<String> {
    let present_set: HashSet<&str> = present.iter().map(String::as_str).collect();
    let mut ordered: Vec<String> = Vec::with_capacity(present.len());
    let mut placed: HashSet<&str> = HashSet::new();

    for name in configured {
        if present_set.contains(name.as_str()) && placed.insert(name.as_str()) {
            ordered.push(name.clone());
        }
    }
    for name in present {
        if placed.insert(name.as_str()) {
            ordered.push(name.clone());
        }
    }
    ordered
}

/// Sources offered to the user
///
/// The declared list wins when non-empty; otherwise the distinct `source`
/// values of the styles in first-seen order.
#[must_use]
pub fn sources_of(styles: &[Style], declared: &[String]) -> Vec<String> {
    if !declared.is_empty() {
        return declared.to_vec();
    }
    let mut seen = HashSet::new();
    styles
        .iter()
        .filter_map(|s| s.source.as_deref())
        .filter(|s| !s.is_empty() && seen.insert(*s))
        .map(String::from)
        .collect()
}
