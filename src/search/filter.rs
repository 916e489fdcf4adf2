//! Style matching against parsed queries
//!
//! # Iterator Adapters
//!
//! [`StyleFilterExt`] adds query filtering to any iterator of `&Style`:
//!
//! ```
//! use stylegrid::Style;
//! use stylegrid::search::{ParsedQuery, SearchScope, StyleFilterExt};
//!
//! let styles = vec![Style::new("SCENE_Lake").with_prompt("calm water")];
//! let query = ParsedQuery::parse("water");
//! let visible = styles.iter().matching(&query, SearchScope::Full);
//! assert_eq!(visible.len(), 1);
//! ```

use super::query::ParsedQuery;
use crate::Style;
use serde::{Deserialize, Serialize};

/// Which style fields plain words, phrases and exclusions are matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchScope {
    /// Name, display name and both prompt fragments
    #[default]
    Full,
    /// Name and display name only
    NameOnly,
}

/// Build the lowercased, whitespace-collapsed searchable text of a style
#[must_use]
pub fn search_text(style: &Style, scope: SearchScope) -> String {
    let mut parts: Vec<&str> = vec![style.name.as_str(), style.display_name.as_str()];
    if scope == SearchScope::Full {
        parts.extend(style.prompt.as_deref());
        parts.extend(style.negative_prompt.as_deref());
    }
    parts
        .iter()
        .flat_map(|p| p.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Decide whether a style is visible for a query
///
/// `text` is the style's searchable text (see [`search_text`]) and
/// `category` the category it is displayed under. Every token is matched as
/// a literal substring; nothing in a query is ever treated as a pattern.
#[must_use]
pub fn matches(text: &str, category: &str, query: &ParsedQuery) -> bool {
    let text = text.to_lowercase();

    if !query.categories.is_empty() && !query.categories.iter().any(|c| c == category) {
        return false;
    }
    if query.excluded.iter().any(|word| text.contains(word.as_str())) {
        return false;
    }
    query.phrases.iter().all(|phrase| text.contains(phrase.as_str()))
        && query.words.iter().all(|word| text.contains(word.as_str()))
}

/// Category selected by typing a prefix of its name
///
/// Returns the first category (in the given display order) that the whole
/// trimmed query is a case-insensitive prefix of. Empty queries select
/// nothing.
#[must_use]
pub fn category_shortcut<'a>(raw: &str, categories: &'a [String]) -> Option<&'a str> {
    let needle = raw.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    categories
        .iter()
        .find(|c| c.to_lowercase().starts_with(&needle))
        .map(String::as_str)
}

/// Extension trait for filtering iterators of styles by a parsed query
pub trait StyleFilterExt<'a>: Iterator<Item = &'a Style> + Sized {
    /// Keep styles matching the query, each under its own derived category
    fn matching(self, query: &ParsedQuery, scope: SearchScope) -> Vec<&'a Style> {
        self.filter(|s| matches(&search_text(s, scope), &s.category, query))
            .collect()
    }

    /// Keep styles matching the query as if they were displayed under `category`
    fn matching_in(self, category: &str, query: &ParsedQuery, scope: SearchScope) -> Vec<&'a Style> {
        self.filter(|s| matches(&search_text(s, scope), category, query))
            .collect()
    }
}

impl<'a, I> StyleFilterExt<'a> for I where I: Iterator<Item = &'a Style> {}
