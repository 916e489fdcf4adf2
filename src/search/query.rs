//! Query parsing

use regex::Regex;
use std::sync::LazyLock;

static PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("phrase pattern is valid"));

/// Structured search criteria parsed from a raw query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Quoted phrases, lowercased, each must appear verbatim
    pub phrases: Vec<String>,
    /// Plain words, lowercased, each must appear
    pub words: Vec<String>,
    /// Uppercased category names, the style's category must be one of them
    pub categories: Vec<String>,
    /// Lowercased words that hide a style when present
    pub excluded: Vec<String>,
}

impl ParsedQuery {
    /// Parse a raw query
    ///
    /// Quoted phrases are pulled out first, the rest is split on whitespace.
    /// A bare `@` is ignored and a bare `-` is a plain word.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut query = Self::default();

        let remaining = PHRASE.replace_all(raw, |caps: &regex::Captures<'_>| {
            let phrase = caps[1].trim().to_lowercase();
            if !phrase.is_empty() {
                query.phrases.push(phrase);
            }
            " "
        });

        for token in remaining.split_whitespace() {
            if let Some(category) = token.strip_prefix('@') {
                if !category.is_empty() {
                    query.categories.push(category.to_uppercase());
                }
            } else if let Some(word) = token.strip_prefix('-')
                && !word.is_empty()
            {
                query.excluded.push(word.to_lowercase());
            } else {
                query.words.push(token.to_lowercase());
            }
        }
        query
    }

    /// True when the query places no restriction at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
            && self.words.is_empty()
            && self.categories.is_empty()
            && self.excluded.is_empty()
    }
}
