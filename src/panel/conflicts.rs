//! Warnings about selected styles that work against each other
//!
//! Two situations are reported: a term one style asks for that another
//! style's negative prompt forbids, and several styles wrapping the same
//! field with the placeholder, where only the last wrap sees the user's text
//! unwrapped.

use crate::Style;
use crate::merge::{PLACEHOLDER, PromptField, uses_placeholder};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A detected conflict between selected styles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// `positive` asks for `term`, which `negative` lists in its negative prompt
    Contradiction {
        term: String,
        positive: String,
        negative: String,
    },
    /// Several styles wrap the same field with the placeholder
    PlaceholderClash { field: PromptField, styles: Vec<String> },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contradiction {
                term,
                positive,
                negative,
            } => write!(f, "'{term}' is requested by {positive} but excluded by {negative}"),
            Self::PlaceholderClash { field, styles } => {
                write!(f, "{} all wrap the {field} field", styles.join(", "))
            }
        }
    }
}

/// Comma-separated terms of a fragment, trimmed and lowercased
fn terms(fragment: &str) -> BTreeSet<String> {
    fragment
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty() && t != PLACEHOLDER)
        .collect()
}

/// Find conflicts among the selected styles
///
/// Results are ordered by the order of `styles`, contradictions first.
#[must_use]
pub fn detect(styles: &[Style]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    let positives: Vec<BTreeSet<String>> = styles
        .iter()
        .map(|s| s.fragment(PromptField::Prompt).map(terms).unwrap_or_default())
        .collect();
    let negatives: Vec<BTreeSet<String>> = styles
        .iter()
        .map(|s| s.fragment(PromptField::Negative).map(terms).unwrap_or_default())
        .collect();

    for (i, wanted) in positives.iter().enumerate() {
        for (j, forbidden) in negatives.iter().enumerate() {
            if i == j {
                continue;
            }
            for term in wanted.intersection(forbidden) {
                conflicts.push(Conflict::Contradiction {
                    term: term.clone(),
                    positive: styles[i].name.clone(),
                    negative: styles[j].name.clone(),
                });
            }
        }
    }

    for field in PromptField::ALL {
        let wrapping: Vec<String> = styles
            .iter()
            .filter(|s| s.fragment(field).is_some_and(uses_placeholder))
            .map(|s| s.name.clone())
            .collect();
        if wrapping.len() > 1 {
            conflicts.push(Conflict::PlaceholderClash {
                field,
                styles: wrapping,
            });
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_conflicts() {
        let styles = vec![
            Style::new("A").with_prompt("4k").with_negative("blurry"),
            Style::new("B").with_prompt("sharp"),
        ];
        assert!(detect(&styles).is_empty());
    }

    #[test]
    fn test_contradiction_is_case_and_space_insensitive() {
        let styles = vec![
            Style::new("Color").with_prompt("vivid,  Colorful "),
            Style::new("Mono").with_negative("colorful, noise"),
        ];
        assert_eq!(
            detect(&styles),
            vec![Conflict::Contradiction {
                term: "colorful".into(),
                positive: "Color".into(),
                negative: "Mono".into(),
            }]
        );
    }

    #[test]
    fn test_own_negative_is_not_a_conflict() {
        let styles = vec![Style::new("Odd").with_prompt("grain").with_negative("grain")];
        assert!(detect(&styles).is_empty());
    }

    #[test]
    fn test_placeholder_clash() {
        let styles = vec![
            Style::new("A").with_prompt("x, {prompt}"),
            Style::new("B").with_prompt("{prompt}, y"),
            Style::new("C").with_negative("{prompt}, z"),
        ];
        assert_eq!(
            detect(&styles),
            vec![Conflict::PlaceholderClash {
                field: PromptField::Prompt,
                styles: vec!["A".into(), "B".into()],
            }]
        );
    }

    #[test]
    fn test_placeholder_term_ignored() {
        let styles = vec![
            Style::new("A").with_prompt("{prompt}"),
            Style::new("B").with_negative("{prompt}"),
        ];
        assert!(detect(&styles).is_empty());
    }

    #[test]
    fn test_display() {
        let conflict = Conflict::PlaceholderClash {
            field: PromptField::Negative,
            styles: vec!["A".into(), "B".into()],
        };
        assert_eq!(conflict.to_string(), "A, B all wrap the negative prompt field");
    }
}
