//! Prompt merging: splicing style fragments into prompt text
//!
//! A fragment either contains the [`PLACEHOLDER`] token, in which case it
//! wraps the current text, or it is appended as a comma-separated item.
//! Appended fragments can be removed again with [`remove_fragment`];
//! wrapped ones cannot, which is why [`append_tracked`] reports what was
//! literally inserted.
//!
//! ```
//! use stylegrid::merge::{append_fragment, remove_fragment};
//!
//! let applied = append_fragment("a cat", "4k");
//! assert_eq!(applied, "a cat, 4k");
//! assert_eq!(remove_fragment(&applied, "4k"), "a cat");
//! ```

use crate::Style;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Marker meaning "insert the current prompt here"
pub const PLACEHOLDER: &str = "{prompt}";

/// Separator placed between appended fragments
pub const SEPARATOR: &str = ", ";

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*$").expect("trailing comma pattern is valid"));
static TRAILING_COMMA_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",[ ]*$").expect("trailing comma pattern is valid"));
static LEADING_COMMA_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^,[ ]*").expect("leading comma pattern is valid"));

/// The two host text fields styles contribute to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptField {
    Prompt,
    Negative,
}

impl PromptField {
    /// Both fields, positive first
    pub const ALL: [Self; 2] = [Self::Prompt, Self::Negative];
}

impl fmt::Display for PromptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt => write!(f, "prompt"),
            Self::Negative => write!(f, "negative prompt"),
        }
    }
}

/// Literal text a style injected into each field
///
/// `None` for a field means nothing removable was added there, either
/// because the style has no fragment for it or because the fragment used
/// the placeholder form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedRecord {
    pub prompt: Option<String>,
    pub negative: Option<String>,
}

impl AppliedRecord {
    /// Recorded literal for a field
    #[must_use]
    pub fn get(&self, field: PromptField) -> Option<&str> {
        match field {
            PromptField::Prompt => self.prompt.as_deref(),
            PromptField::Negative => self.negative.as_deref(),
        }
    }

    /// Record the literal for a field
    pub fn set(&mut self, field: PromptField, literal: Option<String>) {
        match field {
            PromptField::Prompt => self.prompt = literal,
            PromptField::Negative => self.negative = literal,
        }
    }
}

/// True when the fragment wraps the current text instead of appending
#[must_use]
pub fn uses_placeholder(fragment: &str) -> bool {
    fragment.contains(PLACEHOLDER)
}

/// Add one fragment to the current field text
///
/// Placeholder fragments replace their first placeholder with `current` and
/// become the whole field. Plain fragments are appended after stripping a
/// trailing comma, separated by `", "` unless the field is blank.
#[must_use]
pub fn append_fragment(current: &str, fragment: &str) -> String {
    append_tracked(current, fragment).0
}

/// Like [`append_fragment`], also returning the literal that can later be removed
///
/// The literal is `None` for empty and placeholder fragments.
#[must_use]
pub fn append_tracked(current: &str, fragment: &str) -> (String, Option<String>) {
    if fragment.is_empty() {
        return (current.to_string(), None);
    }
    if uses_placeholder(fragment) {
        return (fragment.replacen(PLACEHOLDER, current, 1), None);
    }
    (append_plain(current, fragment), Some(fragment.to_string()))
}

fn append_plain(current: &str, addition: &str) -> String {
    let separator = if current.trim().is_empty() { "" } else { SEPARATOR };
    let base = TRAILING_COMMA.replace(current, "");
    format!("{base}{separator}{addition}")
}

/// Apply several fragments to one field
///
/// Placeholder fragments are applied one at a time in order, each wrapping
/// the previous result. Plain fragments are joined with `", "` and appended
/// once at the end.
#[must_use]
pub fn apply_fragments<S: AsRef<str>>(current: &str, fragments: &[S]) -> String {
    let mut text = current.to_string();
    let mut plain: Vec<&str> = Vec::new();

    for fragment in fragments.iter().map(AsRef::as_ref) {
        if fragment.is_empty() {
            continue;
        }
        if uses_placeholder(fragment) {
            text = fragment.replacen(PLACEHOLDER, &text, 1);
        } else {
            plain.push(fragment);
        }
    }

    if plain.is_empty() {
        text
    } else {
        append_plain(&text, &plain.join(SEPARATOR))
    }
}

/// Apply the given field of several styles at once
#[must_use]
pub fn apply_styles<'a>(
    current: &str,
    styles: impl IntoIterator<Item = &'a Style>,
    field: PromptField,
) -> String {
    let fragments: Vec<&str> = styles
        .into_iter()
        .filter_map(|s| s.fragment(field))
        .collect();
    apply_fragments(current, &fragments)
}

/// Remove the first occurrence of a previously appended fragment
///
/// The comma joining the fragment to its neighbours is removed with it. If
/// the fragment is not present the text is returned unchanged.
#[must_use]
pub fn remove_fragment(current: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        return current.to_string();
    }
    let Some(pos) = current.find(fragment) else {
        return current.to_string();
    };

    let before = TRAILING_COMMA_SPACES.replace(&current[..pos], "");
    let after = LEADING_COMMA_SPACES.replace(&current[pos + fragment.len()..], "");

    if !before.trim().is_empty() && !after.trim().is_empty() {
        format!("{}{SEPARATOR}{}", before.trim_end(), after.trim_start())
    } else {
        format!("{before}{after}").trim().to_string()
    }
}
