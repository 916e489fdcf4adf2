//! Search query language for the style catalog
//!
//! A query is free text with a few operators:
//!
//! - `"exact phrase"` - the phrase must appear verbatim
//! - `@CATEGORY` - restrict to a category (several are OR'd)
//! - `-word` - hide styles containing the word
//! - any other word - must appear (all words are AND'd)
//!
//! Matching is case-insensitive literal substring matching against a
//! searchable text blob built from the style (see [`search_text`]).
//!
//! ```
//! use stylegrid::search::{ParsedQuery, matches};
//!
//! let query = ParsedQuery::parse("water -ocean");
//! assert!(matches("calm water, lake", "SCENE", &query));
//! assert!(!matches("water meets ocean", "SCENE", &query));
//! ```

pub mod filter;
pub mod query;

pub use filter::{SearchScope, StyleFilterExt, category_shortcut, matches, search_text};
pub use query::ParsedQuery;
