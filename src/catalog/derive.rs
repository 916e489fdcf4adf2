//! Category and display-name derivation
//!
//! A style named `CATEGORY_Rest_Of_Name` belongs to `CATEGORY` and is shown as
//! `Rest Of Name`. Names without a qualifying prefix fall into [`OTHER_CATEGORY`].

use crate::Style;

/// Category for styles whose name carries no usable prefix
pub const OTHER_CATEGORY: &str = "OTHER";

const MIN_PREFIX_LEN: usize = 2;

/// Derive `(category, display_name)` from a raw style name
///
/// The prefix before the first underscore is the category when it is at
/// least two characters long and unchanged by uppercasing. Otherwise the
/// category is `OTHER` and the whole name becomes the display name.
///
/// # Examples
/// ```
/// use stylegrid::catalog::derive_names;
///
/// assert_eq!(derive_names("STYLE_Soft_Focus"), ("STYLE".into(), "Soft Focus".into()));
/// assert_eq!(derive_names("abc"), ("OTHER".into(), "abc".into()));
/// ```
#[must_use]
pub fn derive_names(name: &str) -> (String, String) {
    if let Some((prefix, rest)) = name.split_once('_')
        && is_category_prefix(prefix)
    {
        return (prefix.to_string(), rest.replace('_', " "));
    }
    (OTHER_CATEGORY.to_string(), name.replace('_', " "))
}

fn is_category_prefix(prefix: &str) -> bool {
    prefix.chars().count() >= MIN_PREFIX_LEN && prefix == prefix.to_uppercase()
}

/// Return a copy of `style` with `category` and `display_name` filled in
#[must_use]
pub fn with_derived_names(style: &Style) -> Style {
    let (category, display_name) = derive_names(&style.name);
    Style {
        category,
        display_name,
        ..style.clone()
    }
}
