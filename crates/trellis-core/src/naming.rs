//! Name normalization helpers.
//!
//! Class tokens are derived from tag names and `name` attributes by
//! [`slugify`]; binding keys are derived from attribute names by
//! [`camel_case`].

use std::fmt;

use serde::Deserialize;

/// How word boundaries inside a class token are joined.
///
/// Deserialized from a plain string: `"^"` selects camelCase, anything else
/// is used literally (`"-"` keeps dashes, `""` glues words together).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TagJoiner {
    /// Join words with a literal separator.
    Literal(String),
    /// `multiTagNames`.
    Camel,
}

impl Default for TagJoiner {
    fn default() -> Self {
        TagJoiner::Literal("-".to_string())
    }
}

impl From<String> for TagJoiner {
    fn from(value: String) -> Self {
        if value == "^" {
            TagJoiner::Camel
        } else {
            TagJoiner::Literal(value)
        }
    }
}

impl From<&str> for TagJoiner {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Display for TagJoiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagJoiner::Literal(sep) => write!(f, "{sep}"),
            TagJoiner::Camel => write!(f, "^"),
        }
    }
}

/// Split on runs of non-alphanumeric characters, dropping empty words.
fn words(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a tag name or free-form label into a class token.
///
/// The value is lowercased and every run of non-alphanumeric characters
/// becomes a single joiner. Leading and trailing separators are dropped.
///
/// ```
/// # use trellis_core::naming::{slugify, TagJoiner};
/// assert_eq!(slugify("Main  Menu!", &TagJoiner::default()), "main-menu");
/// assert_eq!(slugify("main-menu", &TagJoiner::from("")), "mainmenu");
/// assert_eq!(slugify("Main menu", &TagJoiner::Camel), "mainMenu");
/// ```
pub fn slugify(value: &str, joiner: &TagJoiner) -> String {
    let lowered = value.to_lowercase();
    let parts = words(&lowered);

    match joiner {
        TagJoiner::Literal(sep) => parts.collect::<Vec<_>>().join(sep),
        TagJoiner::Camel => parts
            .enumerate()
            .map(|(i, word)| if i == 0 { word.to_string() } else { capitalize(word) })
            .collect(),
    }
}

/// Convert a hyphenated, underscored or spaced name into camelCase.
///
/// Only the first character of each word changes case, so
/// `data-user-ID` becomes `dataUserID`.
///
/// ```
/// # use trellis_core::naming::camel_case;
/// assert_eq!(camel_case("data-id"), "dataId");
/// assert_eq!(camel_case("aria_label"), "ariaLabel");
/// assert_eq!(camel_case("href"), "href");
/// ```
pub fn camel_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, word) in value
        .split([' ', '-', '_'])
        .filter(|word| !word.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(&decapitalize(word));
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_tag_joiner_from_string() {
        assert_eq!(TagJoiner::from("^"), TagJoiner::Camel);
        assert_eq!(TagJoiner::from("-"), TagJoiner::Literal("-".to_string()));
        assert_eq!(TagJoiner::from(""), TagJoiner::Literal(String::new()));
        assert_eq!(TagJoiner::Camel.to_string(), "^");
    }

    #[test]
    fn test_slugify_dash() {
        let dash = TagJoiner::default();
        assert_eq!(slugify("Card", &dash), "card");
        assert_eq!(slugify("Intro", &dash), "intro");
        assert_eq!(slugify("card-header", &dash), "card-header");
        assert_eq!(slugify("  Hello, World  ", &dash), "hello-world");
        assert_eq!(slugify("--", &dash), "");
    }

    #[test]
    fn test_slugify_empty_joiner() {
        assert_eq!(slugify("multi-tag-names", &TagJoiner::from("")), "multitagnames");
    }

    #[test]
    fn test_slugify_camel() {
        assert_eq!(slugify("multi-tag-names", &TagJoiner::Camel), "multiTagNames");
        assert_eq!(slugify("Nav Bar", &TagJoiner::Camel), "navBar");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Über Uns", &TagJoiner::default()), "über-uns");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("data-id"), "dataId");
        assert_eq!(camel_case("data-user-ID"), "dataUserID");
        assert_eq!(camel_case("Title"), "title");
        assert_eq!(camel_case("x--y"), "xY");
    }

    proptest! {
        #[test]
        fn slug_has_no_separator_runs(value in "[A-Za-z0-9 _.-]{0,24}") {
            let slug = slugify(&value, &TagJoiner::default());
            prop_assert!(!slug.contains("--"));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert_eq!(slug.to_lowercase(), slug.clone());
        }
    }
}
