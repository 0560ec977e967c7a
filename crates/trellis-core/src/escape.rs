//! Markup escaping.
//!
//! Text nodes escape `&`, `<` and `>`; attribute values additionally escape
//! `"`. Everything else, including non-ASCII, is written as literal UTF-8.

use std::borrow::Cow;

/// Escape a text node.
///
/// ```
/// # use trellis_core::escape::escape_text;
/// assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_text("plain"), "plain");
/// ```
pub fn escape_text(value: &str) -> Cow<'_, str> {
    escape_with(value, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape a double-quoted attribute value.
///
/// ```
/// # use trellis_core::escape::escape_attribute;
/// assert_eq!(escape_attribute(r#"say "hi""#), "say &quot;hi&quot;");
/// ```
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape_with(value, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        _ => None,
    })
}

fn escape_with(value: &str, replace: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = value.find(|c| replace(c).is_some()) else {
        return Cow::Borrowed(value);
    };

    let mut out = String::with_capacity(value.len() + 8);
    out.push_str(&value[..first]);
    for c in value[first..].chars() {
        match replace(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
