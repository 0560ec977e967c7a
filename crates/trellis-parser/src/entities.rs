//! Character reference decoding.
//!
//! Decoded:
//! - named references `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`
//! - numeric references `&#123;` and `&#x1F4A9;` that name a valid scalar
//!
//! Anything else (unknown names, missing `;`, invalid scalars) is kept
//! verbatim so authored text is never lost.

use std::borrow::Cow;

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{A0}'),
];

// Longest reference body we try to interpret, `#x10FFFF`.
const MAX_REFERENCE_LEN: usize = 8;

fn decode_reference(body: &str) -> Option<char> {
    if let Some(numeric) = body.strip_prefix('#') {
        let value = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) if !hex.is_empty() => u32::from_str_radix(hex, 16).ok()?,
            Some(_) => return None,
            None if !numeric.is_empty() => numeric.parse::<u32>().ok()?,
            None => return None,
        };
        return char::from_u32(value);
    }

    NAMED
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, c)| *c)
}

/// Decode character references in `raw`.
pub(crate) fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];

        let decoded = candidate
            .char_indices()
            .take(MAX_REFERENCE_LEN + 1)
            .find(|(_, c)| *c == ';')
            .and_then(|(end, _)| decode_reference(&candidate[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_references() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&quot;q&quot; &apos;"), "\"q\" '");
        assert_eq!(decode_entities("x&nbsp;y"), "x\u{A0}y");
    }

    #[test]
    fn test_numeric_references_become_utf8() {
        assert_eq!(decode_entities("&#228;&#xFC;&#X1F600;"), "äü😀");
    }

    #[test]
    fn test_malformed_references_are_kept() {
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#;&#x;"), "&#;&#x;");
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("&&amp;"), "&&");
    }

    #[test]
    fn test_borrows_without_ampersand() {
        assert!(matches!(decode_entities("plain"), Cow::Borrowed("plain")));
    }
}
