//! View template placeholders.
//!
//! A view template is markup with two kinds of placeholders:
//!
//! - `{{ key }}` inserts the value bound to `key`, escaped for markup
//! - `{{{ key }}}` inserts the value verbatim, so bound markup survives
//!
//! Keys are made of letters, digits, `_`, `-` and `.`. Rendering produces
//! markup text that is then parsed with [`parse`](crate::parse).

use trellis_core::escape::escape_attribute;
use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, cut_err, preceded, repeat},
    stream::{LocatingSlice, Location},
    token::{literal, rest, take_until, take_while},
};

use crate::{
    error::{ErrorCode, ParseError},
    lexer::{IResult, Input, LexerDiagnostic, convert_err_mode},
};

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Markup copied to the output unchanged.
    Literal(String),
    /// `{{ key }}`
    Escaped(String),
    /// `{{{ key }}}`
    Raw(String),
}

/// A parsed view template.
///
/// # Example
///
/// ```
/// # use trellis_parser::template::Template;
/// let template = Template::parse("<h1 class=\"{{ class }}\">{{ title }}</h1>").unwrap();
/// let html = template.render(|key| match key {
///     "class" => Some("card__title".to_string()),
///     "title" => Some("Fish & Chips".to_string()),
///     _ => None,
/// });
/// assert_eq!(html, "<h1 class=\"card__title\">Fish &amp; Chips</h1>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

fn placeholder_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
    })
    .parse_next(input)
}

/// Parse a placeholder body between `open` and `close`.
///
/// Commits once `open` has been seen.
fn placeholder<'a>(
    input: &mut Input<'a>,
    open: &'static str,
    close: &'static str,
) -> IResult<&'a str> {
    let start = input.current_token_start();

    preceded(
        literal(open),
        cut_err((
            multispace0,
            placeholder_name.context(LexerDiagnostic {
                code: ErrorCode::E201,
                message: "invalid placeholder name",
                help: Some("names use letters, digits, `_`, `-` and `.`"),
                start,
            }),
            multispace0,
            literal(close).context(LexerDiagnostic {
                code: ErrorCode::E200,
                message: "unterminated placeholder",
                help: Some("close the placeholder with the same number of braces"),
                start,
            }),
        )),
    )
    .map(|(_, name, _, _)| name)
    .parse_next(input)
}

fn raw_placeholder(input: &mut Input<'_>) -> IResult<Segment> {
    placeholder(input, "{{{", "}}}").map(|name| Segment::Raw(name.to_string()))
}

fn escaped_placeholder(input: &mut Input<'_>) -> IResult<Segment> {
    placeholder(input, "{{", "}}").map(|name| Segment::Escaped(name.to_string()))
}

fn literal_text(input: &mut Input<'_>) -> IResult<Segment> {
    alt((
        take_until(1.., "{{"),
        rest.verify(|text: &str| !text.is_empty()),
    ))
    .map(|text: &str| Segment::Literal(text.to_string()))
    .parse_next(input)
}

fn segments(input: &mut Input<'_>) -> IResult<Vec<Segment>> {
    repeat(0.., alt((raw_placeholder, escaped_placeholder, literal_text))).parse_next(input)
}

impl Template {
    /// Parse template source.
    ///
    /// Fails on the first malformed placeholder.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut input = LocatingSlice::new(source);
        match segments(&mut input) {
            Ok(segments) => Ok(Self { segments }),
            Err(err) => Err(convert_err_mode(err, input.current_token_start()).into()),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder keys in order of appearance, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Escaped(key) | Segment::Raw(key) => Some(key.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render with `lookup` supplying the value of each key.
    ///
    /// Unknown keys render as nothing.
    pub fn render<F>(&self, mut lookup: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Escaped(key) => {
                    if let Some(value) = lookup(key) {
                        out.push_str(&escape_attribute(&value));
                    }
                }
                Segment::Raw(key) => {
                    if let Some(value) = lookup(key) {
                        out.push_str(&value);
                    }
                }
            }
        }
        out
    }

    /// Whether the template contains no placeholders.
    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let template = Template::parse("<p>{{ title }} {{{body}}}</p>").unwrap();

        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("<p>".to_string()),
                Segment::Escaped("title".to_string()),
                Segment::Literal(" ".to_string()),
                Segment::Raw("body".to_string()),
                Segment::Literal("</p>".to_string()),
            ]
        );
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["title", "body"]);
    }

    #[test]
    fn test_static_template() {
        let template = Template::parse("<div class=\"card\"><yield/></div>").unwrap();
        assert!(template.is_static());
        assert_eq!(template.render(|_| None), "<div class=\"card\"><yield/></div>");
    }

    #[test]
    fn test_single_brace_is_literal() {
        let template = Template::parse("<style>a { color: red }</style>").unwrap();
        assert!(template.is_static());
    }

    #[test]
    fn test_render_escapes_and_raw() {
        let template = Template::parse("{{ text }}|{{{ text }}}|{{ missing }}").unwrap();
        let rendered = template.render(|key| (key == "text").then(|| "<b>\"x\"</b>".to_string()));

        assert_eq!(rendered, "&lt;b&gt;&quot;x&quot;&lt;/b&gt;|<b>\"x\"</b>|");
    }

    #[test]
    fn test_dotted_and_hyphenated_keys() {
        let template = Template::parse("{{ data-id }}{{ user.name }}").unwrap();
        assert_eq!(
            template.placeholders().collect::<Vec<_>>(),
            vec!["data-id", "user.name"]
        );
    }

    #[test]
    fn test_unterminated_placeholder() {
        let err = Template::parse("<p>{{ title </p>").unwrap_err();
        let diagnostic = &err.diagnostics()[0];

        assert_eq!(diagnostic.code(), Some(ErrorCode::E200));
        assert_eq!(diagnostic.labels()[0].span().start(), 3);
    }

    #[test]
    fn test_invalid_placeholder_name() {
        let err = Template::parse("{{ }}").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E201));

        let err = Template::parse("{{{ <b> }}}").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E201));
    }
}
