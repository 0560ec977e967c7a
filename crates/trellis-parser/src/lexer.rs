//! Lexical analyzer for markup source text.
//!
//! The lexer converts source text into a flat stream of [`Token`]s: start
//! and end tags with their attributes, text runs, comments, CDATA sections,
//! declarations and processing instructions.
//!
//! The public entry point is [`tokenize`], which recovers after each error
//! and collects every diagnostic in a single pass.

use std::borrow::Cow;

use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{alt, cut_err, not, opt, peek, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_till, take_until, take_while},
};

use crate::{
    entities::decode_entities,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{Attribute, PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()` so a failure carries its code,
/// help text and the offset where the failing construct started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

pub(crate) type Input<'a> = LocatingSlice<&'a str>;
pub(crate) type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Elements whose body is kept verbatim up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
}

fn tag_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., is_name_char)
        .verify(|name: &str| name.starts_with(is_name_start))
        .parse_next(input)
}

fn attribute_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
    })
    .parse_next(input)
}

/// A single- or double-quoted value. Commits once the opening quote is seen.
fn quoted_value<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    let start = input.current_token_start();

    alt((
        preceded('"', cut_err(terminated(take_till(0.., '"'), '"'))),
        preceded('\'', cut_err(terminated(take_till(0.., '\''), '\''))),
    ))
    .context(LexerDiagnostic {
        code: ErrorCode::E003,
        message: "unterminated attribute value",
        help: Some("add the closing quote"),
        start,
    })
    .parse_next(input)
}

fn bare_value<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, '"' | '\'' | '<' | '>' | '=' | '`')
    })
    .parse_next(input)
}

/// `name`, `name=value`, `name="value"` or `name='value'`.
fn attribute<'a>(input: &mut Input<'a>) -> IResult<Attribute<'a>> {
    (
        attribute_name,
        opt(preceded(
            (multispace0, '=', multispace0),
            alt((quoted_value, bare_value)),
        )),
    )
        .with_span()
        .map(|((name, value), range)| Attribute {
            name,
            value: value.map_or(Cow::Borrowed(""), decode_entities),
            span: Span::new(range),
        })
        .parse_next(input)
}

fn attributes<'a>(input: &mut Input<'a>) -> IResult<Vec<Attribute<'a>>> {
    repeat(0.., preceded(multispace1, attribute)).parse_next(input)
}

fn start_tag<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        '<',
        (
            tag_name,
            cut_err((attributes, multispace0, opt('/'), '>')).context(LexerDiagnostic {
                code: ErrorCode::E002,
                message: "malformed tag",
                help: Some("close the tag with `>` or `/>`"),
                start,
            }),
        ),
    )
    .map(|(name, (attributes, _, slash, _))| Token::StartTag {
        name,
        attributes,
        self_closing: slash.is_some(),
    })
    .parse_next(input)
}

fn end_tag<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        "</",
        cut_err(terminated(tag_name, (multispace0, '>'))).context(LexerDiagnostic {
            code: ErrorCode::E002,
            message: "malformed closing tag",
            help: Some("write closing tags as `</name>`"),
            start,
        }),
    )
    .map(Token::EndTag)
    .parse_next(input)
}

fn comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        "<!--",
        cut_err(terminated(take_until(0.., "-->"), "-->")).context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated comment",
            help: Some("close the comment with `-->`"),
            start,
        }),
    )
    .map(Token::Comment)
    .parse_next(input)
}

fn cdata<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        "<![CDATA[",
        cut_err(terminated(take_until(0.., "]]>"), "]]>")).context(LexerDiagnostic {
            code: ErrorCode::E004,
            message: "unterminated CDATA section",
            help: Some("close the section with `]]>`"),
            start,
        }),
    )
    .map(Token::CData)
    .parse_next(input)
}

fn declaration<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        "<!",
        cut_err(terminated(take_till(0.., '>'), '>')).context(LexerDiagnostic {
            code: ErrorCode::E005,
            message: "unterminated declaration",
            help: Some("close the declaration with `>`"),
            start,
        }),
    )
    .map(Token::Declaration)
    .parse_next(input)
}

fn processing_instruction<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        "<?",
        cut_err(terminated(take_until(0.., "?>"), "?>")).context(LexerDiagnostic {
            code: ErrorCode::E005,
            message: "unterminated processing instruction",
            help: Some("close the instruction with `?>`"),
            start,
        }),
    )
    .map(Token::ProcessingInstruction)
    .parse_next(input)
}

/// A `<` that cannot open any construct is plain text, as in `a < b`.
fn stray_angle<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    terminated(
        '<',
        peek(not(one_of(|c: char| {
            is_name_start(c) || matches!(c, '/' | '!' | '?')
        }))),
    )
    .value(Token::Text(Cow::Borrowed("<")))
    .parse_next(input)
}

fn text<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_till(1.., '<')
        .map(|raw: &'a str| Token::Text(decode_entities(raw)))
        .parse_next(input)
}

fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    alt((
        comment,                // Must come before declaration
        cdata,                  // Must come before declaration
        declaration,
        processing_instruction,
        end_tag,                // Must come before start_tag
        start_tag,
        stray_angle,
        text,
    ))
    .with_span()
    .map(|(token, range)| PositionedToken::new(token, Span::new(range)))
    .parse_next(input)
}

/// Error-recovering lexer.
///
/// Tokenizes the entire input and collects every diagnostic instead of
/// stopping at the first error.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => {
                    let raw_element = match &token.token {
                        Token::StartTag {
                            name,
                            self_closing: false,
                            ..
                        } if is_raw_text_element(name) => Some(*name),
                        _ => None,
                    };
                    self.tokens.push(token);

                    if let Some(element) = raw_element {
                        self.raw_text(&mut input, element);
                    }
                }
                Err(e) => {
                    let error_pos = input.current_token_start();

                    let diagnostic = convert_err_mode(e, error_pos);
                    let unterminated = matches!(
                        diagnostic.code(),
                        Some(ErrorCode::E001 | ErrorCode::E004 | ErrorCode::E005)
                    );
                    self.diagnostics.emit(diagnostic);

                    Self::recover(&mut input, unterminated);
                }
            }
        }
    }

    /// Consume the body of a raw text element up to its closing tag.
    fn raw_text(&mut self, input: &mut Input<'a>, element: &str) {
        let rest: &'a str = **input;
        let closing = format!("</{}", element.to_ascii_lowercase());
        let len = rest
            .to_ascii_lowercase()
            .find(&closing)
            .unwrap_or(rest.len());
        if len == 0 {
            return;
        }

        let start = input.current_token_start();
        let body = input.next_slice(len);
        self.tokens.push(PositionedToken::new(
            Token::RawText(body),
            Span::new(start..start + len),
        ));
    }

    /// Skip past the construct that failed.
    ///
    /// Unterminated constructs swallow the rest of the input; anything else
    /// resumes after the next `>`.
    fn recover(input: &mut Input<'a>, unterminated: bool) {
        let rest: &str = **input;
        let skip = if unterminated {
            rest.len()
        } else {
            rest.find('>').map_or(rest.len(), |pos| pos + 1)
        };
        input.next_slice(skip);
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }
}

/// Convert a winnow error into a diagnostic.
///
/// Uses the innermost [`LexerDiagnostic`] context when one was attached,
/// otherwise reports a generic unexpected character.
pub(crate) fn convert_err_mode(
    err: ErrMode<ContextError<LexerDiagnostic>>,
    error_pos: usize,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(LexerDiagnostic {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let span = Span::new(*start..error_pos.max(*start + 1));

        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(span, code.description());
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    let span = Span::new(error_pos..error_pos.saturating_add(1));
    Diagnostic::error("unexpected character")
        .with_code(ErrorCode::E002)
        .with_label(span, ErrorCode::E002.description())
}

fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|raw| raw.eq_ignore_ascii_case(name))
}

/// Tokenize markup source text.
///
/// Returns every token in source order, or a [`ParseError`] holding all
/// lexical diagnostics found in the input.
pub(crate) fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    lexer.finish()
}
